use super::*;

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

#[test]
fn single_row_range_spans_every_column() {
    let range = CellRange::single_row(4, 6);
    assert_eq!(range.from_row, 4);
    assert_eq!(range.to_row, 4);
    assert_eq!(range.from_cell, 0);
    assert_eq!(range.to_cell, 6);
    assert_eq!(range.rows().collect::<Vec<_>>(), vec![4]);
}

#[test]
fn range_row_membership_is_inclusive() {
    let range = CellRange::new(2, 0, 5, 3);
    assert!(range.contains_row(2));
    assert!(range.contains_row(5));
    assert!(!range.contains_row(1));
    assert!(!range.contains_row(6));
}

#[test]
fn cell_box_midpoint_sits_between_top_and_bottom() {
    let cell_box = CellBox {
        top: 100.0,
        bottom: 124.0,
        left: 0.0,
        right: 80.0,
    };
    assert_eq!(cell_box.vertical_midpoint(), 112.0);
}

#[test]
fn command_modifier_covers_ctrl_and_meta() {
    assert!(Modifiers::ctrl().command());
    assert!(Modifiers::meta().command());
    assert!(!Modifiers::shift().command());
    assert!(!Modifiers::NONE.command());
}

#[test]
fn shift_only_rejects_chords_with_other_modifiers() {
    assert!(Modifiers::shift().shift_only());
    let chord = Modifiers {
        shift: true,
        ctrl: true,
        ..Modifiers::NONE
    };
    assert!(!chord.shift_only());
    assert!(!Modifiers::NONE.shift_only());
}

struct CountingSink {
    applied: Vec<Vec<usize>>,
}

impl SelectionSink for CountingSink {
    fn apply_row_selection(&mut self, rows: &[usize]) {
        self.applied.push(rows.to_vec());
    }

    fn is_row_selectable(&self, address: CellAddress) -> bool {
        address.row < 10
    }
}

#[test]
fn shared_cell_sink_delegates_to_inner_value() {
    let inner = Rc::new(RefCell::new(CountingSink { applied: Vec::new() }));
    let mut sink = Rc::clone(&inner);
    sink.apply_row_selection(&[1, 2]);
    assert!(sink.is_row_selectable(CellAddress::new(9, 0)));
    assert!(!sink.is_row_selectable(CellAddress::new(10, 0)));
    assert_eq!(inner.borrow().applied, vec![vec![1, 2]]);
}

#[test]
fn shared_mutex_sink_delegates_to_inner_value() {
    let inner = Arc::new(Mutex::new(CountingSink { applied: Vec::new() }));
    let mut sink = Arc::clone(&inner);
    sink.apply_row_selection(&[7]);
    assert_eq!(inner.lock().expect("sink").applied, vec![vec![7]]);
}
