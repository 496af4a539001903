//! Seams between a grid host, row-selection handling, and the data context
//! that owns the real selection.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::{CellAddress, CellBox, GridOptions};
use crate::events::PointerEvent;

/// Narrow view of a grid widget: the queries and commands selection handling
/// needs, nothing else.
pub trait GridSurface {
    fn active_cell(&self) -> Option<CellAddress>;

    /// Number of data rows currently backing the grid.
    fn data_length(&self) -> usize;

    fn column_count(&self) -> usize;

    /// Resolve the cell under a pointer event, in client coordinates.
    /// `None` when the pointer is outside the rendered cells.
    fn cell_from_event(&self, event: &PointerEvent) -> Option<CellAddress>;

    /// Resolve the cell at a point in grid-local coordinates.
    fn cell_at_point(&self, x: f32, y: f32) -> Option<CellAddress>;

    /// On-screen bounds of a cell, grid-local. `None` when the cell is not
    /// currently rendered.
    fn cell_box(&self, address: CellAddress) -> Option<CellBox>;

    fn can_cell_be_active(&self, address: CellAddress) -> bool;

    fn set_active_cell(&mut self, address: CellAddress);

    fn scroll_row_into_view(&mut self, row: usize);

    fn options(&self) -> GridOptions;
}

/// Receiver for the row selections a controller computes, and the authority
/// on which rows may be selected at all.
pub trait SelectionSink {
    /// Replace the sink's notion of the selected rows. Called synchronously,
    /// once per accepted gesture step.
    fn apply_row_selection(&mut self, rows: &[usize]);

    /// Whether the row under `address` is eligible for selection.
    fn is_row_selectable(&self, address: CellAddress) -> bool;
}

impl<T: GridSurface> GridSurface for Rc<RefCell<T>> {
    fn active_cell(&self) -> Option<CellAddress> {
        self.borrow().active_cell()
    }

    fn data_length(&self) -> usize {
        self.borrow().data_length()
    }

    fn column_count(&self) -> usize {
        self.borrow().column_count()
    }

    fn cell_from_event(&self, event: &PointerEvent) -> Option<CellAddress> {
        self.borrow().cell_from_event(event)
    }

    fn cell_at_point(&self, x: f32, y: f32) -> Option<CellAddress> {
        self.borrow().cell_at_point(x, y)
    }

    fn cell_box(&self, address: CellAddress) -> Option<CellBox> {
        self.borrow().cell_box(address)
    }

    fn can_cell_be_active(&self, address: CellAddress) -> bool {
        self.borrow().can_cell_be_active(address)
    }

    fn set_active_cell(&mut self, address: CellAddress) {
        self.borrow_mut().set_active_cell(address);
    }

    fn scroll_row_into_view(&mut self, row: usize) {
        self.borrow_mut().scroll_row_into_view(row);
    }

    fn options(&self) -> GridOptions {
        self.borrow().options()
    }
}

impl<T: SelectionSink> SelectionSink for Rc<RefCell<T>> {
    fn apply_row_selection(&mut self, rows: &[usize]) {
        self.borrow_mut().apply_row_selection(rows);
    }

    fn is_row_selectable(&self, address: CellAddress) -> bool {
        self.borrow().is_row_selectable(address)
    }
}

// Recover the guard from a poisoned lock; the protected state is plain data
// and stays usable after a panicked holder.
fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl<T: GridSurface> GridSurface for Arc<Mutex<T>> {
    fn active_cell(&self) -> Option<CellAddress> {
        locked(self).active_cell()
    }

    fn data_length(&self) -> usize {
        locked(self).data_length()
    }

    fn column_count(&self) -> usize {
        locked(self).column_count()
    }

    fn cell_from_event(&self, event: &PointerEvent) -> Option<CellAddress> {
        locked(self).cell_from_event(event)
    }

    fn cell_at_point(&self, x: f32, y: f32) -> Option<CellAddress> {
        locked(self).cell_at_point(x, y)
    }

    fn cell_box(&self, address: CellAddress) -> Option<CellBox> {
        locked(self).cell_box(address)
    }

    fn can_cell_be_active(&self, address: CellAddress) -> bool {
        locked(self).can_cell_be_active(address)
    }

    fn set_active_cell(&mut self, address: CellAddress) {
        locked(self).set_active_cell(address);
    }

    fn scroll_row_into_view(&mut self, row: usize) {
        locked(self).scroll_row_into_view(row);
    }

    fn options(&self) -> GridOptions {
        locked(self).options()
    }
}

impl<T: SelectionSink> SelectionSink for Arc<Mutex<T>> {
    fn apply_row_selection(&mut self, rows: &[usize]) {
        locked(self).apply_row_selection(rows);
    }

    fn is_row_selectable(&self, address: CellAddress) -> bool {
        locked(self).is_row_selectable(address)
    }
}
