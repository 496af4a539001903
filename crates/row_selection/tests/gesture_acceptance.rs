use std::sync::{Arc, Mutex};

use caseset::CaseSet;
use grid_core::{
    CellAddress, EventDisposition, GridInputEvent, GridKey, GridSurface, Modifiers, PointerEvent,
};
use row_selection::harness::{click, drag, shift_arrow, ScriptedGrid};
use row_selection::{RowSelectionController, SelectionOptions};

type SharedGrid = Arc<Mutex<ScriptedGrid>>;
type SharedCases = Arc<Mutex<CaseSet>>;
type Controller = RowSelectionController<SharedGrid, SharedCases>;

fn bound_over_cases(case_count: usize, extra_rows: usize) -> (Controller, SharedGrid, SharedCases) {
    let cases = Arc::new(Mutex::new(CaseSet::sample(case_count)));
    let grid = Arc::new(Mutex::new(ScriptedGrid::new(case_count + extra_rows, 4)));
    let mut controller = RowSelectionController::new(SelectionOptions::default(), Arc::clone(&cases));
    controller.bind(Arc::clone(&grid)).expect("bind grid");
    (controller, grid, cases)
}

fn click_case(grid: &SharedGrid, row: usize, cell: usize, modifiers: Modifiers) -> GridInputEvent {
    let grid = grid.lock().expect("grid lock");
    click(&grid, row, cell, modifiers)
}

fn drag_cases(grid: &SharedGrid, from_row: usize, to_row: usize) -> Vec<GridInputEvent> {
    let grid = grid.lock().expect("grid lock");
    drag(&grid, from_row, to_row)
}

fn selected(cases: &SharedCases) -> Vec<usize> {
    cases.lock().expect("cases lock").selected_rows()
}

#[test]
fn modifier_clicks_reach_the_caseset_acceptance() {
    let (mut controller, grid, cases) = bound_over_cases(24, 0);

    let added = controller.dispatch(click_case(&grid, 3, 0, Modifiers::ctrl()));
    assert_eq!(added, EventDisposition::Stop);
    assert_eq!(selected(&cases), vec![3]);
    assert!(cases.lock().expect("cases lock").is_selected(3));

    controller.dispatch(click_case(&grid, 7, 1, Modifiers::ctrl()));
    assert_eq!(selected(&cases), vec![3, 7]);

    let removed = controller.dispatch(click_case(&grid, 7, 1, Modifiers::meta()));
    assert_eq!(removed, EventDisposition::Stop);
    assert_eq!(selected(&cases), vec![3]);

    controller.dispatch(click_case(&grid, 6, 2, Modifiers::shift()));
    assert_eq!(selected(&cases), vec![3, 4, 5, 6]);
    assert_eq!(
        grid.lock().expect("grid lock").active_cell(),
        Some(CellAddress::new(6, 2))
    );

    let plain = controller.dispatch(click_case(&grid, 9, 0, Modifiers::NONE));
    assert_eq!(plain, EventDisposition::Propagate);
    assert_eq!(selected(&cases), vec![3, 4, 5, 6]);

    let tsv = cases.lock().expect("cases lock").selected_rows_as_tsv();
    assert_eq!(tsv.lines().count(), 5);
    assert!(tsv.starts_with("case\tgroup"));
}

#[test]
fn blank_input_row_stays_out_of_the_caseset_acceptance() {
    // One grid row past the cases, like an empty entry row at the bottom.
    let (mut controller, grid, cases) = bound_over_cases(12, 1);
    for cell in 0..4 {
        grid.lock().expect("grid lock").deactivate_cell(12, cell);
    }

    let on_input_row = controller.dispatch(click_case(&grid, 12, 0, Modifiers::ctrl()));
    assert_eq!(on_input_row, EventDisposition::Propagate);
    assert_eq!(selected(&cases), Vec::<usize>::new());

    controller.dispatch(click_case(&grid, 11, 0, Modifiers::ctrl()));
    assert_eq!(selected(&cases), vec![11]);

    // Keyboard extension may walk onto the input row; the caseset drops it.
    let extended = controller.dispatch(shift_arrow(GridKey::ArrowDown));
    assert_eq!(extended, EventDisposition::StopAndSuppressDefault);
    assert_eq!(
        grid.lock().expect("grid lock").active_cell(),
        Some(CellAddress::new(12, 0))
    );
    assert_eq!(controller.selected_rows(), vec![11, 12]);
    assert_eq!(selected(&cases), vec![11]);
}

#[test]
fn drag_span_updates_the_caseset_live_acceptance() {
    let (mut controller, grid, cases) = bound_over_cases(40, 0);
    let events = drag_cases(&grid, 14, 18);

    controller.dispatch(events[0]);
    assert!(controller.drag_in_progress());
    controller.dispatch(events[1]);
    assert_eq!(selected(&cases), vec![14]);

    controller.dispatch(events[2]);
    assert_eq!(selected(&cases), vec![14, 15]);

    for event in &events[3..] {
        controller.dispatch(*event);
    }
    assert_eq!(selected(&cases), vec![14, 15, 16, 17, 18]);
    assert!(!controller.drag_in_progress());
}

#[test]
fn host_select_all_then_destroy_leaves_the_caseset_untouched_acceptance() {
    let (mut controller, grid, cases) = bound_over_cases(10, 0);

    // Select-all runs on the caseset first, then the controller mirrors it.
    cases.lock().expect("cases lock").select_all();
    let all = selected(&cases);
    controller.set_selected_rows(&all);
    assert_eq!(controller.selected_rows(), (0..10).collect::<Vec<_>>());

    controller.destroy();

    let late_click = controller.dispatch(click_case(&grid, 2, 0, Modifiers::ctrl()));
    assert_eq!(late_click, EventDisposition::Propagate);
    let late_move =
        controller.dispatch(GridInputEvent::DragMove(PointerEvent::new(10.0, 60.0, Modifiers::NONE)));
    assert_eq!(late_move, EventDisposition::Propagate);
    assert_eq!(selected(&cases), (0..10).collect::<Vec<_>>());
}
