use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use caseset::CaseSet;
use clap::Parser;
use grid_core::{GridInputEvent, GridKey, Modifiers};
use row_selection::harness::{click, drag, shift_arrow, ScriptedGrid};
use row_selection::{RowSelectionController, SelectionOptions};
use tracing::info;

#[derive(Parser, Debug)]
struct Args {
    /// Number of sample cases to walk over.
    #[arg(long, default_value_t = 24)]
    case_count: usize,
}

type SharedGrid = Rc<RefCell<ScriptedGrid>>;
type SharedCases = Rc<RefCell<CaseSet>>;

fn click_on(grid: &SharedGrid, row: usize, cell: usize, modifiers: Modifiers) -> GridInputEvent {
    click(&grid.borrow(), row, cell, modifiers)
}

fn drag_rows(grid: &SharedGrid, from_row: usize, to_row: usize) -> Vec<GridInputEvent> {
    drag(&grid.borrow(), from_row, to_row)
}

fn show(step: &str, cases: &SharedCases) {
    println!("{step}: selected rows {:?}", cases.borrow().selected_rows());
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();
    let args = Args::parse();
    anyhow::ensure!(
        args.case_count >= 20,
        "the walkthrough touches row 18; pass --case-count 20 or more"
    );

    let cases: SharedCases = Rc::new(RefCell::new(CaseSet::sample(args.case_count)));
    let grid: SharedGrid = Rc::new(RefCell::new(ScriptedGrid::new(args.case_count, 4)));
    let mut controller =
        RowSelectionController::new(SelectionOptions::default(), Rc::clone(&cases));
    controller.bind(Rc::clone(&grid))?;
    controller.on_ranges_changed(|ranges| println!("  -> selection changed ({} rows)", ranges.len()));
    info!(case_count = args.case_count, "replaying a canned gesture walkthrough");

    controller.dispatch(click_on(&grid, 2, 0, Modifiers::ctrl()));
    show("ctrl-click row 2", &cases);
    controller.dispatch(click_on(&grid, 5, 1, Modifiers::ctrl()));
    show("ctrl-click row 5", &cases);
    controller.dispatch(click_on(&grid, 9, 0, Modifiers::meta()));
    show("meta-click row 9", &cases);

    controller.dispatch(click_on(&grid, 5, 1, Modifiers::ctrl()));
    show("ctrl-click row 5 again (toggle off)", &cases);

    controller.dispatch(click_on(&grid, 12, 2, Modifiers::shift()));
    show("shift-click row 12 (span from the extremes)", &cases);

    controller.dispatch(shift_arrow(GridKey::ArrowDown));
    show("shift+down", &cases);
    controller.dispatch(shift_arrow(GridKey::ArrowUp));
    show("shift+up", &cases);

    for event in drag_rows(&grid, 14, 18) {
        controller.dispatch(event);
    }
    show("drag from row 14 to row 18", &cases);

    controller.destroy();
    let late = controller.dispatch(click_on(&grid, 1, 0, Modifiers::ctrl()));
    println!("ctrl-click after destroy: {late:?}");
    show("final state", &cases);

    Ok(())
}
