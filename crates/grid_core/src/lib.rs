//! Vocabulary shared between grid hosts, row-selection handling, and the
//! data contexts that own the canonical selection.

pub mod domain;
pub mod events;
pub mod surface;

pub use domain::{CellAddress, CellBox, CellRange, GridOptions};
pub use events::{EventDisposition, GridInputEvent, GridKey, Modifiers, PointerEvent};
pub use surface::{GridSurface, SelectionSink};

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
