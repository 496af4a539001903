use grid_core::{
    CellAddress, CellRange, EventDisposition, GridInputEvent, GridKey, GridSurface, Modifiers,
    PointerEvent, SelectionSink,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

pub mod harness;
pub mod ranges;

/// How [`RowSelectionController::bind`] treats a controller that already has
/// a grid attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RebindPolicy {
    /// A second bind without an intervening destroy is an error.
    #[default]
    Reject,
    /// A second bind replaces the previous grid.
    Replace,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionOptions {
    pub rebind: RebindPolicy,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("selection controller is already bound to a grid")]
    AlreadyBound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DispatchState {
    Idle,
    Handling,
}

/// Re-entrancy gate around event dispatch. Selection changes feed back into
/// the grid, and the grid echoes them as fresh events; the gate drops those
/// echoes instead of letting them mutate state mid-gesture.
#[derive(Debug)]
struct DispatchGate {
    state: DispatchState,
}

impl DispatchGate {
    fn new() -> Self {
        Self {
            state: DispatchState::Idle,
        }
    }

    fn try_enter(&mut self) -> bool {
        if self.state == DispatchState::Handling {
            return false;
        }
        self.state = DispatchState::Handling;
        true
    }

    fn leave(&mut self) {
        self.state = DispatchState::Idle;
    }
}

/// Anchor captured on drag start: the row under the pointer, that row's
/// vertical midpoint in grid-local coordinates, and the pointer's client y.
/// Later drag moves are resolved against the anchor so scrolling during the
/// drag does not shift the selection.
#[derive(Debug, Clone, Copy)]
struct DragAnchor {
    row: usize,
    grid_y: f32,
    client_y: f32,
}

/// Token for a registered ranges listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type RangesListener = Box<dyn FnMut(&[CellRange])>;

/// Row-oriented selection gestures for a grid widget.
///
/// The controller owns the range list the grid renders from, forwards every
/// accepted change to its [`SelectionSink`] synchronously, and reports back
/// how far each input event should propagate. It holds no reference to the
/// wider application; everything it touches arrives through the
/// [`GridSurface`] handle given to [`bind`](Self::bind) and the sink given
/// at construction.
pub struct RowSelectionController<G: GridSurface, S: SelectionSink> {
    options: SelectionOptions,
    sink: S,
    grid: Option<G>,
    ranges: Vec<CellRange>,
    gate: DispatchGate,
    in_drag: bool,
    drag_anchor: Option<DragAnchor>,
    listeners: Vec<(ListenerId, RangesListener)>,
    next_listener: u64,
}

impl<G: GridSurface, S: SelectionSink> RowSelectionController<G, S> {
    pub fn new(options: SelectionOptions, sink: S) -> Self {
        Self {
            options,
            sink,
            grid: None,
            ranges: Vec::new(),
            gate: DispatchGate::new(),
            in_drag: false,
            drag_anchor: None,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Attach the controller to a grid. Gesture dispatch is inert until this
    /// succeeds.
    pub fn bind(&mut self, grid: G) -> Result<(), BindError> {
        if self.grid.is_some() {
            match self.options.rebind {
                RebindPolicy::Reject => return Err(BindError::AlreadyBound),
                RebindPolicy::Replace => {
                    debug!("selection: replacing existing grid binding");
                }
            }
        }
        debug!(
            "selection: bound to grid with {} data rows",
            grid.data_length()
        );
        self.grid = Some(grid);
        Ok(())
    }

    /// Detach from the grid and clear transient gesture state. The last
    /// committed selection stays readable; further events are ignored.
    pub fn destroy(&mut self) {
        self.grid = None;
        self.in_drag = false;
        self.drag_anchor = None;
        debug!("selection: detached from grid");
    }

    pub fn is_bound(&self) -> bool {
        self.grid.is_some()
    }

    pub fn drag_in_progress(&self) -> bool {
        self.in_drag
    }

    /// Selected row indices, flattened from the current ranges in range
    /// order. Not deduplicated or sorted.
    pub fn selected_rows(&self) -> Vec<usize> {
        ranges::ranges_to_rows(&self.ranges)
    }

    /// Replace the selection with one full-width range per row index. Fires
    /// the ranges notification once; does not call the sink, since the host
    /// initiating this already owns the canonical selection.
    pub fn set_selected_rows(&mut self, rows: &[usize]) {
        let ranges = ranges::rows_to_ranges(rows, self.last_cell());
        self.replace_ranges(ranges);
    }

    pub fn selected_ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    /// Replace the stored ranges verbatim and fire the notification once.
    pub fn set_selected_ranges(&mut self, ranges: Vec<CellRange>) {
        self.replace_ranges(ranges);
    }

    pub fn on_ranges_changed(&mut self, listener: impl FnMut(&[CellRange]) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_ranges_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Route one grid input event through the selection gestures. Returns
    /// how far the host should let the raw event travel afterwards.
    pub fn dispatch(&mut self, event: GridInputEvent) -> EventDisposition {
        if self.grid.is_none() {
            return EventDisposition::Propagate;
        }
        if !self.gate.try_enter() {
            trace!("selection: dropping re-entrant event dispatch");
            return EventDisposition::Propagate;
        }
        let disposition = self.handle_event(event);
        self.gate.leave();
        disposition
    }

    fn handle_event(&mut self, event: GridInputEvent) -> EventDisposition {
        match event {
            GridInputEvent::KeyDown { key, modifiers } => self.handle_key_down(key, modifiers),
            GridInputEvent::Click(pointer) => self.handle_click(pointer),
            GridInputEvent::DragInit(_) => self.handle_drag_init(),
            GridInputEvent::DragStart(pointer) => self.handle_drag_start(pointer),
            GridInputEvent::DragMove(pointer) => self.handle_drag_move(pointer),
            GridInputEvent::DragEnd(_) => self.handle_drag_end(),
        }
    }

    fn handle_key_down(&mut self, key: GridKey, modifiers: Modifiers) -> EventDisposition {
        if !matches!(key, GridKey::ArrowUp | GridKey::ArrowDown) || !modifiers.shift_only() {
            return EventDisposition::Propagate;
        }
        let Some(grid) = self.grid.as_mut() else {
            return EventDisposition::Propagate;
        };
        let Some(active) = grid.active_cell() else {
            return EventDisposition::Propagate;
        };

        let mut rows = ranges::ranges_to_rows(&self.ranges);
        rows.sort_unstable();
        let (mut top, mut bottom) = match (rows.first(), rows.last()) {
            (Some(&first), Some(&last)) => (first as i64, last as i64),
            _ => (active.row as i64, active.row as i64),
        };

        // Grow away from the active row, shrink toward it.
        let active_row = active.row as i64;
        let moved = if key == GridKey::ArrowDown {
            if active_row < bottom || top == bottom {
                bottom += 1;
                bottom
            } else {
                top += 1;
                top
            }
        } else if active_row < bottom {
            bottom -= 1;
            bottom
        } else {
            top -= 1;
            top
        };

        if moved < 0 || moved >= grid.data_length() as i64 {
            return EventDisposition::Propagate;
        }
        let moved_row = moved as usize;
        grid.scroll_row_into_view(moved_row);
        grid.set_active_cell(CellAddress::new(moved_row, active.cell));

        let low = top.min(bottom) as usize;
        let high = top.max(bottom) as usize;
        debug!("selection: keyboard extend covers rows {low}..={high}");
        self.commit_selection(ranges::row_span(low, high));
        EventDisposition::StopAndSuppressDefault
    }

    fn handle_click(&mut self, pointer: PointerEvent) -> EventDisposition {
        let Some(grid) = self.grid.as_mut() else {
            return EventDisposition::Propagate;
        };
        let Some(cell) = grid.cell_from_event(&pointer) else {
            return EventDisposition::Propagate;
        };
        if !grid.can_cell_be_active(cell) && !self.sink.is_row_selectable(cell) {
            return EventDisposition::Propagate;
        }

        // Plain clicks belong to the grid's own active-cell handling.
        let modifiers = pointer.modifiers;
        if !modifiers.ctrl && !modifiers.shift && !modifiers.meta {
            return EventDisposition::Propagate;
        }

        let mut rows = ranges::ranges_to_rows(&self.ranges);
        if grid.options().multi_select {
            let already_selected = rows.contains(&cell.row);
            if modifiers.command() && !already_selected {
                rows.push(cell.row);
                grid.set_active_cell(cell);
            } else if modifiers.command() && already_selected {
                rows.retain(|&row| row != cell.row);
                grid.set_active_cell(cell);
            } else if modifiers.shift && !rows.is_empty() {
                let first = rows.iter().copied().min().unwrap_or(cell.row);
                let last = rows.iter().copied().max().unwrap_or(cell.row);
                rows = ranges::row_span(first.min(cell.row), last.max(cell.row));
                grid.set_active_cell(cell);
            }
        }

        debug!(
            "selection: modified click on row {} leaves {} rows selected",
            cell.row,
            rows.len()
        );
        self.commit_selection(rows);
        EventDisposition::Stop
    }

    fn handle_drag_init(&mut self) -> EventDisposition {
        self.in_drag = true;
        EventDisposition::Stop
    }

    fn handle_drag_start(&mut self, pointer: PointerEvent) -> EventDisposition {
        let anchor = {
            let Some(grid) = self.grid.as_ref() else {
                return EventDisposition::Propagate;
            };
            grid.cell_from_event(&pointer).and_then(|cell| {
                grid.cell_box(cell).map(|cell_box| DragAnchor {
                    row: cell.row,
                    grid_y: cell_box.vertical_midpoint(),
                    client_y: pointer.client_y,
                })
            })
        };

        if let Some(anchor) = anchor {
            debug!("selection: drag anchored at row {}", anchor.row);
            let row = anchor.row;
            self.drag_anchor = Some(anchor);
            self.commit_selection(vec![row]);
        }
        EventDisposition::Stop
    }

    fn handle_drag_move(&mut self, pointer: PointerEvent) -> EventDisposition {
        let resolved = match (self.grid.as_ref(), self.drag_anchor) {
            (Some(grid), Some(anchor)) => {
                // Pointer travel is applied to the anchor's grid-local
                // midpoint, so a grid that scrolled under the pointer still
                // resolves the row the drag has actually reached.
                let grid_y = anchor.grid_y + (pointer.client_y - anchor.client_y);
                grid.cell_at_point(0.0, grid_y)
                    .map(|cell| (anchor.row, cell.row))
            }
            _ => None,
        };

        if let Some((anchor_row, target_row)) = resolved {
            trace!("selection: drag spans rows {anchor_row}..{target_row}");
            self.commit_selection(ranges::row_span(anchor_row, target_row));
        }
        EventDisposition::Stop
    }

    fn handle_drag_end(&mut self) -> EventDisposition {
        self.in_drag = false;
        self.drag_anchor = None;
        EventDisposition::Stop
    }

    /// Push an accepted gesture result to the sink, then mirror it into the
    /// stored ranges and notify. Sink first: listeners observing the ranges
    /// must see the data context already updated.
    fn commit_selection(&mut self, rows: Vec<usize>) {
        self.sink.apply_row_selection(&rows);
        let ranges = ranges::rows_to_ranges(&rows, self.last_cell());
        self.replace_ranges(ranges);
    }

    fn replace_ranges(&mut self, ranges: Vec<CellRange>) {
        self.ranges = ranges;
        let snapshot = self.ranges.clone();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snapshot);
        }
    }

    fn last_cell(&self) -> usize {
        self.grid
            .as_ref()
            .map(|grid| grid.column_count())
            .unwrap_or(1)
            .saturating_sub(1)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
