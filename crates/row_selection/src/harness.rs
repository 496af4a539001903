//! Scripted grid, recording sink, and gesture builders for exercising
//! selection handling without a real widget toolkit.

use std::collections::HashSet;

use grid_core::{
    CellAddress, CellBox, GridInputEvent, GridKey, GridOptions, GridSurface, Modifiers,
    PointerEvent, SelectionSink,
};

/// In-memory grid with uniform row and column geometry. Every cell is
/// treated as rendered, so geometry queries stay answerable anywhere in the
/// data set.
#[derive(Debug, Clone)]
pub struct ScriptedGrid {
    data_length: usize,
    columns: usize,
    row_height: f32,
    column_width: f32,
    viewport_height: f32,
    /// Client position of the viewport's top-left corner.
    origin_x: f32,
    origin_y: f32,
    /// Grid-local y of the first visible pixel, i.e. the scroll offset.
    viewport_top: f32,
    active: Option<CellAddress>,
    options: GridOptions,
    inactive_cells: HashSet<(usize, usize)>,
    scroll_requests: Vec<usize>,
}

impl ScriptedGrid {
    pub fn new(data_length: usize, columns: usize) -> Self {
        Self {
            data_length,
            columns,
            row_height: 24.0,
            column_width: 80.0,
            viewport_height: 240.0,
            origin_x: 0.0,
            origin_y: 0.0,
            viewport_top: 0.0,
            active: None,
            options: GridOptions::default(),
            inactive_cells: HashSet::new(),
            scroll_requests: Vec::new(),
        }
    }

    pub fn set_multi_select(&mut self, multi_select: bool) {
        self.options.multi_select = multi_select;
    }

    pub fn set_viewport_top(&mut self, viewport_top: f32) {
        self.viewport_top = viewport_top;
    }

    /// Mark a cell as refusing grid focus, matching grids that carve out
    /// non-interactive cells.
    pub fn deactivate_cell(&mut self, row: usize, cell: usize) {
        self.inactive_cells.insert((row, cell));
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    /// Rows the grid was asked to bring into view, in request order.
    pub fn scroll_requests(&self) -> &[usize] {
        &self.scroll_requests
    }

    /// Client coordinates of a cell's center under the current scroll
    /// position.
    pub fn client_center_of(&self, row: usize, cell: usize) -> (f32, f32) {
        let x = self.origin_x + (cell as f32 + 0.5) * self.column_width;
        let y = self.origin_y + (row as f32 + 0.5) * self.row_height - self.viewport_top;
        (x, y)
    }
}

impl GridSurface for ScriptedGrid {
    fn active_cell(&self) -> Option<CellAddress> {
        self.active
    }

    fn data_length(&self) -> usize {
        self.data_length
    }

    fn column_count(&self) -> usize {
        self.columns
    }

    fn cell_from_event(&self, event: &PointerEvent) -> Option<CellAddress> {
        let x = event.client_x - self.origin_x;
        let y = (event.client_y - self.origin_y) + self.viewport_top;
        self.cell_at_point(x, y)
    }

    fn cell_at_point(&self, x: f32, y: f32) -> Option<CellAddress> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        let row = (y / self.row_height).floor() as usize;
        let cell = (x / self.column_width).floor() as usize;
        if row >= self.data_length || cell >= self.columns {
            return None;
        }
        Some(CellAddress::new(row, cell))
    }

    fn cell_box(&self, address: CellAddress) -> Option<CellBox> {
        if address.row >= self.data_length || address.cell >= self.columns {
            return None;
        }
        Some(CellBox {
            top: address.row as f32 * self.row_height,
            bottom: (address.row + 1) as f32 * self.row_height,
            left: address.cell as f32 * self.column_width,
            right: (address.cell + 1) as f32 * self.column_width,
        })
    }

    fn can_cell_be_active(&self, address: CellAddress) -> bool {
        address.row < self.data_length
            && address.cell < self.columns
            && !self.inactive_cells.contains(&(address.row, address.cell))
    }

    fn set_active_cell(&mut self, address: CellAddress) {
        self.active = Some(address);
    }

    fn scroll_row_into_view(&mut self, row: usize) {
        self.scroll_requests.push(row);
        let row_top = row as f32 * self.row_height;
        let row_bottom = row_top + self.row_height;
        if row_top < self.viewport_top {
            self.viewport_top = row_top;
        } else if row_bottom > self.viewport_top + self.viewport_height {
            self.viewport_top = row_bottom - self.viewport_height;
        }
    }

    fn options(&self) -> GridOptions {
        self.options
    }
}

/// Sink that records every applied row list and lets tests veto rows.
#[derive(Debug, Default)]
pub struct RecordingSink {
    applied: Vec<Vec<usize>>,
    unselectable_rows: HashSet<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_row_unselectable(&mut self, row: usize) {
        self.unselectable_rows.insert(row);
    }

    pub fn applied(&self) -> &[Vec<usize>] {
        &self.applied
    }

    pub fn last_applied(&self) -> Option<&[usize]> {
        self.applied.last().map(Vec::as_slice)
    }

    pub fn apply_count(&self) -> usize {
        self.applied.len()
    }
}

impl SelectionSink for RecordingSink {
    fn apply_row_selection(&mut self, rows: &[usize]) {
        self.applied.push(rows.to_vec());
    }

    fn is_row_selectable(&self, address: CellAddress) -> bool {
        !self.unselectable_rows.contains(&address.row)
    }
}

/// Click event centered on a cell, carrying the given modifier chord.
pub fn click(grid: &ScriptedGrid, row: usize, cell: usize, modifiers: Modifiers) -> GridInputEvent {
    let (x, y) = grid.client_center_of(row, cell);
    GridInputEvent::Click(PointerEvent::new(x, y, modifiers))
}

/// Click event at an arbitrary client position.
pub fn click_at(x: f32, y: f32, modifiers: Modifiers) -> GridInputEvent {
    GridInputEvent::Click(PointerEvent::new(x, y, modifiers))
}

pub fn key_down(key: GridKey, modifiers: Modifiers) -> GridInputEvent {
    GridInputEvent::KeyDown { key, modifiers }
}

/// The shift-extend chord for one arrow key.
pub fn shift_arrow(key: GridKey) -> GridInputEvent {
    key_down(key, Modifiers::shift())
}

/// Full drag gesture from the center of one row to the center of another:
/// init and start on the first row, one move per row crossed, then the
/// release.
pub fn drag(grid: &ScriptedGrid, from_row: usize, to_row: usize) -> Vec<GridInputEvent> {
    let (start_x, start_y) = grid.client_center_of(from_row, 0);
    let start = PointerEvent::new(start_x, start_y, Modifiers::NONE);

    let mut events = vec![
        GridInputEvent::DragInit(start),
        GridInputEvent::DragStart(start),
    ];

    let step: i64 = if to_row >= from_row { 1 } else { -1 };
    let mut row = from_row as i64;
    let mut last = start;
    while row != to_row as i64 {
        row += step;
        let (_, y) = grid.client_center_of(row as usize, 0);
        last = PointerEvent::new(start_x, y, Modifiers::NONE);
        events.push(GridInputEvent::DragMove(last));
    }
    events.push(GridInputEvent::DragEnd(last));
    events
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_center_round_trips_through_cell_from_event() {
        let grid = ScriptedGrid::new(20, 4);
        let (x, y) = grid.client_center_of(7, 2);
        let event = PointerEvent::new(x, y, Modifiers::NONE);
        assert_eq!(grid.cell_from_event(&event), Some(CellAddress::new(7, 2)));
    }

    #[test]
    fn scrolled_grid_maps_client_points_to_shifted_rows() {
        let mut grid = ScriptedGrid::new(40, 3);
        grid.set_viewport_top(10.0 * grid.row_height());
        let (x, y) = grid.client_center_of(12, 0);
        // Row 12 now renders near the top of the viewport.
        assert!(y < 3.0 * grid.row_height());
        let event = PointerEvent::new(x, y, Modifiers::NONE);
        assert_eq!(grid.cell_from_event(&event), Some(CellAddress::new(12, 0)));
    }

    #[test]
    fn points_outside_the_data_resolve_to_none() {
        let grid = ScriptedGrid::new(5, 2);
        assert_eq!(grid.cell_at_point(-1.0, 10.0), None);
        assert_eq!(grid.cell_at_point(10.0, 5.0 * 24.0 + 1.0), None);
        assert_eq!(grid.cell_at_point(2.0 * 80.0 + 1.0, 10.0), None);
    }

    #[test]
    fn cell_boxes_follow_uniform_geometry() {
        let grid = ScriptedGrid::new(5, 2);
        let cell_box = grid.cell_box(CellAddress::new(3, 1)).expect("box");
        assert_eq!(cell_box.top, 72.0);
        assert_eq!(cell_box.bottom, 96.0);
        assert_eq!(cell_box.left, 80.0);
        assert_eq!(grid.cell_box(CellAddress::new(5, 0)), None);
    }

    #[test]
    fn deactivated_cells_refuse_focus() {
        let mut grid = ScriptedGrid::new(5, 2);
        grid.deactivate_cell(4, 0);
        assert!(!grid.can_cell_be_active(CellAddress::new(4, 0)));
        assert!(grid.can_cell_be_active(CellAddress::new(4, 1)));
        assert!(!grid.can_cell_be_active(CellAddress::new(5, 0)));
    }

    #[test]
    fn scroll_into_view_adjusts_viewport_and_records_request() {
        let mut grid = ScriptedGrid::new(100, 2);
        grid.scroll_row_into_view(50);
        assert_eq!(grid.scroll_requests(), &[50]);
        let (_, y) = grid.client_center_of(50, 0);
        assert!(y >= 0.0);
        let event = PointerEvent::new(10.0, y, Modifiers::NONE);
        assert_eq!(grid.cell_from_event(&event), Some(CellAddress::new(50, 0)));
    }

    #[test]
    fn drag_builder_emits_init_start_moves_and_end() {
        let grid = ScriptedGrid::new(20, 2);
        let events = drag(&grid, 3, 6);
        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], GridInputEvent::DragInit(_)));
        assert!(matches!(events[1], GridInputEvent::DragStart(_)));
        assert!(matches!(events[2], GridInputEvent::DragMove(_)));
        assert!(matches!(events[4], GridInputEvent::DragEnd(_)));
    }

    #[test]
    fn upward_drag_builder_walks_rows_in_descending_order() {
        let grid = ScriptedGrid::new(20, 2);
        let events = drag(&grid, 6, 4);
        let moves: Vec<f32> = events
            .iter()
            .filter_map(|event| match event {
                GridInputEvent::DragMove(pointer) => Some(pointer.client_y),
                _ => None,
            })
            .collect();
        assert_eq!(moves.len(), 2);
        assert!(moves[0] > moves[1]);
    }
}
