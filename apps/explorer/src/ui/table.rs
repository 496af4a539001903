//! Geometry bridge between the rendered case table and selection handling.

use grid_core::{
    CellAddress, CellBox, GridInputEvent, GridOptions, GridSurface, Modifiers, PointerEvent,
};

pub const INDEX_COLUMN_WIDTH: f32 = 48.0;
pub const DATA_COLUMN_WIDTH: f32 = 110.0;

/// Grid-surface view of the rendered case table.
///
/// Grid-local coordinates put x = 0 at the left edge of the first data column
/// and y = 0 at the top of the first row; the row-index column sits in
/// negative x. `set_frame` refreshes where that origin currently is on
/// screen, so pointer events in screen coordinates resolve against whatever
/// the scroll position was when they fired.
pub struct TableState {
    case_count: usize,
    column_count: usize,
    row_height: f32,
    multi_select: bool,
    active: Option<CellAddress>,
    origin_x: f32,
    origin_y: f32,
    viewport_top: f32,
    viewport_height: f32,
    pending_scroll: Option<usize>,
}

impl TableState {
    pub fn new(case_count: usize, column_count: usize, row_height: f32, multi_select: bool) -> Self {
        Self {
            case_count,
            column_count,
            row_height,
            multi_select,
            active: None,
            origin_x: 0.0,
            origin_y: 0.0,
            viewport_top: 0.0,
            viewport_height: 0.0,
            pending_scroll: None,
        }
    }

    pub fn row_height(&self) -> f32 {
        self.row_height
    }

    pub fn set_row_height(&mut self, row_height: f32) {
        self.row_height = row_height;
    }

    /// Record this frame's screen origin of grid cell (0, 0) and the scroll
    /// viewport, after the table has been laid out.
    pub fn set_frame(&mut self, origin_x: f32, origin_y: f32, scroll_offset: f32, viewport_height: f32) {
        self.origin_x = origin_x;
        self.origin_y = origin_y;
        self.viewport_top = scroll_offset;
        self.viewport_height = viewport_height;
    }

    /// Scroll offset that satisfies the pending scroll request, if any row
    /// was requested and it is not already fully visible.
    pub fn take_scroll_target(&mut self) -> Option<f32> {
        let row = self.pending_scroll.take()?;
        let top = row as f32 * self.row_height;
        let bottom = top + self.row_height;
        if top < self.viewport_top {
            Some(top)
        } else if bottom > self.viewport_top + self.viewport_height {
            Some(bottom - self.viewport_height)
        } else {
            None
        }
    }
}

impl GridSurface for TableState {
    fn active_cell(&self) -> Option<CellAddress> {
        self.active
    }

    fn data_length(&self) -> usize {
        self.case_count
    }

    fn column_count(&self) -> usize {
        self.column_count
    }

    fn cell_from_event(&self, event: &PointerEvent) -> Option<CellAddress> {
        self.cell_at_point(event.client_x - self.origin_x, event.client_y - self.origin_y)
    }

    fn cell_at_point(&self, x: f32, y: f32) -> Option<CellAddress> {
        if y < 0.0 || x < -INDEX_COLUMN_WIDTH {
            return None;
        }
        let row = (y / self.row_height) as usize;
        if row >= self.case_count {
            return None;
        }
        // Hits on the row-index column count as the first data cell.
        let column = if x < 0.0 {
            0
        } else {
            (x / DATA_COLUMN_WIDTH) as usize
        };
        if column >= self.column_count {
            return None;
        }
        Some(CellAddress::new(row, column))
    }

    fn cell_box(&self, address: CellAddress) -> Option<CellBox> {
        if address.row >= self.case_count || address.cell >= self.column_count {
            return None;
        }
        Some(CellBox {
            top: address.row as f32 * self.row_height,
            bottom: (address.row + 1) as f32 * self.row_height,
            left: address.cell as f32 * DATA_COLUMN_WIDTH,
            right: (address.cell + 1) as f32 * DATA_COLUMN_WIDTH,
        })
    }

    fn can_cell_be_active(&self, address: CellAddress) -> bool {
        address.row < self.case_count && address.cell < self.column_count
    }

    fn set_active_cell(&mut self, address: CellAddress) {
        self.active = Some(address);
    }

    fn scroll_row_into_view(&mut self, row: usize) {
        self.pending_scroll = Some(row);
    }

    fn options(&self) -> GridOptions {
        GridOptions {
            multi_select: self.multi_select,
        }
    }
}

/// One frame of pointer state over the table surface, as egui reports it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub position: Option<(f32, f32)>,
    pub press_position: Option<(f32, f32)>,
    pub clicked: bool,
    pub drag_started: bool,
    pub dragged: bool,
    pub drag_stopped: bool,
    pub modifiers: Modifiers,
}

/// Turn egui's click/drag classification into the grid input stream, in
/// dispatch order.
pub fn translate_pointer(sample: &PointerSample) -> Vec<GridInputEvent> {
    let at = |position: Option<(f32, f32)>| {
        position.map(|(x, y)| PointerEvent::new(x, y, sample.modifiers))
    };

    let mut events = Vec::new();
    if sample.drag_started {
        if let Some(press) = at(sample.press_position.or(sample.position)) {
            events.push(GridInputEvent::DragInit(press));
            events.push(GridInputEvent::DragStart(press));
        }
    } else if sample.dragged {
        if let Some(current) = at(sample.position) {
            events.push(GridInputEvent::DragMove(current));
        }
    }
    if sample.drag_stopped {
        if let Some(last) = at(sample.position.or(sample.press_position)) {
            events.push(GridInputEvent::DragEnd(last));
        }
    }
    if sample.clicked {
        if let Some(click) = at(sample.position) {
            events.push(GridInputEvent::Click(click));
        }
    }
    events
}
