use std::cell::RefCell;
use std::rc::Rc;

use arboard::Clipboard;
use caseset::CaseSet;
use eframe::egui;
use egui::Color32;
use grid_core::{
    CellAddress, EventDisposition, GridInputEvent, GridKey, GridSurface, Modifiers, PointerEvent,
};
use row_selection::{RowSelectionController, SelectionOptions};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Settings;
use crate::ui::table::{
    translate_pointer, PointerSample, TableState, DATA_COLUMN_WIDTH, INDEX_COLUMN_WIDTH,
};

pub const SETTINGS_STORAGE_KEY: &str = "explorer.settings";

const MIN_ROW_HEIGHT: f32 = 16.0;
const MAX_ROW_HEIGHT: f32 = 48.0;
const HEADER_HEIGHT: f32 = 22.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedExplorerSettings {
    row_shading: bool,
    row_height: f32,
}

impl Default for PersistedExplorerSettings {
    fn default() -> Self {
        Self {
            row_shading: true,
            row_height: 24.0,
        }
    }
}

impl PersistedExplorerSettings {
    fn into_runtime(self) -> (bool, f32) {
        (
            self.row_shading,
            self.row_height.clamp(MIN_ROW_HEIGHT, MAX_ROW_HEIGHT),
        )
    }

    fn from_runtime(row_shading: bool, row_height: f32) -> Self {
        Self {
            row_shading,
            row_height,
        }
    }
}

type SharedCases = Rc<RefCell<CaseSet>>;
type SharedTable = Rc<RefCell<TableState>>;

pub struct ExplorerApp {
    cases: SharedCases,
    table: SharedTable,
    controller: RowSelectionController<SharedTable, SharedCases>,
    status: Rc<RefCell<String>>,
    row_shading: bool,
    row_height_pref: f32,
}

impl ExplorerApp {
    pub fn new(
        settings: Settings,
        persisted: Option<PersistedExplorerSettings>,
    ) -> anyhow::Result<Self> {
        let (row_shading, row_height) = persisted
            .map(PersistedExplorerSettings::into_runtime)
            .unwrap_or((true, settings.row_height));

        let cases: SharedCases = Rc::new(RefCell::new(CaseSet::sample(settings.sample_case_count)));
        let (case_count, column_count) = {
            let cases = cases.borrow();
            (cases.case_count(), cases.attributes().len())
        };
        let table: SharedTable = Rc::new(RefCell::new(TableState::new(
            case_count,
            column_count,
            row_height,
            settings.multi_select,
        )));

        let mut controller = RowSelectionController::new(
            SelectionOptions {
                rebind: settings.rebind_policy,
            },
            Rc::clone(&cases),
        );
        controller.bind(Rc::clone(&table))?;

        let status = Rc::new(RefCell::new(String::new()));
        let listener_status = Rc::clone(&status);
        controller.on_ranges_changed(move |ranges| {
            *listener_status.borrow_mut() = format!("selection updated ({} ranges)", ranges.len());
        });

        info!(cases = case_count, "case explorer ready");
        Ok(Self {
            cases,
            table,
            controller,
            status,
            row_shading,
            row_height_pref: row_height,
        })
    }

    fn handle_keyboard(&mut self, ctx: &egui::Context) {
        let (up, down, raw_modifiers) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::ArrowUp),
                i.key_pressed(egui::Key::ArrowDown),
                i.modifiers,
            )
        });
        if !up && !down {
            return;
        }
        let key = if down {
            GridKey::ArrowDown
        } else {
            GridKey::ArrowUp
        };
        let modifiers = translate_modifiers(raw_modifiers);
        let disposition = self.controller.dispatch(GridInputEvent::KeyDown { key, modifiers });
        if disposition == EventDisposition::Propagate && modifiers == Modifiers::NONE {
            self.move_active_row(if down { 1 } else { -1 });
        }
    }

    // Plain arrow navigation stays with the app; selection handling only
    // claims the shift-extend chord.
    fn move_active_row(&mut self, delta: i64) {
        let mut table = self.table.borrow_mut();
        let Some(active) = table.active_cell() else {
            return;
        };
        let target = active.row as i64 + delta;
        if target < 0 || target >= table.data_length() as i64 {
            return;
        }
        let address = CellAddress::new(target as usize, active.cell);
        table.set_active_cell(address);
        table.scroll_row_into_view(address.row);
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context) {
        let previous_row_height = self.row_height_pref;
        egui::TopBottomPanel::top("explorer_menu_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.menu_button("Edit", |ui| {
                    if ui.button("Select All").clicked() {
                        self.select_all();
                    }
                    if ui.button("Clear Selection").clicked() {
                        self.clear_selection();
                    }
                    ui.separator();
                    if ui.button("Copy Selected Cases").clicked() {
                        self.copy_selected();
                    }
                });
                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.row_shading, "Row shading");
                    ui.add(
                        egui::Slider::new(&mut self.row_height_pref, MIN_ROW_HEIGHT..=MAX_ROW_HEIGHT)
                            .text("Row height"),
                    );
                });
            });
        });
        if (self.row_height_pref - previous_row_height).abs() > f32::EPSILON {
            self.table.borrow_mut().set_row_height(self.row_height_pref);
        }
    }

    fn select_all(&mut self) {
        let rows = {
            let mut cases = self.cases.borrow_mut();
            cases.select_all();
            cases.selected_rows()
        };
        self.controller.set_selected_rows(&rows);
    }

    fn clear_selection(&mut self) {
        self.cases.borrow_mut().clear_selection();
        self.controller.set_selected_rows(&[]);
    }

    fn copy_selected(&mut self) {
        let (tsv, count) = {
            let cases = self.cases.borrow();
            (cases.selected_rows_as_tsv(), cases.selected_count())
        };
        if let Ok(mut clipboard) = Clipboard::new() {
            let _ = clipboard.set_text(tsv);
            debug!("copied {count} selected cases to the clipboard");
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("explorer_status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (selected, total) = {
                    let cases = self.cases.borrow();
                    (cases.selected_count(), cases.case_count())
                };
                ui.label(selection_summary(selected, total));
                let status = self.status.borrow();
                if !status.is_empty() {
                    ui.separator();
                    ui.label(status.as_str());
                }
            });
        });
    }

    fn show_case_table(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_header_row(ui);

            let scroll_target = self.table.borrow_mut().take_scroll_target();
            let row_height = self.table.borrow().row_height();
            let mut scroll_area = egui::ScrollArea::vertical()
                .id_salt("case_table_scroll")
                .auto_shrink([false, false])
                .drag_to_scroll(false);
            if let Some(offset) = scroll_target {
                scroll_area = scroll_area.vertical_scroll_offset(offset);
            }

            let output = scroll_area.show(ui, |ui| {
                let origin = ui.cursor().min;
                let case_count = self.cases.borrow().case_count();
                for row in 0..case_count {
                    self.render_case_row(ui, row, row_height);
                }
                origin
            });

            let origin = output.inner;
            self.table.borrow_mut().set_frame(
                origin.x + INDEX_COLUMN_WIDTH,
                origin.y,
                output.state.offset.y,
                output.inner_rect.height(),
            );

            let surface = ui.interact(
                output.inner_rect,
                ui.id().with("case_table_surface"),
                egui::Sense::click_and_drag(),
            );
            self.forward_pointer(ctx, &surface);
        });
    }

    fn show_header_row(&self, ui: &mut egui::Ui) {
        let desired = egui::vec2(ui.available_width(), HEADER_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
        let visuals = ui.visuals().clone();
        ui.painter()
            .rect_filled(rect, egui::CornerRadius::ZERO, visuals.extreme_bg_color);
        ui.painter().text(
            egui::pos2(rect.left() + 6.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            "#",
            egui::FontId::proportional(12.0),
            visuals.weak_text_color(),
        );
        let cases = self.cases.borrow();
        for (column, attribute) in cases.attributes().iter().enumerate() {
            let left = rect.left() + INDEX_COLUMN_WIDTH + column as f32 * DATA_COLUMN_WIDTH;
            ui.painter().text(
                egui::pos2(left + 6.0, rect.center().y),
                egui::Align2::LEFT_CENTER,
                attribute,
                egui::FontId::proportional(12.5),
                visuals.strong_text_color(),
            );
        }
        ui.add_space(2.0);
    }

    fn render_case_row(&self, ui: &mut egui::Ui, row: usize, row_height: f32) {
        let desired = egui::vec2(ui.available_width(), row_height);
        let (row_rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
        if !ui.is_rect_visible(row_rect) {
            return;
        }

        let cases = self.cases.borrow();
        let is_selected = cases.is_selected(row);
        let visuals = ui.visuals().clone();
        let row_fill = if is_selected {
            visuals.selection.bg_fill
        } else if self.row_shading && row % 2 == 1 {
            visuals.faint_bg_color
        } else {
            Color32::TRANSPARENT
        };
        if row_fill != Color32::TRANSPARENT {
            ui.painter()
                .rect_filled(row_rect, egui::CornerRadius::ZERO, row_fill);
        }

        ui.painter().text(
            egui::pos2(row_rect.left() + 6.0, row_rect.center().y),
            egui::Align2::LEFT_CENTER,
            (row + 1).to_string(),
            egui::FontId::proportional(12.0),
            visuals.weak_text_color(),
        );
        let text_color = if is_selected {
            visuals.strong_text_color()
        } else {
            visuals.text_color()
        };
        for column in 0..cases.attributes().len() {
            if let Some(value) = cases.value(row, column) {
                let left = row_rect.left() + INDEX_COLUMN_WIDTH + column as f32 * DATA_COLUMN_WIDTH;
                ui.painter().text(
                    egui::pos2(left + 6.0, row_rect.center().y),
                    egui::Align2::LEFT_CENTER,
                    value,
                    egui::FontId::proportional(13.0),
                    text_color,
                );
            }
        }

        if let Some(active) = self.table.borrow().active_cell() {
            if active.row == row {
                let left =
                    row_rect.left() + INDEX_COLUMN_WIDTH + active.cell as f32 * DATA_COLUMN_WIDTH;
                let cell_rect = egui::Rect::from_min_size(
                    egui::pos2(left, row_rect.top()),
                    egui::vec2(DATA_COLUMN_WIDTH, row_height),
                );
                ui.painter().rect_stroke(
                    cell_rect,
                    egui::CornerRadius::ZERO,
                    egui::Stroke::new(1.5, visuals.selection.stroke.color),
                    egui::StrokeKind::Inside,
                );
            }
        }
    }

    fn forward_pointer(&mut self, ctx: &egui::Context, response: &egui::Response) {
        let to_pair = |pos: egui::Pos2| (pos.x, pos.y);
        let sample = PointerSample {
            position: response.interact_pointer_pos().map(to_pair),
            press_position: ctx.input(|i| i.pointer.press_origin()).map(to_pair),
            clicked: response.clicked(),
            drag_started: response.drag_started(),
            dragged: response.dragged(),
            drag_stopped: response.drag_stopped(),
            modifiers: translate_modifiers(ctx.input(|i| i.modifiers)),
        };

        for event in translate_pointer(&sample) {
            let disposition = self.controller.dispatch(event);
            if let (GridInputEvent::Click(pointer), EventDisposition::Propagate) =
                (event, disposition)
            {
                self.focus_cell_under(pointer);
            }
        }
    }

    fn focus_cell_under(&mut self, pointer: PointerEvent) {
        let mut table = self.table.borrow_mut();
        if let Some(cell) = table.cell_from_event(&pointer) {
            table.set_active_cell(cell);
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keyboard(ctx);
        self.show_menu_bar(ctx);
        self.show_status_bar(ctx);
        self.show_case_table(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let settings =
            PersistedExplorerSettings::from_runtime(self.row_shading, self.row_height_pref);
        if let Ok(serialized) = serde_json::to_string(&settings) {
            storage.set_string(SETTINGS_STORAGE_KEY, serialized);
        }
    }
}

fn translate_modifiers(modifiers: egui::Modifiers) -> Modifiers {
    Modifiers {
        shift: modifiers.shift,
        ctrl: modifiers.ctrl,
        alt: modifiers.alt,
        meta: modifiers.mac_cmd,
    }
}

fn selection_summary(selected: usize, total: usize) -> String {
    if selected == 0 {
        format!("{total} cases, none selected")
    } else {
        format!("{selected} of {total} cases selected")
    }
}
