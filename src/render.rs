use std::time::Instant;

use chroma_life::{Cell, EditMode, Rect, Rgb, Session};
use egui::{Color32, Pos2, Rounding, Stroke};

const DEAD_COLOR: Color32 = Color32::from_rgb(0x1a, 0x1e, 0x24);
const GRID_LINE_COLOR: Color32 = Color32::from_rgb(0x3a, 0x3f, 0x4a);
const SELECTION_COLOR: Color32 = Color32::from_rgb(0xf5, 0xd0, 0x42);
const BOARD_MARGIN: f32 = 8.0;

/// Widget state owned by the side panel, not by the session.
pub struct Controls {
    pub board_path: String,
    pub width: usize,
    pub height: usize,
    pub status: Option<String>,
}

impl Controls {
    pub fn new(session: &Session) -> Self {
        let (width, height) = session.grid().dimensions();
        Self {
            board_path: "board.txt".to_string(),
            width,
            height,
            status: None,
        }
    }
}

fn to_color32(color: Rgb) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

fn cell_rect(origin: Pos2, cell_size: f32, row: usize, col: usize) -> egui::Rect {
    let min = origin + egui::vec2(col as f32 * cell_size, row as f32 * cell_size);
    egui::Rect::from_min_size(min, egui::vec2(cell_size, cell_size))
}

/// Paints the board into the background layer, below every panel, and returns
/// its top-left corner in points. Pointer input is mapped relative to it.
pub fn draw_board(ctx: &egui::Context, session: &Session) -> Pos2 {
    let origin = ctx.available_rect().min + egui::vec2(BOARD_MARGIN, BOARD_MARGIN);
    let painter = ctx.layer_painter(egui::LayerId::background());
    let cell_size = session.settings().cell_size;
    let (width, height) = session.grid().dimensions();
    let board = egui::Rect::from_min_size(
        origin,
        egui::vec2(width as f32 * cell_size, height as f32 * cell_size),
    );

    painter.rect_filled(board, Rounding::ZERO, DEAD_COLOR);
    for (row, cells) in session.grid().rows().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if let Cell::Alive(color) = cell {
                painter.rect_filled(
                    cell_rect(origin, cell_size, row, col),
                    Rounding::ZERO,
                    to_color32(*color),
                );
            }
        }
    }

    // Grid lines get in the way when cells are tiny.
    if cell_size >= 4.0 {
        let stroke = Stroke::new(0.5, GRID_LINE_COLOR);
        for col in 0..=width {
            let x = board.min.x + col as f32 * cell_size;
            painter.line_segment([Pos2::new(x, board.min.y), Pos2::new(x, board.max.y)], stroke);
        }
        for row in 0..=height {
            let y = board.min.y + row as f32 * cell_size;
            painter.line_segment([Pos2::new(board.min.x, y), Pos2::new(board.max.x, y)], stroke);
        }
    }

    if let Some(selection) = session.selection_preview() {
        draw_selection(&painter, origin, cell_size, selection);
    }

    origin
}

fn draw_selection(painter: &egui::Painter, origin: Pos2, cell_size: f32, selection: Rect) {
    let min = cell_rect(origin, cell_size, selection.top_left.row, selection.top_left.col).min;
    let max = cell_rect(
        origin,
        cell_size,
        selection.bottom_right.row,
        selection.bottom_right.col,
    )
    .max;
    let rect = egui::Rect::from_min_max(min, max);
    painter.rect_filled(rect, Rounding::ZERO, SELECTION_COLOR.gamma_multiply(0.15));
    painter.rect_stroke(rect, Rounding::ZERO, Stroke::new(1.5, SELECTION_COLOR));
}

pub fn draw_controls(ctx: &egui::Context, session: &mut Session, controls: &mut Controls) {
    let now = Instant::now();

    egui::SidePanel::left("controls")
        .resizable(false)
        .default_width(240.0)
        .show(ctx, |ui| {
            ui.heading("Simulation");
            ui.horizontal(|ui| {
                let label = if session.is_running() { "Pause" } else { "Start" };
                if ui.button(label).clicked() {
                    session.toggle_running(now);
                }
                if ui.button("Step").clicked() {
                    session.step();
                }
                if ui.button("Reset").clicked() {
                    session.reset();
                }
            });

            let mut period = session.settings().tick_period_ms;
            if ui
                .add(
                    egui::Slider::new(&mut period, 10..=2_000)
                        .logarithmic(true)
                        .text("ms / generation"),
                )
                .changed()
            {
                session.set_tick_period(period, now);
            }

            ui.separator();
            ui.heading("Editing");
            ui.horizontal_wrapped(|ui| {
                for mode in EditMode::ALL {
                    if ui
                        .selectable_label(session.mode() == mode, mode.name())
                        .clicked()
                    {
                        session.set_mode(mode);
                    }
                }
            });

            let color = session.settings().draw_color;
            let mut rgb = [color.r, color.g, color.b];
            ui.horizontal(|ui| {
                ui.label("Drawing color");
                if ui.color_edit_button_srgb(&mut rgb).changed() {
                    session.set_draw_color(Rgb::new(rgb[0], rgb[1], rgb[2]));
                }
            });

            let mut cell_size = session.settings().cell_size;
            if ui
                .add(egui::Slider::new(&mut cell_size, 2.0..=40.0).text("Cell size"))
                .changed()
            {
                session.set_cell_size(cell_size);
            }

            ui.separator();
            ui.heading("Mutation");
            let mut hue_sat = session.settings().hue_sat_speed;
            let mut lightness = session.settings().lightness_speed;
            let a = ui.add(egui::Slider::new(&mut hue_sat, 0.0..=50.0).text("Hue / saturation"));
            let b = ui.add(egui::Slider::new(&mut lightness, 0.0..=50.0).text("Lightness"));
            if a.changed() || b.changed() {
                session.set_mutation_speeds(hue_sat, lightness);
            }

            ui.separator();
            ui.heading("Board");
            ui.horizontal(|ui| {
                ui.add(egui::DragValue::new(&mut controls.width).clamp_range(10..=200));
                ui.label("x");
                ui.add(egui::DragValue::new(&mut controls.height).clamp_range(10..=200));
                if ui
                    .button("Resize")
                    .on_hover_text("Clears the board and the clipboard")
                    .clicked()
                {
                    session.resize(controls.width, controls.height);
                    controls.status = None;
                }
            });

            ui.text_edit_singleline(&mut controls.board_path);
            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    controls.status = Some(match session.save_board_file(&controls.board_path) {
                        Ok(()) => format!("Saved {}", controls.board_path),
                        Err(err) => {
                            log::error!("Saving {} failed: {err}", controls.board_path);
                            format!("Save failed: {err}")
                        }
                    });
                }
                if ui.button("Load").clicked() {
                    controls.status = Some(match session.load_board_file(&controls.board_path) {
                        Ok(()) => {
                            let (width, height) = session.grid().dimensions();
                            controls.width = width;
                            controls.height = height;
                            format!("Loaded {}", controls.board_path)
                        }
                        Err(err) => {
                            log::error!("Loading {} failed: {err}", controls.board_path);
                            format!("Load failed: {err}")
                        }
                    });
                }
            });
            if let Some(status) = &controls.status {
                ui.label(status);
            }

            ui.separator();
            let (width, height) = session.grid().dimensions();
            ui.label(format!("Grid: {width}x{height}"));
            ui.label(format!("Generation: {}", session.generation()));
            ui.label(format!("Live cells: {}", session.live_cells()));
            ui.label(match session.clipboard().block() {
                Some(block) => {
                    let (w, h) = block.dimensions();
                    format!("Clipboard: {w}x{h}")
                }
                None => "Clipboard: empty".to_string(),
            });
            if let Some(selection) = session.selection_preview() {
                ui.label(format!(
                    "Selection: {}x{}",
                    selection.width(),
                    selection.height()
                ));
            }
        });
}
