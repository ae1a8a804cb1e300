//! Interactive editing: the five edit modes and the pointer protocol.
//!
//! Create and Destroy paint while the pointer is held down. Copy and Recolor
//! use a two-click rectangular selection: the first click anchors the
//! rectangle, pointer moves update its live corner, the second click applies
//! the action. Paste stamps the clipboard with its top-left at the click.
//!
//! Pointer coordinates are signed cell coordinates and may lie outside the grid.

use std::fmt;
use std::str::FromStr;

use crate::clipboard::Clipboard;
use crate::color::Rgb;
use crate::error::{Result, SandboxError};
use crate::grid::{Cell, Grid, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    #[default]
    Create,
    Destroy,
    Copy,
    Paste,
    Recolor,
}

impl EditMode {
    pub const ALL: [EditMode; 5] = [
        EditMode::Create,
        EditMode::Destroy,
        EditMode::Copy,
        EditMode::Paste,
        EditMode::Recolor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            EditMode::Create => "create",
            EditMode::Destroy => "destroy",
            EditMode::Copy => "copy",
            EditMode::Paste => "paste",
            EditMode::Recolor => "recolor",
        }
    }

    /// Modes driven by the two-click rectangle selection.
    pub fn selects(self) -> bool {
        matches!(self, EditMode::Copy | EditMode::Recolor)
    }

    /// Modes that paint while dragging.
    pub fn draws(self) -> bool {
        matches!(self, EditMode::Create | EditMode::Destroy)
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EditMode {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self> {
        EditMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s.trim())
            .ok_or_else(|| SandboxError::InvalidMode(s.to_string()))
    }
}

/// Progress of a two-click selection. `corner` is the live preview corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Awaiting { anchor: Point, corner: Point },
}

/// Converts pixel coordinates to signed (row, col) cell coordinates.
pub fn pixel_to_cell(x: f64, y: f64, cell_size: f64) -> (i64, i64) {
    let cell_size = cell_size.max(f64::EPSILON);
    ((y / cell_size).floor() as i64, (x / cell_size).floor() as i64)
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    selection: SelectionState,
    /// `Some` while a Create/Destroy drag is in progress, holding the last cell touched.
    drag: Option<(i64, i64)>,
    draw_color: Rgb,
}

impl EditSession {
    pub fn new(draw_color: Rgb) -> Self {
        Self {
            mode: EditMode::default(),
            selection: SelectionState::Idle,
            drag: None,
            draw_color,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn is_drawing(&self) -> bool {
        self.drag.is_some()
    }

    pub fn draw_color(&self) -> Rgb {
        self.draw_color
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    /// The rectangle between the anchor and the live corner, for preview overlays.
    pub fn selection_rect(&self) -> Option<Rect> {
        match self.selection {
            SelectionState::Awaiting { anchor, corner } => Some(Rect::from_corners(anchor, corner)),
            SelectionState::Idle => None,
        }
    }

    /// Switches mode, dropping any pending selection and drag. The clipboard is
    /// left alone.
    pub fn set_mode(&mut self, mode: EditMode) {
        if self.selection != SelectionState::Idle {
            log::debug!("Discarding pending {} selection", self.mode);
        }
        self.mode = mode;
        self.reset_transient();
        log::info!("Editing mode set to {mode}");
    }

    pub fn set_mode_by_name(&mut self, name: &str) -> Result<()> {
        let mode = name.parse()?;
        self.set_mode(mode);
        Ok(())
    }

    /// Forgets the in-progress drag and selection.
    pub fn reset_transient(&mut self) {
        self.selection = SelectionState::Idle;
        self.drag = None;
    }

    /// Handles a button press at (row, col). Returns whether the grid changed.
    pub fn pointer_down(
        &mut self,
        grid: &mut Grid,
        clipboard: &mut Clipboard,
        row: i64,
        col: i64,
    ) -> Result<bool> {
        match self.mode {
            EditMode::Create | EditMode::Destroy => {
                self.drag = Some((row, col));
                match grid.point_at(row, col) {
                    Some(p) => self.paint(grid, p),
                    None => Ok(false),
                }
            }
            EditMode::Copy | EditMode::Recolor => match self.selection {
                SelectionState::Idle => {
                    if let Some(anchor) = grid.point_at(row, col) {
                        self.selection = SelectionState::Awaiting {
                            anchor,
                            corner: anchor,
                        };
                    }
                    Ok(false)
                }
                SelectionState::Awaiting { anchor, .. } => {
                    let rect = Rect::from_corners(anchor, grid.clamp_point(row, col));
                    self.selection = SelectionState::Idle;
                    if self.mode == EditMode::Copy {
                        clipboard.copy(grid, rect);
                        Ok(false)
                    } else {
                        self.recolor(grid, rect)
                    }
                }
            },
            EditMode::Paste => {
                let Some(target) = grid.point_at(row, col) else {
                    return Ok(false);
                };
                clipboard.paste(grid, target)?;
                log::debug!("Pasted clipboard at ({}, {})", target.row, target.col);
                Ok(true)
            }
        }
    }

    /// Handles pointer motion. Returns whether the grid changed.
    pub fn pointer_move(&mut self, grid: &mut Grid, row: i64, col: i64) -> Result<bool> {
        if let SelectionState::Awaiting { anchor, .. } = self.selection {
            self.selection = SelectionState::Awaiting {
                anchor,
                corner: grid.clamp_point(row, col),
            };
            return Ok(false);
        }

        let Some(last) = self.drag else {
            return Ok(false);
        };
        if last == (row, col) {
            return Ok(false);
        }
        match grid.point_at(row, col) {
            Some(p) => {
                self.drag = Some((row, col));
                self.paint(grid, p)
            }
            None => {
                // Leaving the grid ends the drag; painted cells stay.
                self.drag = None;
                Ok(false)
            }
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    /// The pointer left the board. Ends a drag but keeps a pending selection.
    pub fn pointer_left(&mut self) {
        self.drag = None;
    }

    fn paint(&self, grid: &mut Grid, p: Point) -> Result<bool> {
        let cell = match self.mode {
            EditMode::Destroy => Cell::Empty,
            _ => Cell::Alive(self.draw_color),
        };
        let changed = grid.get(p.row, p.col) != Some(cell);
        grid.set(p.row, p.col, cell)?;
        Ok(changed)
    }

    /// Repaints the live cells of `rect` with the drawing color. Empty cells stay empty.
    fn recolor(&self, grid: &mut Grid, rect: Rect) -> Result<bool> {
        let mut changed = 0usize;
        for p in rect.points() {
            if let Some(Cell::Alive(color)) = grid.get(p.row, p.col) {
                if color != self.draw_color {
                    grid.set(p.row, p.col, Cell::Alive(self.draw_color))?;
                    changed += 1;
                }
            }
        }
        log::debug!(
            "Recolored {changed} cells in {}x{} selection",
            rect.width(),
            rect.height()
        );
        Ok(changed > 0)
    }
}
