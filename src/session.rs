//! One independent sandbox: grid, clipboard, editor, settings and clock.
//!
//! All mutation goes through [`Session`]. Recoverable errors (bad mode names,
//! empty clipboard, out-of-range pastes, edits while running) are logged as
//! warnings and reported as "nothing changed"; board and file errors are
//! returned to the caller with the session left as it was.

use std::path::Path;
use std::time::Instant;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board;
use crate::clipboard::Clipboard;
use crate::clock::SimulationClock;
use crate::color::Rgb;
use crate::config::Settings;
use crate::edit::{pixel_to_cell, EditMode, EditSession};
use crate::error::{Result, SandboxError};
use crate::grid::{Grid, Rect};
use crate::rules::{self, GameRules};

pub struct Session {
    grid: Grid,
    clipboard: Clipboard,
    editor: EditSession,
    settings: Settings,
    clock: SimulationClock,
    rules: GameRules,
    rng: SmallRng,
    generation: u64,
}

fn warn_on_error(result: Result<bool>) -> bool {
    match result {
        Ok(changed) => changed,
        Err(err) if err.is_recoverable() => {
            log::warn!("{err}");
            false
        }
        Err(err) => {
            log::error!("{err}");
            false
        }
    }
}

impl Session {
    pub fn new(settings: Settings) -> Self {
        let settings = settings.normalized();
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::seed_from_u64(rand::random()),
        };
        log::info!(
            "New {}x{} session, {} ms per generation",
            settings.grid_width,
            settings.grid_height,
            settings.tick_period_ms
        );
        Self {
            grid: Grid::new(settings.grid_width, settings.grid_height),
            clipboard: Clipboard::new(),
            editor: EditSession::new(settings.draw_color),
            clock: SimulationClock::new(settings.tick_period_ms),
            rules: GameRules::default(),
            rng,
            generation: 0,
            settings,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    pub fn editor(&self) -> &EditSession {
        &self.editor
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cells(&self) -> usize {
        self.grid.live_count()
    }

    pub fn mode(&self) -> EditMode {
        self.editor.mode()
    }

    pub fn selection_preview(&self) -> Option<Rect> {
        self.editor.selection_rect()
    }

    // --- Simulation ---

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn start(&mut self, now: Instant) {
        self.editor.reset_transient();
        self.clock.start(now);
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn toggle_running(&mut self, now: Instant) {
        if self.is_running() {
            self.pause();
        } else {
            self.start(now);
        }
    }

    /// Pauses if running, then advances exactly one generation.
    pub fn step(&mut self) {
        self.pause();
        self.advance();
    }

    /// Advances one generation if the clock says one is due. Returns whether it did.
    pub fn update(&mut self, now: Instant) -> bool {
        if self.clock.poll(now) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn set_tick_period(&mut self, ms: u64, now: Instant) {
        self.settings.set_tick_period_ms(ms);
        self.clock.set_period(self.settings.tick_period_ms, now);
    }

    fn advance(&mut self) {
        self.grid = rules::advance(
            &self.grid,
            &self.rules,
            self.settings.mutation_speeds(),
            &mut self.rng,
        );
        self.generation += 1;
        log::trace!(
            "Generation {}: {} live cells",
            self.generation,
            self.grid.live_count()
        );
    }

    // --- Board lifecycle ---

    fn discard_transient(&mut self) {
        self.clipboard.invalidate();
        self.editor.reset_transient();
        self.generation = 0;
    }

    /// Stops the simulation and empties the board, keeping its size.
    pub fn reset(&mut self) {
        self.pause();
        self.grid.clear();
        self.discard_transient();
        log::info!("Board reset");
    }

    /// Replaces the board with an empty one of the clamped size. The current
    /// pattern and the clipboard are lost.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.settings.set_grid_size(width, height);
        self.grid
            .resize(self.settings.grid_width, self.settings.grid_height);
        self.discard_transient();
        log::info!(
            "Board resized to {}x{}",
            self.grid.width(),
            self.grid.height()
        );
    }

    /// Replaces the board with a decoded one. On error the session is unchanged.
    pub fn load_board(&mut self, text: &str) -> Result<()> {
        let grid = board::decode(text)?;
        self.install_board(grid);
        Ok(())
    }

    pub fn load_board_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let grid = board::read_file(path.as_ref())?;
        log::info!("Loaded board from {}", path.as_ref().display());
        self.install_board(grid);
        Ok(())
    }

    fn install_board(&mut self, grid: Grid) {
        self.pause();
        // A loaded board keeps its exact size, even below the resize minimum.
        (self.settings.grid_width, self.settings.grid_height) = grid.dimensions();
        self.grid = grid;
        self.discard_transient();
        log::info!(
            "Board loaded: {}x{}, {} live cells",
            self.grid.width(),
            self.grid.height(),
            self.grid.live_count()
        );
    }

    pub fn save_board(&self) -> String {
        board::encode(&self.grid)
    }

    pub fn save_board_file(&self, path: impl AsRef<Path>) -> Result<()> {
        board::write_file(&self.grid, path.as_ref())?;
        log::info!("Saved board to {}", path.as_ref().display());
        Ok(())
    }

    // --- Settings ---

    pub fn set_mode(&mut self, mode: EditMode) {
        self.editor.set_mode(mode);
    }

    /// Returns false, with a warning, for unknown mode names.
    pub fn set_mode_by_name(&mut self, name: &str) -> bool {
        match self.editor.set_mode_by_name(name) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.settings.set_draw_color(color);
        self.editor.set_draw_color(color);
    }

    pub fn set_draw_color_hex(&mut self, hex: &str) -> bool {
        match Rgb::from_hex(hex) {
            Ok(color) => {
                self.set_draw_color(color);
                true
            }
            Err(err) => {
                log::warn!("{err}");
                false
            }
        }
    }

    pub fn set_mutation_speeds(&mut self, hue_sat: f64, lightness: f64) {
        self.settings.set_hue_sat_speed(hue_sat);
        self.settings.set_lightness_speed(lightness);
    }

    pub fn set_cell_size(&mut self, size: f32) {
        self.settings.set_cell_size(size);
    }

    // --- Pointer input, in cell coordinates ---

    fn editing_allowed(&self) -> bool {
        if self.is_running() {
            log::warn!("{}", SandboxError::SimulationRunning);
            return false;
        }
        true
    }

    /// Returns whether the grid changed.
    pub fn pointer_down(&mut self, row: i64, col: i64) -> bool {
        if !self.editing_allowed() {
            return false;
        }
        warn_on_error(
            self.editor
                .pointer_down(&mut self.grid, &mut self.clipboard, row, col),
        )
    }

    pub fn pointer_move(&mut self, row: i64, col: i64) -> bool {
        if self.is_running() {
            return false;
        }
        warn_on_error(self.editor.pointer_move(&mut self.grid, row, col))
    }

    pub fn pointer_up(&mut self) {
        self.editor.pointer_up();
    }

    pub fn pointer_left(&mut self) {
        self.editor.pointer_left();
    }

    // --- Pointer input, in board pixels ---

    /// `(row, col)` of the cell under a pixel position relative to the board origin.
    pub fn cell_at(&self, x: f64, y: f64) -> (i64, i64) {
        pixel_to_cell(x, y, f64::from(self.settings.cell_size))
    }

    pub fn pointer_down_at(&mut self, x: f64, y: f64) -> bool {
        let (row, col) = self.cell_at(x, y);
        self.pointer_down(row, col)
    }

    pub fn pointer_move_at(&mut self, x: f64, y: f64) -> bool {
        let (row, col) = self.cell_at(x, y);
        self.pointer_move(row, col)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
