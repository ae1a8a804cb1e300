//! User-facing settings.
//!
//! Settings can be read from and written to a JSON file. Every field has a
//! default, and every value is clamped into its valid range rather than
//! rejected, both by the setters and after loading a file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::clock::clamp_tick_ms;
use crate::color::{clamp_speed, MutationSpeeds, Rgb};
use crate::error::Result;
use crate::grid::clamp_dimension;

pub const MIN_CELL_SIZE: f32 = 2.0;
pub const MAX_CELL_SIZE: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Color of newly painted cells and target color of recoloring.
    pub draw_color: Rgb,
    /// Maximum hue and saturation drift of a mutated newborn, `0..=50`.
    pub hue_sat_speed: f64,
    /// Maximum lightness drift of a mutated newborn, `0..=50`.
    pub lightness_speed: f64,
    /// Grid width in cells, `10..=200`.
    pub grid_width: usize,
    /// Grid height in cells, `10..=200`.
    pub grid_height: usize,
    /// Milliseconds between generations while running.
    pub tick_period_ms: u64,
    /// On-screen size of one cell in pixels.
    pub cell_size: f32,
    /// Fixed seed for the mutation generator. Random when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            draw_color: Rgb::new(0x61, 0xda, 0xfb),
            hue_sat_speed: 10.0,
            lightness_speed: 5.0,
            grid_width: 70,
            grid_height: 50,
            tick_period_ms: 100,
            cell_size: 10.0,
            seed: None,
        }
    }
}

impl Settings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let settings: Settings = serde_json::from_str(&text)?;
        Ok(settings.normalized())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }

    /// Returns a copy with every field clamped into range.
    pub fn normalized(mut self) -> Self {
        self.set_hue_sat_speed(self.hue_sat_speed);
        self.set_lightness_speed(self.lightness_speed);
        self.set_grid_size(self.grid_width, self.grid_height);
        self.set_tick_period_ms(self.tick_period_ms);
        self.set_cell_size(self.cell_size);
        self
    }

    pub fn set_draw_color(&mut self, color: Rgb) {
        self.draw_color = color;
    }

    pub fn set_hue_sat_speed(&mut self, speed: f64) {
        self.hue_sat_speed = clamp_speed(speed);
    }

    pub fn set_lightness_speed(&mut self, speed: f64) {
        self.lightness_speed = clamp_speed(speed);
    }

    pub fn set_grid_size(&mut self, width: usize, height: usize) {
        self.grid_width = clamp_dimension(width);
        self.grid_height = clamp_dimension(height);
    }

    pub fn set_tick_period_ms(&mut self, ms: u64) {
        self.tick_period_ms = clamp_tick_ms(ms);
    }

    pub fn set_cell_size(&mut self, size: f32) {
        self.cell_size = if size.is_finite() {
            size.clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
        } else {
            Settings::default().cell_size
        };
    }

    pub fn mutation_speeds(&self) -> MutationSpeeds {
        MutationSpeeds::new(self.hue_sat_speed, self.lightness_speed)
    }
}
