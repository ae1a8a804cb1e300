//! Color Game of Life sandbox engine.
//!
//! The grid evolves under the classic B3/S23 rules while every cell carries a
//! color. Newborn cells inherit the color of their parents, and when all parents
//! agree the color mutates in HSL space. On top of the simulation sits an
//! editing layer (paint, erase, copy/paste, recolor) and a plain-text board
//! format. [`Session`] ties it all together.

pub mod board;
pub mod clipboard;
pub mod clock;
pub mod color;
pub mod config;
pub mod edit;
pub mod error;
pub mod grid;
pub mod rules;
pub mod session;

pub use color::Rgb;
pub use config::Settings;
pub use edit::EditMode;
pub use error::{Result, SandboxError};
pub use grid::{Cell, Grid, Point, Rect};
pub use session::Session;
