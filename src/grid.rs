//! The cell matrix.
//!
//! A [`Grid`] is always fully rectangular: `width * height` cells stored row-major.
//! Callers only ever get copies of cells back, so every write goes through the
//! bounds-checked [`Grid::set`].

use crate::color::Rgb;
use crate::error::{Result, SandboxError};

pub const MIN_DIMENSION: usize = 10;
pub const MAX_DIMENSION: usize = 200;

/// One grid position. Aliveness and color are the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Alive(Rgb),
}

impl Cell {
    pub fn is_alive(&self) -> bool {
        matches!(self, Cell::Alive(_))
    }

    pub fn color(&self) -> Option<Rgb> {
        match self {
            Cell::Alive(color) => Some(*color),
            Cell::Empty => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub row: usize,
    pub col: usize,
}

impl Point {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Axis-aligned, inclusive on both corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rect {
    /// The order of the two corners does not matter.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            top_left: Point::new(a.row.min(b.row), a.col.min(b.col)),
            bottom_right: Point::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn width(&self) -> usize {
        self.bottom_right.col - self.top_left.col + 1
    }

    pub fn height(&self) -> usize {
        self.bottom_right.row - self.top_left.row + 1
    }

    pub fn contains(&self, p: Point) -> bool {
        (self.top_left.row..=self.bottom_right.row).contains(&p.row)
            && (self.top_left.col..=self.bottom_right.col).contains(&p.col)
    }

    /// All points in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.top_left.row..=self.bottom_right.row).flat_map(move |row| {
            (self.top_left.col..=self.bottom_right.col).map(move |col| Point::new(row, col))
        })
    }
}

pub fn clamp_dimension(value: usize) -> usize {
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// An all-empty grid. Both dimensions are clamped into
    /// `[MIN_DIMENSION, MAX_DIMENSION]`.
    pub fn new(width: usize, height: usize) -> Self {
        Self::blank(clamp_dimension(width), clamp_dimension(height))
    }

    /// An all-empty grid with exact dimensions (at least 1x1).
    pub(crate) fn blank(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    /// Builds a grid from rows that must all be exactly `width` long.
    pub(crate) fn from_rows(width: usize, rows: Vec<Vec<Cell>>) -> Self {
        let height = rows.len();
        debug_assert!(rows.iter().all(|r| r.len() == width));
        Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    /// Signed variant used by pointer handling, where coordinates may lie off-grid.
    pub fn point_at(&self, row: i64, col: i64) -> Option<Point> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.contains(row, col).then(|| Point::new(row, col))
    }

    /// Nearest in-grid point to a possibly off-grid coordinate.
    pub fn clamp_point(&self, row: i64, col: i64) -> Point {
        let clamp = |v: i64, len: usize| v.clamp(0, len as i64 - 1) as usize;
        Point::new(clamp(row, self.height), clamp(col, self.width))
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// `None` when the position is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        self.contains(row, col)
            .then(|| self.cells[self.index(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<()> {
        if !self.contains(row, col) {
            return Err(SandboxError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(row, col);
        self.cells[idx] = cell;
        Ok(())
    }

    /// Replaces the grid with an empty one of the clamped size. The previous
    /// pattern is discarded, even when the dimensions do not change.
    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    /// Empties every cell, keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(MIN_DIMENSION, MIN_DIMENSION)
    }
}
