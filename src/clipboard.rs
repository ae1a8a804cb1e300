//! Copy and paste buffer for rectangular blocks of cells.

use crate::error::{Result, SandboxError};
use crate::grid::{Cell, Grid, Point, Rect};

/// A copied rectangular block of cells, empties included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Block {
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.height && col < self.width).then(|| self.cells[row * self.width + col])
    }
}

/// Holds at most one block. Survives edit mode changes; only resize, load and
/// reset clear it.
#[derive(Debug, Clone, Default)]
pub struct Clipboard {
    buffer: Option<Block>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies `rect` out of `grid`, replacing any previous block. Parts of the
    /// rectangle that lie outside the grid are copied as empty cells.
    pub fn copy(&mut self, grid: &Grid, rect: Rect) {
        let cells = rect
            .points()
            .map(|p| grid.get(p.row, p.col).unwrap_or(Cell::Empty))
            .collect();
        let block = Block {
            width: rect.width(),
            height: rect.height(),
            cells,
        };
        log::debug!(
            "Copied {}x{} block from ({}, {})",
            block.width,
            block.height,
            rect.top_left.row,
            rect.top_left.col
        );
        self.buffer = Some(block);
    }

    /// Writes the block into `grid` with its top-left corner at `target`,
    /// overwriting live and empty cells alike. Nothing is written unless the
    /// whole block fits.
    pub fn paste(&self, grid: &mut Grid, target: Point) -> Result<()> {
        let block = self.buffer.as_ref().ok_or(SandboxError::EmptyClipboard)?;
        let (width, height) = grid.dimensions();

        if target.row + block.height > height || target.col + block.width > width {
            return Err(SandboxError::PasteOutOfBounds {
                row: target.row,
                col: target.col,
                block_width: block.width,
                block_height: block.height,
                width,
                height,
            });
        }

        for (i, cell) in block.cells.iter().enumerate() {
            let row = target.row + i / block.width;
            let col = target.col + i % block.width;
            grid.set(row, col, *cell)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_none()
    }

    pub fn block(&self) -> Option<&Block> {
        self.buffer.as_ref()
    }

    pub fn invalidate(&mut self) {
        if self.buffer.take().is_some() {
            log::debug!("Clipboard invalidated");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    const RED: Rgb = Rgb::new(0xff, 0, 0);
    const GREEN: Rgb = Rgb::new(0, 0xff, 0);

    fn rect(r0: usize, c0: usize, r1: usize, c1: usize) -> Rect {
        Rect::from_corners(Point::new(r0, c0), Point::new(r1, c1))
    }

    #[test]
    fn starts_empty_and_refuses_to_paste() {
        let clipboard = Clipboard::new();
        let mut grid = Grid::new(10, 10);
        assert!(clipboard.is_empty());
        assert!(matches!(
            clipboard.paste(&mut grid, Point::new(0, 0)),
            Err(SandboxError::EmptyClipboard)
        ));
    }

    #[test]
    fn copy_then_paste_in_place_reproduces_the_block() {
        let mut grid = Grid::new(10, 10);
        grid.set(3, 3, Cell::Alive(RED)).unwrap();
        grid.set(4, 5, Cell::Alive(GREEN)).unwrap();
        let original = grid.clone();

        let mut clipboard = Clipboard::new();
        clipboard.copy(&grid, rect(3, 3, 5, 5));
        assert_eq!(clipboard.block().unwrap().dimensions(), (3, 3));

        clipboard.paste(&mut grid, Point::new(3, 3)).unwrap();
        assert_eq!(grid, original);
    }

    #[test]
    fn paste_overwrites_with_empties() {
        let mut grid = Grid::new(10, 10);
        grid.set(0, 0, Cell::Alive(RED)).unwrap();
        for row in 5..7 {
            for col in 5..7 {
                grid.set(row, col, Cell::Alive(GREEN)).unwrap();
            }
        }

        let mut clipboard = Clipboard::new();
        clipboard.copy(&grid, rect(1, 1, 0, 0));
        clipboard.paste(&mut grid, Point::new(5, 5)).unwrap();

        assert_eq!(grid.get(5, 5), Some(Cell::Alive(RED)));
        assert_eq!(grid.get(5, 6), Some(Cell::Empty));
        assert_eq!(grid.get(6, 5), Some(Cell::Empty));
        assert_eq!(grid.get(6, 6), Some(Cell::Empty));
    }

    #[test]
    fn paste_past_the_edge_leaves_grid_untouched() {
        let mut grid = Grid::new(10, 10);
        grid.set(0, 0, Cell::Alive(RED)).unwrap();
        grid.set(9, 9, Cell::Alive(GREEN)).unwrap();
        let before = grid.clone();

        let mut clipboard = Clipboard::new();
        clipboard.copy(&grid, rect(0, 0, 2, 2));
        let err = clipboard.paste(&mut grid, Point::new(8, 0)).unwrap_err();
        assert!(matches!(err, SandboxError::PasteOutOfBounds { .. }));
        assert!(clipboard.paste(&mut grid, Point::new(0, 8)).is_err());
        assert_eq!(grid, before);

        // Exactly flush with the corner is fine.
        clipboard.paste(&mut grid, Point::new(7, 7)).unwrap();
        assert_eq!(grid.get(7, 7), Some(Cell::Alive(RED)));
    }

    #[test]
    fn copy_outside_the_grid_reads_empties() {
        let mut grid = Grid::new(10, 10);
        grid.set(9, 9, Cell::Alive(RED)).unwrap();
        let mut clipboard = Clipboard::new();
        clipboard.copy(&grid, rect(9, 9, 11, 11));

        let block = clipboard.block().unwrap();
        assert_eq!(block.dimensions(), (3, 3));
        assert_eq!(block.get(0, 0), Some(Cell::Alive(RED)));
        assert_eq!(block.get(2, 2), Some(Cell::Empty));
    }

    #[test]
    fn invalidate_clears_the_buffer() {
        let grid = Grid::new(10, 10);
        let mut clipboard = Clipboard::new();
        clipboard.copy(&grid, rect(0, 0, 1, 1));
        assert!(!clipboard.is_empty());
        clipboard.invalidate();
        assert!(clipboard.is_empty());
    }
}
