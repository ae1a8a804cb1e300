//! Plain-text board format.
//!
//! One line per grid row, cells separated by commas. An empty cell is the token
//! `DEAD`, a live cell is its color as `#rrggbb`. There is no header; the
//! dimensions come from the number of lines and the tokens on the first line.

use std::path::Path;

use crate::color::Rgb;
use crate::error::{Result, SandboxError};
use crate::grid::{Cell, Grid, MAX_DIMENSION};

pub const DEAD_TOKEN: &str = "DEAD";

pub fn encode(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.width() * grid.height() * 8);
    for row in grid.rows() {
        let tokens: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Cell::Empty => DEAD_TOKEN.to_string(),
                Cell::Alive(color) => color.to_hex(),
            })
            .collect();
        out.push_str(&tokens.join(","));
        out.push('\n');
    }
    out
}

fn decode_token(token: &str, row: usize, col: usize) -> Result<Cell> {
    let token = token.trim();
    if token == DEAD_TOKEN {
        return Ok(Cell::Empty);
    }
    Rgb::from_hex(token).map(Cell::Alive).map_err(|_| {
        SandboxError::MalformedBoardFile(format!(
            "row {}, column {}: {token:?} is neither {DEAD_TOKEN} nor a #rrggbb color",
            row + 1,
            col + 1
        ))
    })
}

/// Parses a board. The width is the token count of the first row; shorter rows
/// are padded with empty cells and longer rows truncated, with a warning.
/// Blank lines are skipped. Color tokens are validated here, so a bad color
/// fails the whole load instead of surfacing later when the board is drawn.
pub fn decode(text: &str) -> Result<Grid> {
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();

    let Some(first) = lines.first() else {
        return Err(SandboxError::MalformedBoardFile(
            "the file contains no rows".to_string(),
        ));
    };
    let width = first.split(',').count();
    let height = lines.len();
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SandboxError::MalformedBoardFile(format!(
            "{width}x{height} board exceeds the {MAX_DIMENSION}x{MAX_DIMENSION} limit"
        )));
    }

    let mut ragged = 0usize;
    let mut rows = Vec::with_capacity(height);
    for (r, line) in lines.iter().enumerate() {
        let mut row = line
            .split(',')
            .enumerate()
            .map(|(c, token)| decode_token(token, r, c))
            .collect::<Result<Vec<Cell>>>()?;
        if row.len() != width {
            ragged += 1;
            row.resize(width, Cell::Empty);
        }
        rows.push(row);
    }

    if ragged > 0 {
        log::warn!("Board has {ragged} row(s) not {width} cells wide; padded or truncated to fit");
    }
    Ok(Grid::from_rows(width, rows))
}

pub fn read_file(path: impl AsRef<Path>) -> Result<Grid> {
    let text = std::fs::read_to_string(path.as_ref())?;
    decode(&text)
}

pub fn write_file(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path.as_ref(), encode(grid))?;
    Ok(())
}
