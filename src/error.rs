use thiserror::Error;

/// Everything that can go wrong inside the sandbox.
///
/// Most variants are non-fatal: the session logs them as warnings and skips the
/// operation. Only board and configuration failures surface to the user.
#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        width: usize,
        height: usize,
    },
    #[error(
        "pasting a {block_width}x{block_height} block at ({row}, {col}) exceeds the {width}x{height} grid"
    )]
    PasteOutOfBounds {
        row: usize,
        col: usize,
        block_width: usize,
        block_height: usize,
        width: usize,
        height: usize,
    },
    #[error("invalid editing mode: {0:?}")]
    InvalidMode(String),
    #[error("clipboard is empty, copy a region first")]
    EmptyClipboard,
    #[error("editing is disabled while the simulation is running")]
    SimulationRunning,
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
    #[error("malformed board file: {0}")]
    MalformedBoardFile(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl SandboxError {
    /// Whether the error only warrants a warning and a skipped operation.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            SandboxError::OutOfBounds { .. }
                | SandboxError::PasteOutOfBounds { .. }
                | SandboxError::InvalidMode(_)
                | SandboxError::EmptyClipboard
                | SandboxError::SimulationRunning
                | SandboxError::InvalidColor(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SandboxError>;
