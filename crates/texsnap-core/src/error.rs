use std::io;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("Selection is empty ({width}x{height})")]
    InvalidSelection { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Confidence is not a number: {0:?}")]
    NotANumber(String),

    #[error("Confidence {0} is outside 0.0..=1.0")]
    OutOfRange(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Could not open file {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Could not write to file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Document has no file path")]
    NoPath,
}
