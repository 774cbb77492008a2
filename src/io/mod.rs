#[cfg(feature = "svg-io")]
pub mod svg;

/// Errors from writing exported drawings.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("std::io::Error: {0}")]
    StdIo(#[from] std::io::Error),
    #[error("Nothing to export: {0}")]
    Empty(String),
}
