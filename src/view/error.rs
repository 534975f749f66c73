//! View engine error types

use thiserror::Error;

/// View-specific errors
#[derive(Debug, Error)]
pub enum ViewError {
    /// Template compilation or rendering error
    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    /// An embedded template is not valid UTF-8
    #[error("Embedded template '{0}' is not valid UTF-8")]
    Encoding(String),
}
