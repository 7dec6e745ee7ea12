//! Crate-wide error type.
//!
//! The layout engine never fails; these errors only come from loading data
//! across the JS boundary and from the platform clipboard.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid plan catalog: {0}")]
    Catalog(#[source] serde_json::Error),

    #[error("invalid layout config: {0}")]
    ConfigParse(#[source] serde_json::Error),

    #[error("invalid layout config: {0}")]
    InvalidConfig(String),

    #[error("invalid ui payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error(transparent)]
    Clipboard(#[from] crate::share::ClipboardError),
}

pub type Result<T> = std::result::Result<T, Error>;
