// Tue Jan 13 2026 - Alex

pub mod formatter;
pub mod json;

pub use formatter::{namespace_dir, ListingFormatter, LISTING_FILE_NAME};
pub use json::{JsonDump, JsonSerializer};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
