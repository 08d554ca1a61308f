use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting a dataset split.
///
/// Only `DuplicateCategory` is fatal to a split: it corrupts every subsequent
/// index lookup. Everything else is scoped to one annotation or one image and
/// is downgraded to a skip by the driver.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source category listing declared the same id twice.
    #[error("duplicate category id in source listing: {0}")]
    DuplicateCategory(String),

    /// An annotation referenced a category id absent from the listing.
    #[error("unknown category id: {0}")]
    UnknownCategory(String),

    /// Image dimensions make normalization undefined.
    #[error("degenerate dimensions {width}x{height} for image {filename}")]
    DegenerateImage {
        filename: String,
        width: u32,
        height: u32,
    },

    /// The source image file could not be located or copied.
    #[error("image asset unavailable: {0}")]
    AssetUnavailable(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::DeError),
}
