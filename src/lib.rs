//! COCO / Pascal VOC to YOLO format converter
//!
//! This library converts object-detection annotations from a COCO-style JSON
//! collection or a VOC-style per-image XML set into YOLO label files: one
//! `.txt` per image with rows of `<class> <cx> <cy> <w> <h>`, all coordinates
//! normalized to the unit square.

pub mod coco_dataset;
pub mod config;
pub mod conversion;
pub mod dataset;
pub mod error;
pub mod indexer;
pub mod io;
pub mod types;
pub mod utils;
pub mod voc_dataset;

// Re-export commonly used types and functions
pub use coco_dataset::CocoSource;
pub use config::{Args, SourceFormat};
pub use conversion::{normalize, ConversionWriter, Outcome};
pub use dataset::{convert_split, AnnotationSource};
pub use error::ConvertError;
pub use indexer::CategoryIndexer;
pub use io::{setup_output_directories, OutputDirs};
pub use types::{ConversionStats, ImageRecord, NormalizedAnnotation, RawAnnotation};
pub use voc_dataset::VocSource;
