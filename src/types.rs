use std::path::PathBuf;

/// Metadata for one source image, as declared by the annotation source.
///
/// `width`/`height` may be zero when the source could not determine them
/// (e.g. a missing VOC XML); such a record must never reach normalization.
#[derive(Debug, Clone)]
pub struct ImageRecord {
    pub id: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// Absolute or root-relative path to the original image asset.
    pub source_path: PathBuf,
}

impl ImageRecord {
    /// Final path component of `filename`, without directory prefixes.
    ///
    /// COCO `file_name` values sometimes carry subdirectories; only the
    /// basename is used for the copied image and the label stem.
    pub fn basename(&self) -> &str {
        self.filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.filename)
    }
}

/// One bounding box in absolute pixel coordinates, top-left origin.
///
/// VOC corner boxes are converted to this representation (`w = xmax - xmin`,
/// `h = ymax - ymin`) before they reach the rest of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAnnotation<K> {
    pub category: K,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// A bounding box in YOLO form: center coordinates and dimensions scaled to
/// the image's unit square, plus the dense class index.
///
/// Values are deliberately not clamped; a raw box extending past the image
/// bounds produces coordinates outside `[0, 1]` so that malformed source
/// annotations stay detectable downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedAnnotation {
    pub class: usize,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

/// Counters accumulated over one split's conversion.
#[derive(Debug, Default, Clone)]
pub struct ConversionStats {
    pub images_processed: usize,
    pub images_converted: usize,
    pub skipped_missing_asset: usize,
    pub skipped_write_failure: usize,
    pub skipped_degenerate: usize,
    pub annotations_written: usize,
    pub annotations_dropped: usize,
}

impl ConversionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_summary(&self, split: &str) {
        log::info!("=== Conversion summary [{}] ===", split);
        log::info!("Images processed: {}", self.images_processed);
        log::info!("Images converted: {}", self.images_converted);
        log::info!("Skipped (missing image asset): {}", self.skipped_missing_asset);
        log::info!("Skipped (output write failure): {}", self.skipped_write_failure);
        log::info!("Skipped (degenerate dimensions): {}", self.skipped_degenerate);
        log::info!("Annotations written: {}", self.annotations_written);

        if self.annotations_dropped > 0 {
            log::warn!(
                "Dropped {} annotation(s) with unknown category ids",
                self.annotations_dropped
            );
        }
    }
}
