use std::fmt::Display;
use std::fs::{copy, remove_file, File};
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::ConvertError;
use crate::indexer::CategoryIndexer;
use crate::types::{ImageRecord, NormalizedAnnotation, RawAnnotation};

/// Convert a raw pixel-space box to a normalized center-based box.
///
/// ```text
/// cx = (x + w/2) / width      nw = w / width
/// cy = (y + h/2) / height     nh = h / height
/// ```
///
/// No clamping is applied: a box extending past the image bounds yields
/// coordinates outside `[0, 1]` unchanged.
pub fn normalize<K: Eq + Hash + Clone + Display>(
    raw: &RawAnnotation<K>,
    record: &ImageRecord,
    indexer: &CategoryIndexer<K>,
) -> Result<NormalizedAnnotation, ConvertError> {
    if record.width == 0 || record.height == 0 {
        return Err(ConvertError::DegenerateImage {
            filename: record.filename.clone(),
            width: record.width,
            height: record.height,
        });
    }

    let class = indexer.index_of(&raw.category)?;
    let image_w = record.width as f64;
    let image_h = record.height as f64;

    Ok(NormalizedAnnotation {
        class,
        cx: (raw.x + raw.w / 2.0) / image_w,
        cy: (raw.y + raw.h / 2.0) / image_h,
        w: raw.w / image_w,
        h: raw.h / image_h,
    })
}

/// Render label rows as `<class> <cx> <cy> <w> <h>`, one per line.
pub fn format_label_rows(annotations: &[NormalizedAnnotation]) -> String {
    let mut rows = String::with_capacity(annotations.len() * 64);
    for ann in annotations {
        rows.push_str(&format!(
            "{} {:.6} {:.6} {:.6} {:.6}\n",
            ann.class, ann.cx, ann.cy, ann.w, ann.h
        ));
    }
    rows
}

/// Assemble the full label text in memory and write it with one truncating
/// create.
fn write_label_file(path: &Path, annotations: &[NormalizedAnnotation]) -> std::io::Result<()> {
    let rows = format_label_rows(annotations);
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(rows.as_bytes())?;
    writer.flush()
}

/// Result of converting one image.
#[derive(Debug)]
pub enum Outcome {
    /// Image copied and label file written; carries the manifest entry.
    Converted { manifest_entry: String },
    /// Nothing written for this image; carries the cause for logging.
    Skipped { reason: ConvertError },
}

/// Persists converted images and their label files for one split.
///
/// Each image's writes are self-contained: the image is copied first, then
/// the full label text is written with a single truncating create, so a
/// re-run over an existing output tree replaces label files instead of
/// appending to them.
#[derive(Debug, Clone)]
pub struct ConversionWriter {
    images_dir: PathBuf,
    labels_dir: PathBuf,
    split: String,
}

impl ConversionWriter {
    pub fn new(images_dir: PathBuf, labels_dir: PathBuf, split: String) -> Self {
        Self {
            images_dir,
            labels_dir,
            split,
        }
    }

    /// Copy the source asset and write the label file for one image.
    ///
    /// A missing or unreadable asset yields `Skipped` with no writes at all;
    /// the image must then appear neither in the manifest nor in the label
    /// tree. An image whose asset exists but has zero surviving annotations
    /// still converts, with an empty label file.
    pub fn convert_image(
        &self,
        record: &ImageRecord,
        annotations: &[NormalizedAnnotation],
    ) -> Outcome {
        match self.try_convert(record, annotations) {
            Ok(manifest_entry) => Outcome::Converted { manifest_entry },
            Err(reason) => Outcome::Skipped { reason },
        }
    }

    fn try_convert(
        &self,
        record: &ImageRecord,
        annotations: &[NormalizedAnnotation],
    ) -> Result<String, ConvertError> {
        if !record.source_path.exists() {
            return Err(ConvertError::AssetUnavailable(record.source_path.clone()));
        }

        let image_name = sanitize_filename::sanitize(record.basename());
        let image_output_path = self.images_dir.join(&image_name);
        copy(&record.source_path, &image_output_path)
            .map_err(|_| ConvertError::AssetUnavailable(record.source_path.clone()))?;

        let stem = Path::new(&image_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(&image_name);
        let label_output_path = self.labels_dir.join(stem).with_extension("txt");

        // A skipped image must leave no output artifacts: if the label write
        // fails, the already-copied image is removed again.
        if let Err(e) = write_label_file(&label_output_path, annotations) {
            let _ = remove_file(&image_output_path);
            return Err(e.into());
        }

        Ok(format!("./images/{}/{}", self.split, image_name))
    }
}
