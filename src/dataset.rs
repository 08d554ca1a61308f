use log::warn;
use rayon::prelude::*;
use std::fmt::Display;
use std::fs::File;
use std::hash::Hash;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::conversion::{normalize, ConversionWriter, Outcome};
use crate::error::ConvertError;
use crate::indexer::CategoryIndexer;
use crate::types::{ConversionStats, ImageRecord, NormalizedAnnotation, RawAnnotation};
use crate::utils::create_progress_bar;

/// A finite, one-pass stream of annotated images for one dataset split.
///
/// A source is consumed by the traversal and is not restartable; converting
/// another split requires a fresh instance.
pub trait AnnotationSource {
    /// The source's own category identifier: numeric ids for COCO, class
    /// names for VOC.
    type CategoryId: Eq + Hash + Clone + Display + Send + Sync;

    /// The ordered category listing declared by the source (not inferred
    /// from annotations).
    fn categories(&self) -> &[(Self::CategoryId, String)];

    /// Yield the next image and its raw boxes, or `None` when exhausted.
    fn next_image(&mut self)
        -> Option<(ImageRecord, Vec<RawAnnotation<Self::CategoryId>>)>;
}

/// Convert one split end to end: build the category indexer, normalize every
/// image's boxes, copy assets and write label files, then flush the manifest.
///
/// Per-annotation and per-image failures are logged and skipped; only a
/// duplicate category id in the source listing aborts the split.
pub fn convert_split<S: AnnotationSource>(
    mut source: S,
    writer: &ConversionWriter,
    manifest_path: &Path,
    split: &str,
) -> Result<ConversionStats, ConvertError> {
    let indexer = CategoryIndexer::build(source.categories())?;
    let mut stats = ConversionStats::new();

    // Normalization pass: sequential, cheap, decides per-image skips.
    let mut staged: Vec<(ImageRecord, Vec<NormalizedAnnotation>)> = Vec::new();
    while let Some((record, raw_boxes)) = source.next_image() {
        stats.images_processed += 1;

        match normalize_image(&record, &raw_boxes, &indexer, &mut stats) {
            Some(annotations) => staged.push((record, annotations)),
            None => stats.skipped_degenerate += 1,
        }
    }

    // IO pass: copy assets and write label files in parallel. The indexed
    // collect keeps outcomes in traversal order so the manifest stays
    // deterministic.
    let pb = create_progress_bar(staged.len() as u64, split);
    let outcomes: Vec<Outcome> = staged
        .par_iter()
        .map(|(record, annotations)| {
            let outcome = writer.convert_image(record, annotations);
            pb.inc(1);
            outcome
        })
        .collect();
    pb.finish_with_message("split processing complete");

    let mut manifest_entries = Vec::new();
    for ((record, annotations), outcome) in staged.iter().zip(outcomes) {
        match outcome {
            Outcome::Converted { manifest_entry } => {
                stats.images_converted += 1;
                stats.annotations_written += annotations.len();
                manifest_entries.push(manifest_entry);
            }
            Outcome::Skipped { reason } => {
                match reason {
                    ConvertError::AssetUnavailable(_) => stats.skipped_missing_asset += 1,
                    _ => stats.skipped_write_failure += 1,
                }
                warn!("Skipped image {}: {}", record.filename, reason);
            }
        }
    }

    write_manifest(manifest_path, &manifest_entries)?;
    Ok(stats)
}

/// Normalize one image's boxes. Returns `None` when the whole image must be
/// skipped (degenerate dimensions with annotations present); unknown-category
/// annotations are dropped individually.
fn normalize_image<K: Eq + Hash + Clone + Display>(
    record: &ImageRecord,
    raw_boxes: &[RawAnnotation<K>],
    indexer: &CategoryIndexer<K>,
    stats: &mut ConversionStats,
) -> Option<Vec<NormalizedAnnotation>> {
    let mut annotations = Vec::with_capacity(raw_boxes.len());

    for raw in raw_boxes {
        match normalize(raw, record, indexer) {
            Ok(ann) => annotations.push(ann),
            Err(e @ ConvertError::UnknownCategory(_)) => {
                stats.annotations_dropped += 1;
                warn!("Dropped annotation in {}: {}", record.filename, e);
            }
            Err(e) => {
                warn!("Skipped image {}: {}", record.filename, e);
                return None;
            }
        }
    }

    Some(annotations)
}

/// Write the split manifest: one `./images/<split>/<filename>` line per
/// converted image, in traversal order, replacing any previous manifest.
fn write_manifest(path: &Path, entries: &[String]) -> Result<(), ConvertError> {
    let mut writer = BufWriter::new(File::create(path)?);
    for entry in entries {
        writeln!(writer, "{}", entry)?;
    }
    writer.flush()?;
    Ok(())
}
