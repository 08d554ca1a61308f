//! COCO-style annotation source
//!
//! Deserializes a single COCO JSON document (`images`, `annotations`,
//! `categories`) and yields each listed image together with its bounding
//! boxes. `bbox` is already top-left `[x, y, w, h]`, so boxes are taken
//! verbatim.

use log::warn;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::dataset::AnnotationSource;
use crate::error::ConvertError;
use crate::types::{ImageRecord, RawAnnotation};

#[derive(Debug, Clone, Deserialize)]
struct CocoImage {
    id: i64,
    file_name: String,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

#[derive(Debug, Clone, Deserialize)]
struct CocoAnnotation {
    image_id: i64,
    category_id: i64,
    /// `[x, y, width, height]`, top-left origin, absolute pixels.
    /// Absent on some records (e.g. pure segmentation annotations); such
    /// records carry no box and are dropped.
    bbox: Option<[f64; 4]>,
}

#[derive(Debug, Clone, Deserialize)]
struct CocoCategory {
    id: i64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CocoFile {
    images: Vec<CocoImage>,
    annotations: Vec<CocoAnnotation>,
    categories: Vec<CocoCategory>,
}

/// One-pass source over a COCO annotation collection.
pub struct CocoSource {
    categories: Vec<(i64, String)>,
    images: std::vec::IntoIter<CocoImage>,
    /// Annotations grouped by `image_id`.
    by_image: HashMap<i64, Vec<CocoAnnotation>>,
    image_dir: PathBuf,
}

impl CocoSource {
    /// Load the annotation file and index its annotations by image id.
    ///
    /// `image_dir` is the directory holding the original image assets;
    /// each image's `file_name` is resolved against it.
    pub fn from_file(annotation_path: &Path, image_dir: &Path) -> Result<Self, ConvertError> {
        let file = File::open(annotation_path)?;
        let parsed: CocoFile = serde_json::from_reader(file)?;
        Ok(Self::from_parsed(parsed, image_dir))
    }

    fn from_parsed(parsed: CocoFile, image_dir: &Path) -> Self {
        let categories = parsed
            .categories
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect();

        let mut by_image: HashMap<i64, Vec<CocoAnnotation>> = HashMap::new();
        for ann in parsed.annotations {
            by_image.entry(ann.image_id).or_default().push(ann);
        }

        Self {
            categories,
            images: parsed.images.into_iter(),
            by_image,
            image_dir: image_dir.to_path_buf(),
        }
    }
}

impl AnnotationSource for CocoSource {
    type CategoryId = i64;

    fn categories(&self) -> &[(i64, String)] {
        &self.categories
    }

    fn next_image(&mut self) -> Option<(ImageRecord, Vec<RawAnnotation<i64>>)> {
        let image = self.images.next()?;

        let record = ImageRecord {
            id: image.id.to_string(),
            filename: image.file_name.clone(),
            width: image.width,
            height: image.height,
            source_path: self.image_dir.join(&image.file_name),
        };

        let boxes = self
            .by_image
            .remove(&image.id)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|ann| match ann.bbox {
                Some(bbox) => Some(RawAnnotation {
                    category: ann.category_id,
                    x: bbox[0],
                    y: bbox[1],
                    w: bbox[2],
                    h: bbox[3],
                }),
                None => {
                    warn!(
                        "Dropped annotation without bbox in image {}",
                        image.file_name
                    );
                    None
                }
            })
            .collect();

        Some((record, boxes))
    }
}
