//! Pascal VOC-style annotation source
//!
//! Reads a split index file (one image identifier per line) and, per
//! identifier, a `<xml_dir>/<id>.xml` annotation document. Corner boxes are
//! converted to top-left `(x, y, w, h)` before leaving this module; the
//! object `name` is the source category identifier.
//!
//! The class listing is not embedded in the XML. It is supplied at
//! construction as an ordered name list.

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::AnnotationSource;
use crate::error::ConvertError;
use crate::types::{ImageRecord, RawAnnotation};

#[derive(Debug, Deserialize)]
struct VocAnnotation {
    size: VocSize,
    #[serde(default, rename = "object")]
    objects: Vec<VocObject>,
}

#[derive(Debug, Deserialize)]
struct VocSize {
    width: u32,
    height: u32,
}

#[derive(Debug, Deserialize)]
struct VocObject {
    name: String,
    bndbox: VocBox,
}

#[derive(Debug, Deserialize)]
struct VocBox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

/// One-pass source over a VOC split.
pub struct VocSource {
    categories: Vec<(String, String)>,
    image_ids: std::vec::IntoIter<String>,
    xml_dir: PathBuf,
    image_dir: PathBuf,
    image_ext: String,
}

impl VocSource {
    /// Read the split index file and prepare the source.
    ///
    /// `class_names` is the externally supplied ordered class list; its
    /// positions become the dense output indices.
    pub fn from_index(
        index_path: &Path,
        xml_dir: &Path,
        image_dir: &Path,
        image_ext: &str,
        class_names: &[String],
    ) -> Result<Self, ConvertError> {
        let index = fs::read_to_string(index_path)?;
        let image_ids: Vec<String> = index
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();

        let categories = class_names
            .iter()
            .map(|name| (name.clone(), name.clone()))
            .collect();

        Ok(Self {
            categories,
            image_ids: image_ids.into_iter(),
            xml_dir: xml_dir.to_path_buf(),
            image_dir: image_dir.to_path_buf(),
            image_ext: image_ext.to_string(),
        })
    }

    /// Parse one annotation document, tolerating its absence.
    ///
    /// A missing or malformed XML is logged and treated as "no annotations";
    /// whether the image itself survives is decided downstream by the
    /// writer's ability to locate the asset.
    fn parse_annotation(&self, image_id: &str) -> Option<VocAnnotation> {
        let xml_path = self.xml_dir.join(image_id).with_extension("xml");
        let content = match fs::read_to_string(&xml_path) {
            Ok(content) => content,
            Err(e) => {
                warn!(
                    "Failed to read annotation XML ({}): {}",
                    xml_path.display(),
                    e
                );
                return None;
            }
        };

        match quick_xml::de::from_str(&content) {
            Ok(annotation) => Some(annotation),
            Err(e) => {
                warn!(
                    "Failed to parse annotation XML ({}): {}",
                    xml_path.display(),
                    e
                );
                None
            }
        }
    }
}

impl AnnotationSource for VocSource {
    type CategoryId = String;

    fn categories(&self) -> &[(String, String)] {
        &self.categories
    }

    fn next_image(&mut self) -> Option<(ImageRecord, Vec<RawAnnotation<String>>)> {
        let image_id = self.image_ids.next()?;
        let filename = format!("{}.{}", image_id, self.image_ext);

        let (width, height, boxes) = match self.parse_annotation(&image_id) {
            Some(annotation) => {
                let boxes = annotation
                    .objects
                    .into_iter()
                    .map(|obj| RawAnnotation {
                        category: obj.name,
                        x: obj.bndbox.xmin,
                        y: obj.bndbox.ymin,
                        w: obj.bndbox.xmax - obj.bndbox.xmin,
                        h: obj.bndbox.ymax - obj.bndbox.ymin,
                    })
                    .collect();
                (annotation.size.width, annotation.size.height, boxes)
            }
            None => (0, 0, Vec::new()),
        };

        let record = ImageRecord {
            id: image_id,
            filename: filename.clone(),
            width,
            height,
            source_path: self.image_dir.join(&filename),
        };

        Some((record, boxes))
    }
}
