use clap::{Parser, ValueEnum};

/// Command-line arguments for converting COCO or Pascal VOC annotations to
/// YOLO format.
#[derive(Parser, Debug, Clone)]
#[command(version, long_about = None)]
pub struct Args {
    /// Root directory of the source dataset
    #[arg(short = 'r', long = "root_dir")]
    pub root_dir: String,

    /// Annotation source format
    #[arg(long = "format", value_enum)]
    pub format: SourceFormat,

    /// Name of the dataset split being converted (e.g. train, val)
    #[arg(long = "split", default_value = "train")]
    pub split: String,

    /// Subdirectory of the root containing the original images
    #[arg(long = "image_dir", default_value = "")]
    pub image_dir: String,

    /// COCO annotation JSON file, relative to the root (coco format only)
    #[arg(long = "annotation_file")]
    pub annotation_file: Option<String>,

    /// Directory of split index files, relative to the root (voc format only)
    #[arg(long = "set_dir", default_value = "ImageSets/Main")]
    pub set_dir: String,

    /// Directory of per-image annotation XMLs, relative to the root (voc format only)
    #[arg(long = "xml_dir", default_value = "Annotations")]
    pub xml_dir: String,

    /// File extension of the original images (voc format only)
    #[arg(long = "image_ext", default_value = "jpg")]
    pub image_ext: String,

    /// Ordered class-name list (voc format only; positions become class indices)
    #[arg(long = "label_list", use_value_delimiter = true)]
    pub label_list: Vec<String>,

    /// Output root directory; defaults to the dataset root
    #[arg(short = 'o', long = "output_dir")]
    pub output_dir: Option<String>,
}

/// Supported annotation source formats
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum SourceFormat {
    /// COCO-style JSON annotation collection
    Coco,
    /// Pascal VOC-style per-image XML annotations
    Voc,
}
