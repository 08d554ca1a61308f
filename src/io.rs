use std::path::{Path, PathBuf};

use crate::utils::create_output_directory;

/// Paths making up one split's output tree.
pub struct OutputDirs {
    pub images_dir: PathBuf,
    pub labels_dir: PathBuf,
    pub manifest_path: PathBuf,
}

/// Set up the `images/<split>` and `labels/<split>` directories under the
/// output root and return the paths the writer and driver need.
///
/// The manifest lives at `<root>/<split>.txt`.
pub fn setup_output_directories(output_root: &Path, split: &str) -> std::io::Result<OutputDirs> {
    let images_dir = create_output_directory(&output_root.join("images").join(split))?;
    let labels_dir = create_output_directory(&output_root.join("labels").join(split))?;

    Ok(OutputDirs {
        images_dir,
        labels_dir,
        manifest_path: output_root.join(format!("{}.txt", split)),
    })
}
