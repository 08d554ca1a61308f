use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use det2yolo::config::{Args, SourceFormat};
use det2yolo::conversion::ConversionWriter;
use det2yolo::dataset::convert_split;
use det2yolo::io::setup_output_directories;
use det2yolo::{CocoSource, VocSource};

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        error!("Conversion failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let root_dir = PathBuf::from(&args.root_dir);
    if !root_dir.exists() {
        return Err(format!("The specified root_dir does not exist: {}", args.root_dir).into());
    }

    let image_dir = root_dir.join(&args.image_dir);
    let output_root = args
        .output_dir
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| root_dir.clone());

    let output_dirs = setup_output_directories(&output_root, &args.split)?;
    let writer = ConversionWriter::new(
        output_dirs.images_dir.clone(),
        output_dirs.labels_dir.clone(),
        args.split.clone(),
    );

    info!("Converting split '{}' to YOLO format...", args.split);

    let stats = match args.format {
        SourceFormat::Coco => {
            let annotation_file = args
                .annotation_file
                .as_ref()
                .ok_or("--annotation_file is required for the coco format")?;
            let source = CocoSource::from_file(&root_dir.join(annotation_file), &image_dir)?;
            convert_split(source, &writer, &output_dirs.manifest_path, &args.split)?
        }
        SourceFormat::Voc => {
            if args.label_list.is_empty() {
                return Err("--label_list is required for the voc format".into());
            }
            let index_path = root_dir
                .join(&args.set_dir)
                .join(&args.split)
                .with_extension("txt");
            let source = VocSource::from_index(
                &index_path,
                &root_dir.join(&args.xml_dir),
                &image_dir,
                &args.image_ext,
                &args.label_list,
            )?;
            convert_split(source, &writer, &output_dirs.manifest_path, &args.split)?
        }
    };

    stats.print_summary(&args.split);
    info!(
        "Manifest written to {}",
        output_dirs.manifest_path.display()
    );

    Ok(())
}
