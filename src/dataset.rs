use log::{error, info};
use std::error::Error;
use std::path::Path;

use crate::config::Args;
use crate::conversion::aggregate_annotations;
use crate::io::{
    load_split_document, relocate_images, setup_split_directories, validate_layout,
    write_label_files, write_manifest,
};
use crate::types::{Split, SplitStats};
use crate::utils::create_progress_bar;

/// Run the full conversion: manifest once, then every split in the fixed
/// processing order.
///
/// A failing split aborts that split only; the remaining splits are still
/// attempted and the failure surfaces in the final result. Layout validation
/// and the manifest write are fatal for the whole run.
pub fn process_dataset(args: &Args) -> Result<(), Box<dyn Error>> {
    validate_layout(&args.root)?;

    info!("Writing data.yml manifest...");
    write_manifest(&args.root).map_err(|e| format!("Failed to write data.yml: {}", e))?;

    let mut failed_splits = 0;
    for split in Split::PROCESSING_ORDER {
        info!("Converting {} dataset...", split);
        match process_split(&args.root, split, args.append_labels) {
            Ok(stats) => stats.print_summary(split),
            Err(e) => {
                error!("Aborted {} split: {}", split, e);
                failed_splits += 1;
            }
        }
    }

    if failed_splits > 0 {
        return Err(format!("{} split(s) failed to convert", failed_splits).into());
    }
    Ok(())
}

/// Convert a single split: relocate its images out of staging, aggregate its
/// annotations into label lines, write the label files.
///
/// The phases are strictly sequential; each one wraps its error with enough
/// context to pinpoint where the split stopped.
pub fn process_split(
    root: &Path,
    split: Split,
    append_labels: bool,
) -> Result<SplitStats, Box<dyn Error>> {
    let coco_path = root.join("COCO").join(format!("{}.json", split));
    let doc = load_split_document(&coco_path)
        .map_err(|e| format!("while reading the source document: {}", e))?;

    let dirs = setup_split_directories(root, split)
        .map_err(|e| format!("while creating output directories: {}", e))?;
    let staging_dir = root.join("PNG");

    let move_pb = create_progress_bar(doc.images.len() as u64, &format!("{} images", split));
    let images_moved = relocate_images(&doc.images, &staging_dir, &dirs.images_dir, &move_pb)
        .map_err(|e| format!("while relocating images: {}", e))?;
    move_pb.finish_and_clear();

    let label_data = aggregate_annotations(&doc);

    let write_pb = create_progress_bar(label_data.len() as u64, &format!("{} labels", split));
    let label_files_written =
        write_label_files(&label_data, &dirs.labels_dir, append_labels, &write_pb)
            .map_err(|e| format!("while writing label files: {}", e))?;
    write_pb.finish_and_clear();

    Ok(SplitStats {
        images_moved,
        annotations_converted: doc.annotations.len(),
        label_files_written,
    })
}
