use indicatif::ProgressBar;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::types::{CocoImage, CocoSplit, Split, CLASS_NAMES};

/// Paths to one split's output directories.
pub struct SplitDirs {
    pub images_dir: PathBuf,
    pub labels_dir: PathBuf,
}

/// Check the dataset root for the expected input layout before any output is
/// produced: the COCO/ documents and the PNG/ staging directory.
pub fn validate_layout(root: &Path) -> io::Result<()> {
    let mut required: Vec<PathBuf> = vec![root.join("PNG")];
    for split in Split::PROCESSING_ORDER {
        required.push(root.join("COCO").join(format!("{}.json", split)));
    }

    for path in required {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Dataset root is missing {}", path.display()),
            ));
        }
    }
    Ok(())
}

/// Create one split's image and label directories if absent.
pub fn setup_split_directories(root: &Path, split: Split) -> io::Result<SplitDirs> {
    let images_dir = root.join("images").join(split.as_str());
    let labels_dir = root.join("labels").join(split.as_str());
    fs::create_dir_all(&images_dir)?;
    fs::create_dir_all(&labels_dir)?;
    Ok(SplitDirs {
        images_dir,
        labels_dir,
    })
}

/// Read and parse one split's COCO document from a file stream.
pub fn load_split_document(path: &Path) -> io::Result<CocoSplit> {
    let file = File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("{}: {}", path.display(), e),
        )
    })
}

/// Move every referenced image out of the staging directory into the split's
/// image directory, renamed to `{id}.png`.
///
/// Moves touch disjoint source/destination pairs and run in parallel. The
/// staging directory is drained, not copied from: a missing source fails the
/// whole split, and a second run over the same staging area fails the same
/// way. `images_dir` must already exist.
pub fn relocate_images(
    images: &[CocoImage],
    staging_dir: &Path,
    images_dir: &Path,
    pb: &ProgressBar,
) -> io::Result<usize> {
    images.par_iter().try_for_each(|image| {
        let src_path = staging_dir.join(&image.file_name);
        let dst_path = images_dir.join(format!("{}.png", image.id));
        fs::rename(&src_path, &dst_path).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!(
                    "failed to move {} to {}: {}",
                    src_path.display(),
                    dst_path.display(),
                    e
                ),
            )
        })?;
        pb.inc(1);
        Ok::<(), io::Error>(())
    })?;

    Ok(images.len())
}

/// Persist the aggregated label lines, one text file per image id.
///
/// Files are rewritten by default so a re-run converges to the same output;
/// with `append` set, lines accumulate across runs instead.
pub fn write_label_files(
    label_data: &HashMap<u64, Vec<String>>,
    labels_dir: &Path,
    append: bool,
    pb: &ProgressBar,
) -> io::Result<usize> {
    for (image_id, lines) in label_data {
        let label_path = labels_dir.join(format!("{}.txt", image_id));
        let file = if append {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&label_path)?
        } else {
            File::create(&label_path)?
        };
        let mut writer = BufWriter::new(file);
        for line in lines {
            writer.write_all(line.as_bytes())?;
        }
        writer.flush()?;
        pb.inc(1);
    }

    Ok(label_data.len())
}

/// Create the data.yml manifest for YOLO training at the dataset root.
///
/// Keys of the names table are written quoted so they stay string-typed in
/// the emitted YAML.
pub fn write_manifest(root: &Path) -> io::Result<()> {
    let manifest_path = root.join("data.yml");
    let mut manifest = BufWriter::new(File::create(&manifest_path)?);

    let mut yaml_content = String::from(
        "path: ./\ntrain: images/train\nval: images/val\ntest: images/test\n\nnames:\n",
    );
    for (id, name) in CLASS_NAMES.iter().enumerate() {
        yaml_content.push_str(&format!("    \"{}\": {}\n", id, name));
    }
    manifest.write_all(yaml_content.as_bytes())?;
    manifest.flush()
}
