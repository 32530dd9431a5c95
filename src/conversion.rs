use std::collections::HashMap;

use crate::types::{CocoAnnotation, CocoSplit, FALLBACK_SCALE};

/// Convert one annotation to a YOLO label line.
///
/// `scale` holds the per-axis normalization factors. The bbox corner is
/// scaled first, then the center is derived from the scaled extents, so the
/// output geometry lands in [0, 1] whenever the input box lies inside the
/// image. Out-of-range boxes pass through unchanged.
pub fn format_label_line(annotation: &CocoAnnotation, scale: (f64, f64)) -> String {
    let (sx, sy) = scale;
    let [left, top, width, height] = annotation.bbox;

    let width = width * sx;
    let height = height * sy;
    let center_x = left * sx + width / 2.0;
    let center_y = top * sy + height / 2.0;

    // 1-based source category ids become 0-based class ids
    let class_id = annotation.category_id - 1;

    format!(
        "{} {:.6} {:.6} {:.6} {:.6}\n",
        class_id, center_x, center_y, width, height
    )
}

/// Build the per-axis normalization scales for every image that carries its
/// own dimensions. Images without dimensions fall back to FALLBACK_SCALE.
fn image_scales(doc: &CocoSplit) -> HashMap<u64, (f64, f64)> {
    doc.images
        .iter()
        .filter_map(|image| match (image.width, image.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => {
                Some((image.id, (1.0 / w as f64, 1.0 / h as f64)))
            }
            _ => None,
        })
        .collect()
}

/// Group the converted label lines of a split by image id.
///
/// Annotations are visited in document order, so each image's line sequence
/// preserves the order in which its annotations were listed. The map is
/// complete before anything touches the filesystem; the writer consumes it
/// in a single pass.
pub fn aggregate_annotations(doc: &CocoSplit) -> HashMap<u64, Vec<String>> {
    let scales = image_scales(doc);
    let mut label_data: HashMap<u64, Vec<String>> = HashMap::new();

    for annotation in &doc.annotations {
        let scale = scales
            .get(&annotation.image_id)
            .copied()
            .unwrap_or((FALLBACK_SCALE, FALLBACK_SCALE));
        label_data
            .entry(annotation.image_id)
            .or_default()
            .push(format_label_line(annotation, scale));
    }

    label_data
}
