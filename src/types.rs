use serde::Deserialize;
use std::fmt;

// Document layout categories, indexed by 0-based class id. The manifest and
// the label files must agree on this table, so it lives in exactly one place.
pub const CLASS_NAMES: [&str; 11] = [
    "Caption",
    "Footnote",
    "Formula",
    "List-item",
    "Page-footer",
    "Page-header",
    "Picture",
    "Section-header",
    "Table",
    "Text",
    "Title",
];

/// Dataset-wide normalization factor applied when an image record carries no
/// dimensions of its own. Valid only because DocLayNet renders every page at
/// one fixed size.
pub const FALLBACK_SCALE: f64 = 1.0 / 1025.0;

// An image entry of a COCO split document. Dimensions are optional: the
// dataset this tool was written for omits them, but they take precedence
// over FALLBACK_SCALE when present.
#[derive(Debug, Deserialize, Clone)]
pub struct CocoImage {
    pub id: u64,
    pub file_name: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

// An annotation entry of a COCO split document. bbox is [left, top, width,
// height] in absolute pixels; category_id is 1-based.
#[derive(Debug, Deserialize, Clone)]
pub struct CocoAnnotation {
    pub image_id: u64,
    pub bbox: [f64; 4],
    pub category_id: i64,
}

/// One parsed per-split source document.
#[derive(Debug, Deserialize)]
pub struct CocoSplit {
    pub images: Vec<CocoImage>,
    pub annotations: Vec<CocoAnnotation>,
}

/// The three dataset partitions. Closed set; nothing else is a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    // Splits are independent; the order only matters to anyone diffing logs
    // or fixture output.
    pub const PROCESSING_ORDER: [Split; 3] = [Split::Val, Split::Test, Split::Train];

    pub fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Struct to hold per-split processing statistics
#[derive(Debug, Default, Clone)]
pub struct SplitStats {
    pub images_moved: usize,
    pub annotations_converted: usize,
    pub label_files_written: usize,
}

impl SplitStats {
    pub fn print_summary(&self, split: Split) {
        log::info!("=== {} summary ===", split);
        log::info!("Images moved: {}", self.images_moved);
        log::info!("Annotations converted: {}", self.annotations_converted);
        log::info!("Label files written: {}", self.label_files_written);

        if self.annotations_converted > 0 && self.label_files_written == 0 {
            log::warn!(
                "{} annotations were converted but no label files were written",
                self.annotations_converted
            );
        }
    }
}
