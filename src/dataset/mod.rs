//! Segmented MFCC dataset extraction.

mod extractor;
mod layout;
mod plan;
mod record;

pub use extractor::{
    ExtractionSettings, ExtractionSummary, FileOutcome, SegmentedFeatureExtractor, save_dataset,
};
pub use layout::{ClassFolder, discover_classes, ensure_dataset_root};
pub use plan::SegmentPlan;
pub use record::DatasetRecord;
