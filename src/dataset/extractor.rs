//! Segment-windowed MFCC extraction over a labeled directory tree.

use crate::audio::load_audio;
use crate::config::{Config, ExtractConfig, FeatureConfig, validate_extract, validate_features};
use crate::dataset::{ClassFolder, DatasetRecord, SegmentPlan, discover_classes};
use crate::error::{Error, Result, error_chain};
use crate::features::{FeatureMatrix, SpectralAnalyzer};
use crate::progress;
use std::path::Path;
use tracing::{debug, info, warn};

/// Everything that shapes an extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionSettings {
    /// Signal processing settings.
    pub features: FeatureConfig,
    /// Nominal track duration in seconds.
    pub track_duration: f32,
    /// Segments per track.
    pub num_segments: usize,
    /// Labels seeded into the mapping before any class folder.
    pub placeholder_labels: Vec<String>,
    /// Show a progress bar per class folder.
    pub show_progress: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ExtractionSettings {
    /// Take the extraction settings from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        let ExtractConfig {
            track_duration,
            num_segments,
            placeholder_labels,
            ..
        } = config.extract.clone();

        Self {
            features: config.features.clone(),
            track_duration,
            num_segments,
            placeholder_labels,
            show_progress: false,
        }
    }

    /// Segment boundaries implied by these settings.
    pub fn plan(&self) -> SegmentPlan {
        SegmentPlan::new(
            self.features.sample_rate,
            self.track_duration,
            self.num_segments,
            self.features.hop_length,
        )
    }

    fn validate(&self) -> Result<()> {
        validate_features(&self.features)?;
        let extract = ExtractConfig {
            track_duration: self.track_duration,
            num_segments: self.num_segments,
            ..ExtractConfig::default()
        };
        validate_extract(&extract, &self.features)
    }
}

/// What happened to one audio file.
#[derive(Debug)]
pub enum FileOutcome {
    /// The file was loaded and analyzed.
    Loaded {
        /// Segments kept (frame count matched).
        accepted: usize,
        /// Segments dropped for a frame count mismatch.
        rejected: usize,
    },
    /// The file could not be loaded or analyzed; it contributes nothing.
    Failed(Error),
}

/// Counters for one extraction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionSummary {
    /// Class folders processed.
    pub classes: usize,
    /// Files loaded successfully.
    pub files_loaded: usize,
    /// Files skipped because of an error.
    pub files_failed: usize,
    /// Segments written to the dataset.
    pub segments_accepted: usize,
    /// Segments dropped for a frame count mismatch.
    pub segments_rejected: usize,
}

/// Builds a [`DatasetRecord`] from a directory of class folders.
pub struct SegmentedFeatureExtractor {
    settings: ExtractionSettings,
    plan: SegmentPlan,
    analyzer: SpectralAnalyzer,
}

impl SegmentedFeatureExtractor {
    /// Create an extractor, validating the settings.
    pub fn new(settings: ExtractionSettings) -> Result<Self> {
        settings.validate()?;
        let analyzer = SpectralAnalyzer::new(&settings.features)?;

        Ok(Self {
            plan: settings.plan(),
            settings,
            analyzer,
        })
    }

    /// Segment boundaries used by this extractor.
    pub fn plan(&self) -> &SegmentPlan {
        &self.plan
    }

    /// Walk `dataset_root` and collect every accepted segment.
    ///
    /// A missing or non-directory root is fatal. Files that fail to load are
    /// logged and skipped.
    pub fn extract(&mut self, dataset_root: &Path) -> Result<(DatasetRecord, ExtractionSummary)> {
        let classes = discover_classes(dataset_root)?;
        let mut record = DatasetRecord::with_placeholders(&self.settings.placeholder_labels);
        let mut summary = ExtractionSummary::default();

        info!(
            "Found {} class folder(s) in {}",
            classes.len(),
            dataset_root.display()
        );
        debug!(
            "{} segments of {} samples per track, expecting {} frames each",
            self.plan.num_segments, self.plan.samples_per_segment, self.plan.expected_frames
        );

        for class in &classes {
            self.extract_class(class, &mut record, &mut summary);
        }

        Ok((record, summary))
    }

    fn extract_class(
        &mut self,
        class: &ClassFolder,
        record: &mut DatasetRecord,
        summary: &mut ExtractionSummary,
    ) {
        let label = record.add_class(class.name.as_str());
        summary.classes += 1;
        info!(
            "Processing: {} (label {}, {} file(s))",
            class.name,
            label,
            class.files.len()
        );

        let bar = progress::create_file_progress(
            class.files.len(),
            &class.name,
            self.settings.show_progress,
        );

        for file in &class.files {
            match self.process_file(file, label, record) {
                FileOutcome::Loaded { accepted, rejected } => {
                    summary.files_loaded += 1;
                    summary.segments_accepted += accepted;
                    summary.segments_rejected += rejected;
                }
                FileOutcome::Failed(e) => {
                    warn!("Error processing {}: {}", file.display(), error_chain(&e));
                    summary.files_failed += 1;
                }
            }
            progress::inc_progress(bar.as_ref());
        }

        progress::finish_progress(bar, "done");
    }

    /// Analyze one file and append its accepted segments under `label`.
    ///
    /// A file contributes either all of its accepted segments or none.
    pub fn process_file(
        &mut self,
        path: &Path,
        label: usize,
        record: &mut DatasetRecord,
    ) -> FileOutcome {
        match self.segment_file(path) {
            Ok((accepted, rejected)) => {
                let count = accepted.len();
                for matrix in accepted {
                    record.push_segment(label, matrix);
                }
                FileOutcome::Loaded {
                    accepted: count,
                    rejected,
                }
            }
            Err(e) => FileOutcome::Failed(e),
        }
    }

    fn segment_file(&mut self, path: &Path) -> Result<(Vec<FeatureMatrix>, usize)> {
        let samples = load_audio(path, self.settings.features.sample_rate)?;

        let mut accepted = Vec::with_capacity(self.plan.num_segments);
        let mut rejected = 0;
        for (d, segment) in self.plan.segments(&samples).enumerate() {
            let mfcc = self.analyzer.mfcc(segment)?;
            if mfcc.len() == self.plan.expected_frames {
                debug!("{}, segment:{}", path.display(), d + 1);
                accepted.push(mfcc);
            } else {
                debug!(
                    "{}, segment:{} dropped ({} of {} frames)",
                    path.display(),
                    d + 1,
                    mfcc.len(),
                    self.plan.expected_frames
                );
                rejected += 1;
            }
        }

        Ok((accepted, rejected))
    }
}

/// Extract `dataset_root` and write the dataset JSON to `output`.
///
/// The file is written once, after the whole tree has been processed.
pub fn save_dataset(
    dataset_root: &Path,
    output: &Path,
    settings: ExtractionSettings,
) -> Result<ExtractionSummary> {
    let mut extractor = SegmentedFeatureExtractor::new(settings)?;
    let (record, summary) = extractor.extract(dataset_root)?;

    record.write_json(output)?;
    info!(
        "Wrote {} segment(s) from {} class(es) to {}",
        record.len(),
        summary.classes,
        output.display()
    );

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings_plan() {
        let plan = ExtractionSettings::default().plan();
        assert_eq!(plan.expected_frames, 22);
        assert_eq!(plan.num_segments, 10);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = ExtractionSettings {
            num_segments: 0,
            ..ExtractionSettings::default()
        };
        assert!(SegmentedFeatureExtractor::new(settings).is_err());
    }

    #[test]
    fn test_zero_byte_file_fails_without_adding_segments() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.wav");
        fs::write(&path, b"").unwrap();

        let mut extractor = SegmentedFeatureExtractor::new(ExtractionSettings::default()).unwrap();
        let mut record = DatasetRecord::default();
        let label = record.add_class("x");
        let outcome = extractor.process_file(&path, label, &mut record);

        assert!(matches!(outcome, FileOutcome::Failed(Error::AudioOpen { .. })));
        assert!(record.is_empty());
    }
}
