//! The extracted dataset and its JSON file format.

use crate::constants::{JSON_INDENT, TEMP_FILE_SUFFIX};
use crate::error::{Error, Result};
use crate::features::FeatureMatrix;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Class mapping, per-segment labels and per-segment MFCC matrices.
///
/// `labels[i]` and `mfcc[i]` always describe the same segment, and every
/// label indexes into `mapping`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    mapping: Vec<String>,
    labels: Vec<usize>,
    mfcc: Vec<FeatureMatrix>,
}

impl DatasetRecord {
    /// Create an empty record whose mapping starts with `placeholders`.
    pub fn with_placeholders(placeholders: &[String]) -> Self {
        Self {
            mapping: placeholders.to_vec(),
            ..Self::default()
        }
    }

    /// Append a class label and return its index in the mapping.
    pub fn add_class(&mut self, name: impl Into<String>) -> usize {
        self.mapping.push(name.into());
        self.mapping.len() - 1
    }

    /// Append one accepted segment.
    ///
    /// `label` must index into the mapping; debug builds assert it.
    pub fn push_segment(&mut self, label: usize, mfcc: FeatureMatrix) {
        debug_assert!(label < self.mapping.len(), "label {label} not in mapping");
        self.labels.push(label);
        self.mfcc.push(mfcc);
    }

    /// Class labels in index order.
    pub fn mapping(&self) -> &[String] {
        &self.mapping
    }

    /// One class index per accepted segment.
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// One MFCC matrix per accepted segment.
    pub fn mfcc(&self) -> &[FeatureMatrix] {
        &self.mfcc
    }

    /// Number of accepted segments.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no segment was accepted.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Write the record as pretty-printed JSON, replacing any existing file.
    ///
    /// The document is written to a sibling temporary file first and renamed
    /// into place, so readers never see a partial dataset.
    pub fn write_json(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::OutputDirCreateFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let temp_path = temp_path_for(path);
        let result = self
            .write_json_file(&temp_path, path)
            .and_then(|()| {
                fs::rename(&temp_path, path).map_err(|e| Error::OutputWrite {
                    path: path.to_path_buf(),
                    source: e,
                })
            });

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }
        result
    }

    /// Serialize into `file_path`; errors name `target`, the path the user asked for.
    fn write_json_file(&self, file_path: &Path, target: &Path) -> Result<()> {
        let write_error = |source: std::io::Error| Error::OutputWrite {
            path: target.to_path_buf(),
            source,
        };

        let file = File::create(file_path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(JSON_INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
        self.serialize(&mut serializer)
            .map_err(|e| Error::JsonSerialize {
                path: target.to_path_buf(),
                source: e,
            })?;
        writer.write_all(b"\n").map_err(write_error)?;

        let file = writer
            .into_inner()
            .map_err(|e| write_error(e.into_error()))?;
        file.sync_all().map_err(write_error)
    }

    /// Read a record previously written with [`DatasetRecord::write_json`].
    pub fn read_json(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::DatasetFileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::JsonSerialize {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(TEMP_FILE_SUFFIX);
    path.with_file_name(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_record() -> DatasetRecord {
        let mut record = DatasetRecord::default();
        let en = record.add_class("en");
        let fr = record.add_class("fr");
        record.push_segment(en, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        record.push_segment(fr, vec![vec![-1.5, 0.25], vec![0.0, 8.0]]);
        record
    }

    #[test]
    fn test_add_class_returns_position() {
        let mut record = DatasetRecord::with_placeholders(&["unused".to_string()]);
        assert_eq!(record.add_class("first"), 1);
        assert_eq!(record.add_class("second"), 2);
        assert_eq!(record.mapping(), ["unused", "first", "second"]);
    }

    #[test]
    fn test_json_has_exactly_three_fields() {
        let value = serde_json::to_value(sample_record()).unwrap();
        let object = value.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["labels", "mapping", "mfcc"]);
        assert_eq!(object["labels"], serde_json::json!([0, 1]));
    }

    #[test]
    fn test_write_uses_four_space_indent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        sample_record().write_json(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n    \"mapping\": [\n        \"en\""));
        assert!(!dir.path().join("data.json.tmp").exists());
    }

    #[test]
    fn test_write_then_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("data.json");
        let record = sample_record();
        record.write_json(&path).unwrap();
        assert_eq!(DatasetRecord::read_json(&path).unwrap(), record);
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "stale contents that are much longer than nothing").unwrap();
        DatasetRecord::default().write_json(&path).unwrap();
        let reread = DatasetRecord::read_json(&path).unwrap();
        assert!(reread.is_empty());
    }

    #[test]
    fn test_write_into_missing_dir_under_file_fails() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();
        let result = DatasetRecord::default().write_json(&blocker.join("data.json"));
        assert!(result.is_err());
    }
}
