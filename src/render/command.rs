//! Per-dataset render loop.

use super::{RenderKind, RenderSettings, matrix_to_image, write_jpeg};
use crate::audio::load_audio;
use crate::constants::AUDIO_EXTENSIONS;
use crate::constants::render::IMAGE_EXTENSION;
use crate::dataset::{ClassFolder, discover_classes};
use crate::error::{Error, Result, error_chain};
use crate::features::SpectralAnalyzer;
use crate::progress;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Counters for one render run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    /// Images written.
    pub rendered: usize,
    /// Audio files that could not be loaded or encoded.
    pub failed: usize,
    /// Files skipped for not having an audio extension.
    pub skipped: usize,
}

/// Check if a file has a supported audio extension.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}

/// Renders one image per audio file.
pub struct SpectrogramRenderer {
    kind: RenderKind,
    settings: RenderSettings,
    analyzer: SpectralAnalyzer,
}

impl SpectrogramRenderer {
    /// Create a renderer, validating the settings.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigValidation` for invalid feature or image settings.
    pub fn new(kind: RenderKind, settings: RenderSettings) -> Result<Self> {
        settings.validate()?;
        let analyzer = SpectralAnalyzer::new(&settings.features)?;
        Ok(Self {
            kind,
            settings,
            analyzer,
        })
    }

    /// Render `input` and write the JPEG to `output`.
    ///
    /// # Errors
    ///
    /// Returns an error if the audio cannot be loaded, is empty, or the image
    /// cannot be written.
    pub fn render_file(&mut self, input: &Path, output: &Path) -> Result<()> {
        let samples = load_audio(input, self.settings.features.sample_rate)?;
        if samples.is_empty() {
            return Err(Error::EmptyAudio {
                path: input.to_path_buf(),
            });
        }

        let matrix = match self.kind {
            RenderKind::Mfcc => self.analyzer.mfcc(&samples)?,
            RenderKind::Mel => self.analyzer.mel_spectrogram_db(&samples)?,
        };

        let image = matrix_to_image(&matrix, self.kind.colormap());
        let size = &self.settings.image;
        write_jpeg(&image, output, size.width, size.height, size.jpeg_quality)
    }

    fn render_class(
        &mut self,
        class: &ClassFolder,
        output_dir: &Path,
        summary: &mut RenderSummary,
    ) -> Result<()> {
        let class_dir = output_dir.join(&class.name);
        create_dir(&class_dir)?;
        info!("Rendering {}: {} file(s)", class.name, class.files.len());

        let bar = progress::create_file_progress(
            class.files.len(),
            &class.name,
            self.settings.show_progress,
        );

        for file in &class.files {
            if is_audio_file(file) {
                let target = image_path(&class_dir, file);
                match self.render_file(file, &target) {
                    Ok(()) => {
                        debug!("{} -> {}", file.display(), target.display());
                        summary.rendered += 1;
                    }
                    Err(e) => {
                        warn!(
                            "Error processing {}: {}",
                            file.display(),
                            error_chain(&e)
                        );
                        summary.failed += 1;
                    }
                }
            } else {
                debug!("Skipping non-audio file: {}", file.display());
                summary.skipped += 1;
            }
            progress::inc_progress(bar.as_ref());
        }

        progress::finish_progress(bar, "done");
        Ok(())
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::OutputDirCreateFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `<class_dir>/<stem>.jpg` for an input file.
fn image_path(class_dir: &Path, input: &Path) -> PathBuf {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(IMAGE_EXTENSION);
    class_dir.join(name)
}

/// Render every audio file under `dataset_root` into `output_dir`.
///
/// Images land in `<output_dir>/<class>/<stem>.jpg`. Files that fail to load
/// or encode are logged and skipped.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the dataset root is missing,
/// or an output directory cannot be created.
pub fn render_dataset(
    dataset_root: &Path,
    output_dir: &Path,
    kind: RenderKind,
    settings: RenderSettings,
) -> Result<RenderSummary> {
    let mut renderer = SpectrogramRenderer::new(kind, settings)?;
    let classes = discover_classes(dataset_root)?;
    create_dir(output_dir)?;

    info!(
        "Rendering {kind} images for {} class folder(s) into {}",
        classes.len(),
        output_dir.display()
    );

    let mut summary = RenderSummary::default();
    for class in &classes {
        renderer.render_class(class, output_dir, &mut summary)?;
    }

    info!(
        "Rendered {} image(s), {} failed, {} skipped",
        summary.rendered, summary.failed, summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("a/b.wav")));
        assert!(is_audio_file(Path::new("b.FLAC")));
        assert!(is_audio_file(Path::new("b.m4a")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("wav")));
    }

    #[test]
    fn test_image_path_replaces_extension() {
        let path = image_path(Path::new("out/en"), Path::new("data/en/clip.01.wav"));
        assert_eq!(path, PathBuf::from("out/en/clip.01.jpg"));
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let result = render_dataset(
            &dir.path().join("missing"),
            &dir.path().join("out"),
            RenderKind::Mel,
            RenderSettings::default(),
        );
        assert!(matches!(result, Err(Error::DatasetRootNotFound { .. })));
    }

    #[test]
    fn test_corrupt_and_non_audio_files_counted() {
        let dir = TempDir::new().unwrap();
        let class = dir.path().join("data").join("en");
        fs::create_dir_all(&class).unwrap();
        fs::write(class.join("broken.wav"), b"not audio").unwrap();
        fs::write(class.join("notes.txt"), b"hello").unwrap();

        let out = dir.path().join("out");
        let summary = render_dataset(
            &dir.path().join("data"),
            &out,
            RenderKind::Mfcc,
            RenderSettings::default(),
        )
        .unwrap();

        assert_eq!(
            summary,
            RenderSummary {
                rendered: 0,
                failed: 1,
                skipped: 1
            }
        );
        assert!(out.join("en").is_dir());
    }
}
