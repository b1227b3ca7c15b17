//! Extract command execution.

use crate::cli::ExtractArgs;
use crate::config::{Config, validate_extract, validate_features};
use crate::dataset::{ExtractionSettings, save_dataset};
use crate::error::Result;
use tracing::{info, warn};

/// Execute the extract command.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the dataset root is
/// missing, or the dataset file cannot be written.
pub fn execute(args: &ExtractArgs, mut config: Config, show_progress: bool) -> Result<()> {
    args.apply(&mut config);
    validate_features(&config.features)?;
    validate_extract(&config.extract, &config.features)?;

    let settings = ExtractionSettings {
        show_progress,
        ..ExtractionSettings::from_config(&config)
    };
    let summary = save_dataset(&args.dataset, &config.extract.output, settings)?;

    info!(
        "Complete: {} file(s) loaded, {} segment(s) kept, {} dropped",
        summary.files_loaded, summary.segments_accepted, summary.segments_rejected
    );
    if summary.files_failed > 0 {
        warn!("{} file(s) had errors", summary.files_failed);
    }

    Ok(())
}
