//! Render command execution.

use crate::cli::RenderArgs;
use crate::config::Config;
use crate::error::Result;
use crate::render::{RenderSettings, render_dataset};
use tracing::warn;

/// Execute the render command.
///
/// # Errors
///
/// Returns an error if the settings are invalid, the dataset root is
/// missing, or an output directory cannot be created.
pub fn execute(args: &RenderArgs, mut config: Config, show_progress: bool) -> Result<()> {
    args.apply(&mut config);

    let settings = RenderSettings {
        show_progress,
        ..RenderSettings::from_config(&config)
    };
    let summary = render_dataset(&args.dataset, &args.output_dir(), args.kind, settings)?;

    if summary.failed > 0 {
        warn!("{} file(s) had errors", summary.failed);
    }

    Ok(())
}
