//! CLI argument parsing and command handling.

mod args;
pub mod extract;
pub mod render;
mod validators;

pub use args::{Cli, Command, ConfigAction, ExtractArgs, FeatureArgs, GlobalArgs, RenderArgs};
