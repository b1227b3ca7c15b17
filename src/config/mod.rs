//! Configuration: typed settings, the TOML file and validation.

mod file;
mod paths;
mod types;
mod validate;

pub use file::{load_config, load_config_file, save_config};
pub use paths::{config_file_path, resolve_config_path};
pub use types::{Config, ExtractConfig, FeatureConfig, RenderConfig};
pub use validate::{validate_extract, validate_features, validate_render};
