//! Process-wide configuration: exactly the options §6 recognises. No
//! CLI-argument parsing lives here -- that's an external collaborator's
//! job, per the core/shell boundary this crate draws.

use std::path::PathBuf;

use asterix_core::diagnostics::LogLevel;
use asterix_core::emit::OutputFormat;
use asterix_schema::CategoriesToLoad;

#[derive(Debug, Clone)]
pub struct Config {
    pub catalogue_path: Option<PathBuf>,
    pub categories_to_load: CategoriesToLoad,
    pub filter_spec: Vec<String>,
    pub output_format: OutputFormat,
    pub log_level: LogLevel,
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalogue_path: None,
            categories_to_load: CategoriesToLoad::All,
            filter_spec: Vec::new(),
            output_format: OutputFormat::Text,
            log_level: LogLevel::Error,
            verbose: false,
        }
    }
}
