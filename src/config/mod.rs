pub mod toml_config;

use crate::core::backing::MapType;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

pub const DEFAULT_FILE_NAME: &str = "pokemon_data_pokeapi.csv";
pub const DEFAULT_PATH: &str = "src/main/resources/pokemon_data_pokeapi.csv";
pub const DEFAULT_SEARCH_ROOT: &str = ".";
pub const DEFAULT_PROMPT: &str = "dex> ";

/// Fully resolved settings used by the loader and the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_file_name: String,
    pub default_path: String,
    pub search_root: String,
    pub map_type: MapType,
    pub autoload: bool,
    pub prompt: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file_name: DEFAULT_FILE_NAME.to_string(),
            default_path: DEFAULT_PATH.to_string(),
            search_root: DEFAULT_SEARCH_ROOT.to_string(),
            map_type: MapType::default(),
            autoload: false,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl ConfigProvider for Settings {
    fn data_file_name(&self) -> &str {
        &self.data_file_name
    }

    fn default_path(&self) -> &str {
        &self.default_path
    }

    fn search_root(&self) -> &str {
        &self.search_root
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validation::validate_bare_file_name("data.file_name", &self.data_file_name)?;
        validation::validate_file_extension("data.file_name", &self.data_file_name, &["csv"])?;
        validation::validate_path("data.default_path", &self.default_path)?;
        validation::validate_path("data.search_root", &self.search_root)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "small-dex")]
#[command(about = "Browse, search and collect creature records from a CSV data set")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Load this CSV file instead of searching for one
    #[arg(short, long)]
    pub file: Option<String>,

    /// Backing map: 1/hash, 2/sorted, 3/insertion
    #[arg(short, long)]
    pub map_type: Option<MapType>,

    /// File name looked up in the bundled resources and during the search
    #[arg(long)]
    pub data_file_name: Option<String>,

    /// Path tried after the bundled resources
    #[arg(long)]
    pub default_path: Option<String>,

    /// Directory searched recursively for the data file
    #[arg(long)]
    pub search_root: Option<String>,

    /// Load the data set immediately on start
    #[arg(long)]
    pub autoload: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// TOML values first, then command line overrides.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => TomlConfig::from_file(path)?.into_settings(),
            None => Settings::default(),
        };

        if let Some(map_type) = self.map_type {
            settings.map_type = map_type;
        }
        if let Some(name) = &self.data_file_name {
            settings.data_file_name = name.clone();
        }
        if let Some(path) = &self.default_path {
            settings.default_path = path.clone();
        }
        if let Some(root) = &self.search_root {
            settings.search_root = root.clone();
        }
        if self.autoload || self.file.is_some() {
            settings.autoload = true;
        }

        settings.validate()?;
        Ok(settings)
    }
}
