mod schema;

pub use schema::Config;

use crate::scoring::{default_translations, Language, Localization};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the config directory path (~/.config/ldct/)
pub fn get_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(".config").join("ldct"))
        .unwrap_or_else(|| PathBuf::from(".ldct"))
}

/// Get the default config file path (~/.config/ldct/config.yaml)
pub fn get_config_path() -> PathBuf {
    get_config_dir().join("config.yaml")
}

/// Get the default data file path (<data dir>/ldct/survey_data.csv)
pub fn get_default_data_path() -> PathBuf {
    dirs::data_dir()
        .map(|p| p.join("ldct"))
        .unwrap_or_else(get_config_dir)
        .join("survey_data.csv")
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let explicit = path.is_some();
    let config_path = path.unwrap_or_else(get_config_path);

    if !config_path.exists() {
        if explicit {
            anyhow::bail!("Config file not found at {}", config_path.display());
        }
        log::debug!("No config at {}, using defaults", config_path.display());
        return Ok(Config::default());
    }

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    Ok(config)
}

impl Config {
    pub fn data_path(&self) -> PathBuf {
        self.data_file.clone().unwrap_or_else(get_default_data_path)
    }

    pub fn language(&self) -> Language {
        self.default_language.unwrap_or_default()
    }

    /// Build the validated text table, reporting every problem at once
    pub fn localization(&self) -> Result<Localization, Vec<String>> {
        match &self.translations {
            Some(table) => Localization::new(table.clone()),
            None => Localization::new(default_translations()),
        }
    }
}
