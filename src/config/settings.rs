use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml_edit::{DocumentMut, Item, Table};

use crate::util::paths::config_path;

/// Example configuration file contents (bundled with the binary)
pub const EXAMPLE_CONFIG: &str = include_str!("config.toml.example");

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Basename used for export filenames (None = date-only default name)
    pub export_basename: Option<String>,
    /// Pretty-print exported documents
    pub pretty_export: bool,
    /// Directory exports are written into (None = ~/.storyboard/exports)
    pub export_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            export_basename: None,
            pretty_export: true,
            export_dir: None,
        }
    }
}

/// TOML representation of the [export] section
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlExportConfig {
    basename: Option<String>,
    pretty: Option<bool>,
    dir: Option<PathBuf>,
}

/// TOML representation of the config file
#[derive(Debug, Clone, Default, Deserialize)]
struct TomlConfig {
    export: Option<TomlExportConfig>,
}

impl Config {
    /// Load configuration from file, merging with defaults
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load configuration from a specific path, merging with defaults.
    /// Writes the bundled example config on first run.
    pub fn load_from(config_file: &Path) -> Self {
        let mut config = Config::default();

        // Create example config on first run
        if !config_file.exists() {
            Self::create_default_config(config_file);
        }

        // Try to load user config
        if let Ok(contents) = fs::read_to_string(config_file) {
            if let Ok(toml_config) = toml::from_str::<TomlConfig>(&contents) {
                if let Some(export) = toml_config.export {
                    if let Some(basename) = export.basename {
                        config.export_basename = Some(basename);
                    }
                    if let Some(pretty) = export.pretty {
                        config.pretty_export = pretty;
                    }
                    if let Some(dir) = export.dir {
                        config.export_dir = Some(dir);
                    }
                }
            }
        }

        config
    }

    /// Create the default config file from the bundled example
    fn create_default_config(path: &Path) {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!("Failed to create config directory: {}", e);
                    return;
                }
            }
        }

        // Write the example config
        if let Err(e) = fs::write(path, EXAMPLE_CONFIG) {
            eprintln!("Failed to write default config: {}", e);
        }
    }
}

/// Save the export basename to the config file
///
/// Reads the existing config.toml, adds or updates the basename in the
/// [export] section, and writes it back while preserving all other content.
pub fn save_export_basename(name: &str) -> std::io::Result<()> {
    save_export_basename_to(&config_path(), name)
}

/// Same as [`save_export_basename`], against a specific config path
pub fn save_export_basename_to(config_file: &Path, name: &str) -> std::io::Result<()> {
    // Read existing config or start with empty document
    let contents = if config_file.exists() {
        fs::read_to_string(config_file)?
    } else {
        String::new()
    };

    // Parse as TOML document
    let mut doc: DocumentMut = contents
        .parse()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

    // Ensure [export] section exists
    if !doc.contains_key("export") {
        doc["export"] = Item::Table(Table::new());
    }

    doc["export"]["basename"] = toml_edit::value(name);

    // Ensure parent directory exists
    if let Some(parent) = config_file.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(config_file, doc.to_string())?;

    Ok(())
}
