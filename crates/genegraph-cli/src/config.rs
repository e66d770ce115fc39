//! CLI configuration

use std::path::{Path, PathBuf};

use anyhow::Context;
use genegraph_core::{validate_depth, DEFAULT_DEPTH};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Get default config directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".genegraph")
}

/// Path of the TOML config file
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory of KGML pathway files
    pub pathway_dir: PathBuf,
    /// GAF annotation file
    pub annotation_file: PathBuf,
    /// Hop bound used when `--depth` is not given
    pub default_depth: u32,
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pathway_dir: PathBuf::from("data/KGML"),
            annotation_file: PathBuf::from("data/GO/goa_human.gaf"),
            default_depth: DEFAULT_DEPTH,
            format: OutputFormat::Table,
        }
    }
}

const KEYS: &[&str] = &["pathway_dir", "annotation_file", "default_depth", "format"];

impl Config {
    /// Load from the default path; a missing file yields defaults
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_file_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        validate_depth(config.default_depth)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        KEYS
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "pathway_dir" => Some(self.pathway_dir.display().to_string()),
            "annotation_file" => Some(self.annotation_file.display().to_string()),
            "default_depth" => Some(self.default_depth.to_string()),
            "format" => Some(self.format.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "pathway_dir" => self.pathway_dir = PathBuf::from(value),
            "annotation_file" => self.annotation_file = PathBuf::from(value),
            "default_depth" => {
                let depth: u32 = value
                    .parse()
                    .with_context(|| format!("default_depth must be a whole number, got '{}'", value))?;
                validate_depth(depth)?;
                self.default_depth = depth;
            }
            "format" => self.format = value.parse().map_err(anyhow::Error::msg)?,
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                KEYS.join(", ")
            ),
        }
        Ok(())
    }
}
