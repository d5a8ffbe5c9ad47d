use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::CliArgs;
use crate::output::{DetailLevel, OutputFormat, RenderOptions};

/// Defaults loaded from `~/.config/crony/config.toml`.
///
/// Command-line flags and `CRONY_*` environment variables take precedence;
/// boolean switches can only be turned on from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronyConfig {
    /// Detail level when `--detail-level` is not given
    #[serde(default)]
    pub detail_level: DetailLevel,

    /// Output format when `--format` is not given
    #[serde(default)]
    pub format: OutputFormat,

    /// Analyse `#`-disabled jobs as well
    #[serde(default)]
    pub include_disabled: bool,

    /// Omit per-job header lines
    #[serde(default)]
    pub exclude_header: bool,

    /// Show the command instead of the whole crontab line
    #[serde(default)]
    pub only_command: bool,

    /// Log invalid crontab lines at WARN instead of DEBUG
    #[serde(default)]
    pub report_invalid: bool,

    /// Tracing filter directive used when neither `--log-level` nor `RUST_LOG` is set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// File the values came from; `None` when defaults were used
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for CronyConfig {
    fn default() -> Self {
        Self {
            detail_level: DetailLevel::default(),
            format: OutputFormat::default(),
            include_disabled: false,
            exclude_header: false,
            only_command: false,
            report_invalid: false,
            log_level: default_log_level(),
            loaded_from: None,
        }
    }
}

impl CronyConfig {
    /// Return the default config file path: ~/.config/crony/config.toml
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("could not determine user config directory")?
            .join("crony");
        Ok(config_dir.join("config.toml"))
    }

    /// Load config from the given path, or the default path.
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    /// Runs before logging is set up, so callers report `loaded_from`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(p) => {
                let p = PathBuf::from(p);
                if !p.exists() {
                    bail!("config file not found: {}", p.display());
                }
                p
            }
            None => match Self::default_config_path() {
                Ok(p) => p,
                Err(_) => return Ok(Self::default()),
            },
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config: {}", config_path.display()))?;
        let mut config = Self::from_toml(&content)
            .with_context(|| format!("failed to parse config: {}", config_path.display()))?;
        config.loaded_from = Some(config_path);
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Overlay command-line arguments on top of this config.
    pub fn apply_args(mut self, args: &CliArgs) -> Self {
        if let Some(level) = args.detail_level {
            self.detail_level = level;
        }
        if let Some(format) = args.format {
            self.format = format;
        }
        self.include_disabled |= args.include_disabled;
        self.exclude_header |= args.exclude_header;
        self.only_command |= args.only_command;
        self.report_invalid |= args.report_invalid;
        self
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            detail_level: self.detail_level,
            format: self.format,
            exclude_header: self.exclude_header,
            only_command: self.only_command,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_default_config() {
        let config = CronyConfig::default();
        assert_eq!(config.detail_level, DetailLevel::Count);
        assert_eq!(config.format, OutputFormat::Text);
        assert!(!config.include_disabled);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = CronyConfig::from_toml("detail_level = \"full\"\ninclude_disabled = true\n").unwrap();
        assert_eq!(config.detail_level, DetailLevel::Full);
        assert!(config.include_disabled);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(CronyConfig::from_toml("detail_level = \"everything\"").is_err());
    }

    #[test]
    fn test_args_override_config() {
        let config = CronyConfig {
            detail_level: DetailLevel::Full,
            only_command: true,
            ..Default::default()
        };
        let args = CliArgs::parse_from(["crony", "--detail-level", "none", "--exclude-header"]);
        let merged = config.apply_args(&args);
        assert_eq!(merged.detail_level, DetailLevel::None);
        assert!(merged.exclude_header);
        assert!(merged.only_command);
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(CronyConfig::load(path.to_str()).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "format = \"json\"\nlog_level = \"debug\"\n").unwrap();
        let config = CronyConfig::load(path.to_str()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.loaded_from, Some(path));
    }

    #[test]
    fn test_missing_default_config_is_not_loaded() {
        assert_eq!(CronyConfig::default().loaded_from, None);
        assert_eq!(CronyConfig::from_toml("").unwrap().loaded_from, None);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = CronyConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed = CronyConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }
}
