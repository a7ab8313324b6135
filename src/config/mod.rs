//! Configuration management for newsprint.
//!
//! Configuration is read from `~/.config/newsprint/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is
//! created. CLI flags override individual fields after loading.

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use url::Url;

use crate::cli::Cli;

/// One `[[sources]]` table in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
}

/// Main configuration struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Printer/queue name passed to `lpr -P`.
    pub printer: String,
    /// Minutes between print cycles.
    pub interval_minutes: u64,
    /// Keep the generated PDF after printing instead of deleting it.
    pub keep_pdf: bool,
    /// Directory for generated PDFs; the working directory when unset.
    pub output_dir: Option<PathBuf>,
    pub sources: Vec<SourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            printer: "TS9500".into(),
            interval_minutes: 7,
            keep_pdf: false,
            output_dir: None,
            sources: default_sources(),
        }
    }
}

fn default_sources() -> Vec<SourceConfig> {
    [
        ("CNN Top Stories", "http://rss.cnn.com/rss/cnn_topstories.rss"),
        ("Guardian World", "https://www.theguardian.com/world/rss"),
        (
            "NOAA Climate Highlights",
            "https://www.climate.gov/feeds/news-features/highlights.rss",
        ),
        ("Civil Georgia", "https://civil.ge/feed"),
        (
            "Fox News World",
            "https://moxie.foxnews.com/google-publisher/world.xml",
        ),
        (
            "Ars Technica",
            "https://feeds.arstechnica.com/arstechnica/technology-lab",
        ),
    ]
    .into_iter()
    .map(|(name, url)| SourceConfig {
        name: name.into(),
        url: url.into(),
    })
    .collect()
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// An explicit path must exist. The default path is created with a
    /// commented default config on first run. Missing fields use defaults.
    pub fn load(path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(p) => p,
            None => {
                let p = Self::default_config_path()?;
                if !p.exists() {
                    Self::create_default_config(&p)?;
                    return Ok(Self::default());
                }
                p
            }
        };

        let content = fs::read_to_string(&config_path).map_err(|e| ConfigError::Io {
            path: config_path.clone(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path,
            source: e,
        })?;

        Ok(config)
    }

    /// Apply CLI flag overrides on top of the loaded file.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(printer) = &cli.printer {
            self.printer = printer.clone();
        }
        if let Some(interval) = cli.interval {
            self.interval_minutes = interval;
        }
        if cli.keep_pdf {
            self.keep_pdf = true;
        }
        self
    }

    /// Startup invariants: a non-empty source set with parseable URLs, a
    /// printer name, and a positive interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sources.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one [[sources]] entry is required".into(),
            ));
        }
        if self.printer.trim().is_empty() {
            return Err(ConfigError::Invalid("printer name must not be empty".into()));
        }
        if self.interval_minutes == 0 {
            return Err(ConfigError::Invalid(
                "interval_minutes must be at least 1".into(),
            ));
        }
        for source in &self.sources {
            Url::parse(&source.url).map_err(|e| {
                ConfigError::Invalid(format!("invalid feed URL '{}': {}", source.url, e))
            })?;
        }
        Ok(())
    }

    /// Get the default config file path: `~/.config/newsprint/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("newsprint").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &PathBuf) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let default_config = Self::default_config_content();

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        file.write_all(default_config.as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# Newsprint configuration
#
# printer: CUPS printer/queue name, passed to `lpr -P`.
# interval_minutes: minutes between print cycles.
# keep_pdf: keep the generated PDF after printing instead of deleting it.
# output_dir: where generated PDFs are written (defaults to the working
#   directory when omitted).

printer = "TS9500"
interval_minutes = 7
keep_pdf = false

[[sources]]
name = "CNN Top Stories"
url = "http://rss.cnn.com/rss/cnn_topstories.rss"

[[sources]]
name = "Guardian World"
url = "https://www.theguardian.com/world/rss"

[[sources]]
name = "NOAA Climate Highlights"
url = "https://www.climate.gov/feeds/news-features/highlights.rss"

[[sources]]
name = "Civil Georgia"
url = "https://civil.ge/feed"

[[sources]]
name = "Fox News World"
url = "https://moxie.foxnews.com/google-publisher/world.xml"

[[sources]]
name = "Ars Technica"
url = "https://feeds.arstechnica.com/arstechnica/technology-lab"
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
