//! Configuration for the callout overlay.
//!
//! Configuration is stored in TOML. Every field has a default, so an empty
//! file (or no file at all) yields [`Config::default`].
//!
//! ## Example Configuration File
//!
//! ```toml
//! [scanner]
//! max_heading_chars = 80
//! ellipsis = "..."
//!
//! [documents]
//! extensions = ["md"]
//!
//! [overlay]
//! guard_scope = "per_document"
//! ```
//!
//! ## File Location
//!
//! [`Config::load`] honours `CHAT_OUTLINE_CONFIG` first, then falls back to
//! `config.toml` in the platform config directory:
//! - Linux: `~/.config/chat-outline/config.toml`
//! - macOS: `~/Library/Application Support/dev.outfitter.chat-outline/config.toml`
//! - Windows: `%APPDATA%\outfitter\chat-outline\config\config.toml`

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "CHAT_OUTLINE_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Callout scanner settings.
    pub scanner: ScannerConfig,
    /// Which documents are eligible for scanning.
    pub documents: DocumentsConfig,
    /// Overlay and update orchestration settings.
    pub overlay: OverlayConfig,
}

/// Display settings for synthetic heading text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Longest heading text, in characters, before truncation kicks in.
    pub max_heading_chars: usize,
    /// Marker appended to truncated text. Counts towards `max_heading_chars`.
    pub ellipsis: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            max_heading_chars: 80,
            ellipsis: "...".to_string(),
        }
    }
}

/// Document eligibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentsConfig {
    /// Extensions (without the dot) of documents that get scanned.
    /// Matching is case-insensitive.
    pub extensions: Vec<String>,
}

impl Default for DocumentsConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string()],
        }
    }
}

impl DocumentsConfig {
    /// Whether a document with this extension should be scanned.
    pub fn accepts(&self, extension: Option<&str>) -> bool {
        extension.is_some_and(|ext| {
            self.extensions
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
    }
}

/// Update orchestration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// How widely the self-announcement guard suppresses change signals.
    pub guard_scope: GuardScope,
}

/// Reach of the re-entrancy guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardScope {
    /// Suppress content-changed signals only for the document that is
    /// currently announcing.
    #[default]
    PerDocument,

    /// Suppress every content-changed signal while any document is
    /// announcing (a single process-wide flag).
    Global,
}

impl Config {
    /// Load configuration from `CHAT_OUTLINE_CONFIG` or the default location.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined, or if
    /// the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        let config_path = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => Self::config_path()?,
        };

        if config_path.exists() {
            Self::from_file(&config_path)
        } else {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// fails [`Config::validate`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config: {e}")))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that parse fine but cannot be honoured.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `scanner.max_heading_chars` leaves no
    /// room for `scanner.ellipsis`.
    pub fn validate(&self) -> Result<()> {
        let ellipsis_chars = self.scanner.ellipsis.chars().count();
        if self.scanner.max_heading_chars < ellipsis_chars {
            return Err(Error::Config(format!(
                "scanner.max_heading_chars ({}) is shorter than scanner.ellipsis ({ellipsis_chars} chars)",
                self.scanner.max_heading_chars
            )));
        }
        Ok(())
    }

    /// Save the configuration to an explicit path, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if directories cannot be created, the configuration
    /// cannot be serialized, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    fn config_path() -> Result<PathBuf> {
        let project_dirs = directories::ProjectDirs::from("dev", "outfitter", "chat-outline")
            .ok_or_else(|| Error::Config("Failed to determine project directories".into()))?;

        Ok(project_dirs.config_dir().join("config.toml"))
    }
}
