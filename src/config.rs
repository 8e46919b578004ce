/// Application configuration
///
/// Settings are read from a JSON file in the user's config directory:
/// - Linux: ~/.config/caption-studio/config.json
/// - macOS: ~/Library/Application Support/caption-studio/config.json
/// - Windows: %APPDATA%\caption-studio\config.json
///
/// Every field is optional in the file. The backend URL can also be
/// overridden with the `CAPTION_STUDIO_BACKEND_URL` environment variable.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::state::style::Style;

/// Environment variable that overrides `backend_url`
pub const BACKEND_URL_ENV: &str = "CAPTION_STUDIO_BACKEND_URL";

/// Advisory upload limit shown in the uploader, enforced by `Uploader::accept`
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the analysis backend (without the `/analyze` path)
    pub backend_url: String,
    /// Timeout for a single analysis request, in seconds
    pub request_timeout_secs: u64,
    /// Largest file the uploader accepts, in bytes
    pub max_upload_bytes: u64,
    /// Style selected at startup
    pub default_style: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:8000".to_string(),
            request_timeout_secs: 60,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            default_style: Style::default().id().to_string(),
        }
    }
}

impl AppConfig {
    /// Load the configuration from the default location
    ///
    /// A missing file yields the defaults. A malformed file is reported and
    /// the defaults are used, so a typo never keeps the app from starting.
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => match Self::from_file(&path) {
                Ok(Some(config)) => {
                    log::info!("⚙️  Loaded config from {}", path.display());
                    config
                }
                Ok(None) => Self::default(),
                Err(e) => {
                    log::warn!("⚠️  {}; using defaults", e);
                    Self::default()
                }
            },
            None => Self::default(),
        };

        config.apply_env(std::env::var(BACKEND_URL_ENV).ok());
        config
    }

    /// Read a config file. Returns `Ok(None)` if the file does not exist.
    pub fn from_file(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Apply the backend URL override, ignoring blank values
    pub fn apply_env(&mut self, backend_url: Option<String>) {
        if let Some(url) = backend_url {
            let url = url.trim();
            if !url.is_empty() {
                self.backend_url = url.to_string();
            }
        }
    }

    /// Where the config file lives, if a config directory can be determined
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("caption-studio");
        path.push("config.json");
        Some(path)
    }

    /// Full URL of the analysis endpoint
    pub fn analyze_url(&self) -> String {
        format!("{}/analyze", self.backend_url.trim_end_matches('/'))
    }

    /// Style to select at startup
    ///
    /// Unknown ids fall back to the default style.
    pub fn initial_style(&self) -> Style {
        Style::from_id(&self.default_style).unwrap_or_else(|| {
            log::warn!(
                "⚠️  Unknown default style '{}', falling back to '{}'",
                self.default_style,
                Style::default().id()
            );
            Style::default()
        })
    }

    /// Upload limit formatted for display ("5 MB")
    pub fn max_upload_label(&self) -> String {
        let mb = self.max_upload_bytes as f64 / (1024.0 * 1024.0);
        if mb.fract() == 0.0 {
            format!("{} MB", mb as u64)
        } else {
            format!("{:.1} MB", mb)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.analyze_url(), "http://localhost:8000/analyze");
        assert_eq!(config.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.initial_style(), Style::Casual);
        assert_eq!(config.max_upload_label(), "5 MB");
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::from_file(&dir.path().join("config.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"backend_url": "http://captions.local:9000/", "default_style": "poetic"}}"#).unwrap();

        let config = AppConfig::from_file(file.path()).unwrap().unwrap();
        assert_eq!(config.analyze_url(), "http://captions.local:9000/analyze");
        assert_eq!(config.initial_style(), Style::Poetic);
        assert_eq!(config.request_timeout_secs, 60);
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_env_override() {
        let mut config = AppConfig::default();

        config.apply_env(Some("   ".to_string()));
        assert_eq!(config.backend_url, "http://localhost:8000");

        config.apply_env(Some("https://api.example.com".to_string()));
        assert_eq!(config.analyze_url(), "https://api.example.com/analyze");

        config.apply_env(None);
        assert_eq!(config.backend_url, "https://api.example.com");
    }

    #[test]
    fn test_unknown_default_style_falls_back() {
        let config = AppConfig {
            default_style: "gothic".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(config.initial_style(), Style::Casual);
    }

    #[test]
    fn test_fractional_upload_label() {
        let config = AppConfig {
            max_upload_bytes: 2 * 1024 * 1024 + 512 * 1024,
            ..AppConfig::default()
        };
        assert_eq!(config.max_upload_label(), "2.5 MB");
    }
}
