use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "TESS_LC_CONFIG";
/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "tess-lightcurve.toml";

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub mast: MastConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct MastConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// HLSP provenance whose light curves are downloaded.
    pub provenance: String,
}

impl Default for MastConfig {
    fn default() -> Self {
        Self {
            base_url: "https://mast.stsci.edu".to_string(),
            timeout_secs: 60,
            provenance: "GSFC-ELEANOR-LITE".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Label of the flux channel preselected in the selector.
    pub default_variant: String,
    pub marker_radius: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_variant: "Corrected Flux".to_string(),
            marker_radius: 2.5,
            window_width: 1000.0,
            window_height: 700.0,
        }
    }
}

impl AppConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// `$TESS_LC_CONFIG`, else `./tess-lightcurve.toml`, else defaults.
    /// A broken file is logged and ignored.
    pub fn load() -> Self {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(CONFIG_FILE),
        };
        Self::load_from(&path)
    }

    fn load_from(path: &Path) -> Self {
        if !path.is_file() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::from_file(path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_config(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(text.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(
            r#"
            [mast]
            timeout_secs = 5

            [ui]
            default_variant = "PCA Flux"
            "#,
        );
        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mast.timeout_secs, 5);
        assert_eq!(config.mast.base_url, "https://mast.stsci.edu");
        assert_eq!(config.ui.default_variant, "PCA Flux");
        assert_eq!(config.ui.marker_radius, 2.5);
    }

    #[test]
    fn malformed_file_is_a_parse_error_and_load_falls_back() {
        let file = write_config("[mast\ntimeout_secs = ");
        assert!(matches!(
            AppConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
        assert_eq!(AppConfig::load_from(file.path()), AppConfig::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = AppConfig::load_from(&dir.path().join("nope.toml"));
        assert_eq!(config, AppConfig::default());
    }
}
