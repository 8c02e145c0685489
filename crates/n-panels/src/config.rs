//! Panel configuration, read from TOML.
//!
//! ```toml
//! width = 40
//! title = "Source Control"
//! show_headers = true
//!
//! [colors]
//! DiffviewStatusModified = 11
//! ```
//!
//! Every key is optional. Unknown keys are an error so typos do not pass
//! silently.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::hl;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PanelConfig {
    /// Panel width in columns. File paths are truncated to fit.
    pub width: usize,
    /// First line of the file panel.
    pub title: String,
    /// Show the "Changes" / "Staged changes" section headers.
    pub show_headers: bool,
    /// Highlight group → ANSI palette index overrides.
    pub colors: BTreeMap<String, u8>,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 35,
            title: "Files".to_string(),
            show_headers: true,
            colors: BTreeMap::new(),
        }
    }
}

impl PanelConfig {
    /// Parse a config document.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for invalid TOML, wrong types, or unknown keys.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse the config file at `path`.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_toml`](Self::from_toml).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text)?;
        log::debug!("config: loaded {}", path.display());
        Ok(config)
    }

    /// Palette index for `group`: the configured override, else the built-in
    /// default.
    #[must_use]
    pub fn color(&self, group: &str) -> Option<u8> {
        self.colors
            .get(group)
            .copied()
            .or_else(|| hl::default_color(group))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(PanelConfig::from_toml("").unwrap(), PanelConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = PanelConfig::from_toml(
            "width = 20\nshow_headers = false\n[colors]\nDiffviewStatusModified = 11\n",
        )
        .unwrap();
        assert_eq!(config.width, 20);
        assert!(!config.show_headers);
        assert_eq!(config.title, "Files");
        assert_eq!(config.color(hl::STATUS_MODIFIED), Some(11));
        assert_eq!(config.color(hl::STATUS_ADDED), Some(2));
        assert_eq!(config.color("NoSuchGroup"), None);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = PanelConfig::from_toml("widht = 20").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(PanelConfig::from_toml("width = \"wide\"").is_err());
        assert!(PanelConfig::from_toml("[colors]\nX = 300").is_err());
    }

    #[test]
    fn missing_file() {
        let err = PanelConfig::load(Path::new("/nonexistent/n-diffview.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
