//! Menu configuration
//!
//! A [`MenuConfig`] describes how one menu behaves. It can be built in code
//! with the `with_*` helpers or loaded from a JSON file, which lets scripted
//! installs ship their menu definitions next to the install configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Suffix appended to the label of the configured default option
pub const DEFAULT_SUFFIX: &str = " (default)";

/// Settings for a single menu invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Text displayed above the options
    pub title: String,
    /// Operator may leave the menu without choosing
    pub allow_skip: bool,
    /// Several options may be checked at once
    pub multi: bool,
    /// Label of the option used when the menu is skipped
    pub default: Option<String>,
    /// Sort labels alphabetically (the default entry stays first)
    pub sort: bool,
    /// Initial cursor position when no single preset decides it
    pub cursor_index: Option<usize>,
    /// Free text shown between title and options
    pub header: Option<String>,
    /// Operator may clear the current value
    pub allow_reset: bool,
    /// Question asked before a reset is accepted
    pub reset_warning: Option<String>,
    /// Additional labels appended after the regular options
    pub extra_options: Vec<String>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            allow_skip: true,
            multi: false,
            default: None,
            sort: true,
            cursor_index: None,
            header: None,
            allow_reset: false,
            reset_warning: None,
            extra_options: Vec::new(),
        }
    }
}

impl MenuConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_skip(mut self, allow_skip: bool) -> Self {
        self.allow_skip = allow_skip;
        self
    }

    pub fn with_multi(mut self, multi: bool) -> Self {
        self.multi = multi;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_sort(mut self, sort: bool) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_cursor_index(mut self, index: usize) -> Self {
        self.cursor_index = Some(index);
        self
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Enable resets, optionally guarded by a confirmation question
    pub fn with_reset(mut self, warning: Option<String>) -> Self {
        self.allow_reset = true;
        self.reset_warning = warning;
        self
    }

    pub fn with_extra_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_options = options.into_iter().map(Into::into).collect();
        self
    }

    /// A skip can only end the menu when skipping is allowed or a default exists
    pub fn is_mandatory(&self) -> bool {
        !self.allow_skip && self.default.is_none()
    }

    /// Title as displayed, marked with `*` when a choice is required
    pub fn display_title(&self) -> String {
        if self.allow_skip {
            self.title.clone()
        } else {
            format!("* {}", self.title)
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize menu configuration")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write menu configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read menu configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse menu configuration JSON")?;

        Ok(config)
    }

    /// Validate settings that do not depend on the offered options
    pub fn validate(&self) -> Result<()> {
        if let Some(default) = &self.default {
            if default.trim().is_empty() {
                anyhow::bail!("Default option must not be blank");
            }
            if default.ends_with(DEFAULT_SUFFIX) {
                anyhow::bail!("Default option must be given without the '{}' suffix", DEFAULT_SUFFIX.trim());
            }
        }

        if self.reset_warning.is_some() && !self.allow_reset {
            anyhow::bail!("A reset warning requires allow_reset to be enabled");
        }

        let mut seen = std::collections::HashSet::new();
        for extra in &self.extra_options {
            if extra.trim().is_empty() {
                anyhow::bail!("Extra options must not be blank");
            }
            if !seen.insert(extra.as_str()) {
                anyhow::bail!("Duplicate extra option: {}", extra);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MenuConfig::default();
        assert!(config.allow_skip);
        assert!(config.sort);
        assert!(!config.multi);
        assert!(!config.allow_reset);
        assert!(!config.is_mandatory());
    }

    #[test]
    fn test_mandatory_title_marker() {
        let config = MenuConfig::new("Select a kernel").with_skip(false);
        assert!(config.is_mandatory());
        assert_eq!(config.display_title(), "* Select a kernel");

        let config = config.with_default("linux");
        assert!(!config.is_mandatory());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: MenuConfig =
            serde_json::from_str(r#"{"title": "Bootloader", "multi": true}"#).unwrap();
        assert_eq!(config.title, "Bootloader");
        assert!(config.multi);
        assert!(config.sort);
        assert!(config.allow_skip);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");

        let config = MenuConfig::new("Audio server")
            .with_default("pipewire")
            .with_reset(Some("Clear the audio selection?".to_string()));
        config.save_to_file(&path).unwrap();

        let loaded = MenuConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(MenuConfig::load_from_file(dir.path().join("nope.json")).is_err());
    }

    #[test]
    fn test_validate() {
        assert!(MenuConfig::default().validate().is_ok());
        assert!(MenuConfig::default().with_default("  ").validate().is_err());
        assert!(MenuConfig::default().with_default("x (default)").validate().is_err());

        let mut config = MenuConfig::default();
        config.reset_warning = Some("sure?".to_string());
        assert!(config.validate().is_err());

        let config = MenuConfig::default().with_extra_options(["new", "new"]);
        assert!(config.validate().is_err());
    }
}
