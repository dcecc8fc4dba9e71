//! Tool settings (digit floors, knob priority, prompt policy, annotation look).
//!
//! Stored as JSON (`framehandling.json`) in the config directory resolved by
//! [`crate::paths`]. Every field has a default, so a partial file is fine.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::entities::keys::REFERENCE_KNOBS;
use crate::error::{Error, Result};

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "framehandling.json";

/// Look of annotation nodes created by "set reference" with nothing selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    pub font: String,
    pub font_size: i32,
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            font: "Verdana Bold".to_string(),
            font_size: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Digit floor for frame numbers found in labels
    pub min_digits: usize,
    /// Digit cap for each side of a label range
    pub max_range_digits: usize,
    /// Digit floor for the `+N` handle
    pub handle_min_digits: usize,
    /// Reference knob names, highest priority first
    pub reference_knobs: Vec<String>,
    /// Re-prompt instead of giving up when the typed frame is not an integer
    pub retry_invalid_input: bool,
    pub annotation: AnnotationStyle,
    /// Command id -> shortcut override, handed to menu registration
    pub shortcuts: IndexMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            min_digits: 3,
            max_range_digits: 6,
            handle_min_digits: 1,
            reference_knobs: REFERENCE_KNOBS.iter().map(|s| s.to_string()).collect(),
            retry_invalid_input: false,
            annotation: AnnotationStyle::default(),
            shortcuts: IndexMap::new(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.min_digits == 0 {
            return Err(Error::config("min_digits must be at least 1"));
        }
        if self.handle_min_digits == 0 {
            return Err(Error::config("handle_min_digits must be at least 1"));
        }
        if self.max_range_digits < self.min_digits {
            return Err(Error::config(format!(
                "max_range_digits ({}) is below min_digits ({})",
                self.max_range_digits, self.min_digits
            )));
        }
        if self.reference_knobs.iter().all(|k| k.trim().is_empty()) {
            return Err(Error::config("reference_knobs is empty"));
        }
        Ok(())
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        debug!("Settings loaded from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
