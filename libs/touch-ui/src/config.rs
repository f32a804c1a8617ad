//! Runtime configuration for the touch UI
//!
//! Every section uses `#[serde(default)]`, so a JSON file only needs the
//! fields it wants to override.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DEBOUNCE_MS: u64 = 30;
pub const DEFAULT_AUTO_REPEAT_DELAY_MS: u64 = 800;
pub const DEFAULT_AUTO_REPEAT_RATE_MS: u64 = 120;

pub const DEFAULT_TITLE_BAR_HEIGHT: u32 = 34;
pub const DEFAULT_MENU_SIDE_PADDING: u32 = 10;
pub const DEFAULT_MENU_VERTICAL_PADDING: u32 = 10;
pub const DEFAULT_MENU_GAP: u32 = 10;

/// Largest accepted value for any layout dimension
pub const MAX_LAYOUT_PX: u32 = 4096;

/// Debounce and auto-repeat timing, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TouchTiming {
    /// How long a touch or a release must persist before it counts.
    pub debounce_ms: u64,
    /// Hold time after `Pressed` before the first `Repeating` event.
    pub auto_repeat_delay_ms: u64,
    /// Interval between subsequent `Repeating` events.
    pub auto_repeat_rate_ms: u64,
}

impl Default for TouchTiming {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            auto_repeat_delay_ms: DEFAULT_AUTO_REPEAT_DELAY_MS,
            auto_repeat_rate_ms: DEFAULT_AUTO_REPEAT_RATE_MS,
        }
    }
}

/// Screen partitioning and menu grid spacing, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub title_bar_height: u32,
    pub menu_side_padding: u32,
    pub menu_vertical_padding: u32,
    pub menu_gap: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title_bar_height: DEFAULT_TITLE_BAR_HEIGHT,
            menu_side_padding: DEFAULT_MENU_SIDE_PADDING,
            menu_vertical_padding: DEFAULT_MENU_VERTICAL_PADDING,
            menu_gap: DEFAULT_MENU_GAP,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    #[default]
    Blue,
    Gray,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub touch: TouchTiming,
    pub layout: LayoutConfig,
    pub palette: Palette,
}

impl UiConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded UI configuration from {}", path.display());
        Ok(config)
    }

    /// Reject settings that would make the state machine or layout degenerate
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch.auto_repeat_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "auto_repeat_rate_ms must be greater than zero".to_string(),
            ));
        }
        if self.layout.title_bar_height < 8 {
            return Err(ConfigError::Invalid(format!(
                "title_bar_height {} is too small to hold a button",
                self.layout.title_bar_height
            )));
        }
        let LayoutConfig {
            title_bar_height,
            menu_side_padding,
            menu_vertical_padding,
            menu_gap,
        } = self.layout;
        for (name, value) in [
            ("title_bar_height", title_bar_height),
            ("menu_side_padding", menu_side_padding),
            ("menu_vertical_padding", menu_vertical_padding),
            ("menu_gap", menu_gap),
        ] {
            if value > MAX_LAYOUT_PX {
                return Err(ConfigError::Invalid(format!(
                    "{name} {value} is larger than {MAX_LAYOUT_PX} px"
                )));
            }
        }
        Ok(())
    }
}
