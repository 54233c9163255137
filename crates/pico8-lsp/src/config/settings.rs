//! Configuration settings for the folding analyzers

use serde::{Deserialize, Serialize};

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Section and tab marker tokens
    pub markers: MarkerSettings,
    /// Labels used when a marker carries no name
    pub names: NameSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Cartridge marker tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    /// Line opening the code section
    pub lua_section: String,
    /// Line opening the sprite data section, which ends the code
    pub gfx_section: String,
    /// Comment separating editor tabs
    pub tab_separator: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            lua_section: "__lua__".to_string(),
            gfx_section: "__gfx__".to_string(),
            tab_separator: "-->8".to_string(),
        }
    }
}

/// Fallback labels for unnamed tabs and regions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameSettings {
    pub default_tab: String,
    pub default_region: String,
}

impl Default for NameSettings {
    fn default() -> Self {
        Self {
            default_tab: "tab".to_string(),
            default_region: "region".to_string(),
        }
    }
}
