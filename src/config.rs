//! Build configuration.
//!
//! Defaults reproduce the package's fixed font settings. An optional
//! `icons-build.toml` at the package root may override any of them.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "icons-build.toml";

/// Font binary formats understood by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontType {
    Eot,
    Woff2,
    Woff,
    Ttf,
    Svg,
}

/// Non-font assets rendered from templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Css,
    Scss,
    Sass,
    Html,
    Json,
    Ts,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub name: String,
    pub font_height: u32,
    pub tag: String,
    pub prefix: String,
    pub font_type: FontType,
    pub asset_types: Vec<AssetType>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            name: "nuitral-icons".to_string(),
            font_height: 1000,
            tag: "div".to_string(),
            prefix: "nuitral-icon".to_string(),
            font_type: FontType::Woff2,
            asset_types: vec![
                AssetType::Scss,
                AssetType::Css,
                AssetType::Json,
                AssetType::Html,
                AssetType::Ts,
            ],
        }
    }
}

/// External commands, each as program followed by leading arguments.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    pub font_generator: Vec<String>,
    pub type_compiler: Vec<String>,
    pub esm_project: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            font_generator: vec!["npx".to_string(), "fantasticon".to_string()],
            type_compiler: vec!["npx".to_string(), "tsc".to_string()],
            esm_project: "tsconfig.esm.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    pub font: FontConfig,
    pub tools: ToolsConfig,
}

impl BuildConfig {
    /// Load `icons-build.toml` from `root`, falling back to defaults when absent.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_FILENAME);
        if !config_path.is_file() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(&config_path)
            .with_context(|| format!("reading build config '{}'", config_path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("parsing build config '{}'", config_path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.tools.font_generator.is_empty() {
            bail!("tools.font_generator must name a program");
        }
        if self.tools.type_compiler.is_empty() {
            bail!("tools.type_compiler must name a program");
        }
        if self.font.name.trim().is_empty() {
            bail!("font.name must not be empty");
        }
        Ok(())
    }
}
