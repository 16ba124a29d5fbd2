//! Icon font generation through the fantasticon CLI.
//!
//! The settings are written to a temporary JSON config file and handed over
//! with `--config`, so templates and asset lists need no CLI flag mapping.

use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::tool::{combined_output, tool_command};
use crate::config::{AssetType, BuildConfig, FontConfig, FontType};
use crate::paths::BuildPaths;

#[derive(Debug, Serialize)]
pub struct Templates {
    pub css: PathBuf,
    pub scss: PathBuf,
    pub sass: PathBuf,
    pub html: PathBuf,
}

/// Generator configuration in fantasticon's config-file shape.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FantasticonConfig<'a> {
    pub name: &'a str,
    pub font_height: u32,
    pub tag: &'a str,
    pub prefix: &'a str,
    pub font_types: [FontType; 1],
    pub templates: Templates,
    pub asset_types: &'a [AssetType],
    pub input_dir: &'a Path,
    pub output_dir: &'a Path,
}

impl<'a> FantasticonConfig<'a> {
    pub fn new(paths: &'a BuildPaths, font: &'a FontConfig) -> Self {
        Self {
            name: &font.name,
            font_height: font.font_height,
            tag: &font.tag,
            prefix: &font.prefix,
            font_types: [font.font_type],
            templates: Templates {
                css: paths.template("css"),
                scss: paths.template("scss"),
                sass: paths.template("sass"),
                html: paths.template("html"),
            },
            asset_types: &font.asset_types,
            input_dir: &paths.icons,
            output_dir: &paths.dist,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Succeeded { output: String },
    Failed { reason: String },
}

impl GenerationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Run the font generator. Never fails the build; the outcome is returned.
pub fn generate_fonts(paths: &BuildPaths, config: &BuildConfig) -> GenerationOutcome {
    match try_generate(paths, config) {
        Ok(output) => {
            tracing::info!("Done generating {}: {}", config.font.name, output);
            GenerationOutcome::Succeeded { output }
        }
        Err(reason) => {
            tracing::error!("Error generating fonts: {}", reason);
            GenerationOutcome::Failed { reason }
        }
    }
}

fn try_generate(paths: &BuildPaths, config: &BuildConfig) -> Result<String, String> {
    let generator_config = FantasticonConfig::new(paths, &config.font);

    let mut config_file = tempfile::Builder::new()
        .prefix(".fantasticonrc-")
        .suffix(".json")
        .tempfile()
        .map_err(|err| format!("creating generator config file: {err}"))?;
    serde_json::to_writer_pretty(config_file.as_file_mut(), &generator_config)
        .map_err(|err| format!("writing generator config: {err}"))?;
    config_file
        .as_file_mut()
        .flush()
        .map_err(|err| format!("writing generator config: {err}"))?;

    let mut cmd = tool_command(&config.tools.font_generator)
        .map_err(|err| format!("preparing font generator: {err}"))?;
    let output = cmd
        .arg("--config")
        .arg(config_file.path())
        .current_dir(&paths.root)
        .output()
        .map_err(|err| format!("running font generator: {err}"))?;

    let text = combined_output(&output.stdout, &output.stderr);
    if !output.status.success() {
        return Err(format!("font generator exited with {}: {}", output.status, text));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_with_generator(argv: &[&str]) -> BuildConfig {
        let mut config = BuildConfig::default();
        config.tools.font_generator = argv.iter().map(|s| s.to_string()).collect();
        config
    }

    #[test]
    fn test_config_serializes_in_generator_shape() {
        let paths = BuildPaths::from_root("/pkg");
        let font = FontConfig::default();
        let value = serde_json::to_value(FantasticonConfig::new(&paths, &font)).unwrap();

        assert_eq!(value["name"], "nuitral-icons");
        assert_eq!(value["fontHeight"], 1000);
        assert_eq!(value["tag"], "div");
        assert_eq!(value["prefix"], "nuitral-icon");
        assert_eq!(value["fontTypes"], serde_json::json!(["woff2"]));
        assert_eq!(
            value["assetTypes"],
            serde_json::json!(["scss", "css", "json", "html", "ts"])
        );
        assert_eq!(value["templates"]["sass"], "/pkg/lib/templates/sass.hbs");
        assert_eq!(value["inputDir"], "/pkg/lib/icons");
        assert_eq!(value["outputDir"], "/pkg/dist");
    }

    #[test]
    fn test_generator_receives_config_file() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::from_root(temp.path());
        // $0 = "--config", $1 = config path
        let config = config_with_generator(&[
            "sh",
            "-c",
            "grep -q '\"fontHeight\": 1000' \"$1\" && echo generated",
        ]);

        let outcome = generate_fonts(&paths, &config);
        assert_eq!(
            outcome,
            GenerationOutcome::Succeeded {
                output: "generated".to_string()
            }
        );
    }

    #[test]
    fn test_generator_failure_is_reported() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::from_root(temp.path());
        let config = config_with_generator(&["false"]);

        let outcome = generate_fonts(&paths, &config);
        assert!(!outcome.is_success());
    }

    #[test]
    fn test_missing_generator_is_reported() {
        let temp = TempDir::new().unwrap();
        let paths = BuildPaths::from_root(temp.path());
        let config = config_with_generator(&["definitely_not_fantasticon_12345"]);

        match generate_fonts(&paths, &config) {
            GenerationOutcome::Failed { reason } => {
                assert!(reason.contains("running font generator"))
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
