//! Preflight checks for the external build tools.
//!
//! Validates that the configured font generator and type compiler can be
//! found before the pipeline starts. Nothing here is fatal: a missing tool
//! surfaces again, with its own error policy, in the phase that runs it.
//!
//! # Example
//!
//! ```rust
//! use icons_build::preflight::command_exists;
//!
//! if !command_exists("tsc") {
//!     println!("typescript is not installed globally");
//! }
//! ```

use std::fmt;

use crate::config::ToolsConfig;

/// Check if a command exists on the host system.
///
/// Bare names are looked up in PATH; names with a path separator are checked
/// as given.
pub fn command_exists(cmd: &str) -> bool {
    which::which(cmd).is_ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolRole {
    FontGenerator,
    TypeCompiler,
}

impl fmt::Display for ToolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FontGenerator => "font generator",
            Self::TypeCompiler => "type compiler",
        })
    }
}

/// A configured tool whose program could not be found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingTool {
    pub role: ToolRole,
    pub program: String,
}

/// Return the configured tools whose program is not available.
pub fn missing_tools(tools: &ToolsConfig) -> Vec<MissingTool> {
    [
        (ToolRole::FontGenerator, &tools.font_generator),
        (ToolRole::TypeCompiler, &tools.type_compiler),
    ]
    .into_iter()
    .filter_map(|(role, argv)| {
        let program = argv.first()?;
        if command_exists(program) {
            None
        } else {
            Some(MissingTool {
                role,
                program: program.clone(),
            })
        }
    })
    .collect()
}
