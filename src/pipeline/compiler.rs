//! Type compiler passes.

use std::path::Path;

use super::error::BuildError;
use super::tool::{combined_output, program_name, tool_command};
use super::Phase;
use crate::config::ToolsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompilePass {
    /// Default project: CommonJS output plus declarations into `temp/cjs`.
    Declarations,
    /// ESM project file.
    Esm,
}

impl CompilePass {
    pub fn phase(self) -> Phase {
        match self {
            Self::Declarations => Phase::CompileDeclarations,
            Self::Esm => Phase::CompileEsm,
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Declarations => "TypeScript declarations",
            Self::Esm => "ESM TypeScript",
        }
    }
}

/// Run one compiler pass from `root` and return its stdout.
///
/// A non-zero exit carries the compiler's output as diagnostics.
pub fn run_type_compiler(
    root: &Path,
    tools: &ToolsConfig,
    pass: CompilePass,
) -> Result<String, BuildError> {
    let program = program_name(&tools.type_compiler);
    let spawn_error = |source| BuildError::Spawn {
        phase: pass.phase(),
        program: program.clone(),
        source,
    };

    let mut cmd = tool_command(&tools.type_compiler).map_err(spawn_error)?;
    if pass == CompilePass::Esm {
        cmd.arg("--project").arg(&tools.esm_project);
    }

    let output = cmd.current_dir(root).output().map_err(spawn_error)?;

    if !output.status.success() {
        let diagnostics = combined_output(&output.stdout, &output.stderr);
        tracing::error!("Error compiling {}: {}", pass.label(), diagnostics);
        return Err(BuildError::Compile {
            phase: pass.phase(),
            status: output.status,
            diagnostics,
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    tracing::info!("{} compilation done: {}", pass.label(), stdout);
    Ok(stdout)
}
