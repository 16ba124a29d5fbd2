use std::io;
use std::process::ExitStatus;
use thiserror::Error;

use super::Phase;

/// Failures that stop the pipeline.
///
/// Everything else is recorded in the build summary and the run continues.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{phase}: failed to run '{program}': {source}")]
    Spawn {
        phase: Phase,
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{phase}: type compiler exited with {status}\n{diagnostics}")]
    Compile {
        phase: Phase,
        status: ExitStatus,
        diagnostics: String,
    },
}

impl BuildError {
    pub fn phase(&self) -> Phase {
        match self {
            Self::Spawn { phase, .. } | Self::Compile { phase, .. } => *phase,
        }
    }
}
