//! Error types for build orchestration.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::core::build_type::BuildType;

/// A build request that cannot be executed.
#[derive(Debug, Error, Diagnostic)]
pub enum InvalidRequest {
    #[error("missing or nonexistent project path: no base path given")]
    #[diagnostic(help("pass the directory containing CMakeLists.txt with `--base-path`"))]
    MissingProjectPath,

    #[error("missing or nonexistent project path: {} is not a directory", .path.display())]
    #[diagnostic(help("pass the directory containing CMakeLists.txt with `--base-path`"))]
    ProjectPathNotDirectory { path: PathBuf },

    #[error("`cmake only` and `build only` cannot both be requested")]
    #[diagnostic(help("drop one of `--cmake-only` or `--build-only`"))]
    ConflictingStages,
}

/// Failure of an orchestration run.
#[derive(Debug, Error, Diagnostic)]
pub enum OrchestrateError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    /// A Project Builder call failed; remaining passes were not attempted.
    #[error("{build_type} build pass failed")]
    #[diagnostic(help("rerun with `--verbose` to see the commands that were run"))]
    BuildPass {
        build_type: BuildType,
        #[source]
        source: anyhow::Error,
    },
}

impl OrchestrateError {
    /// The configuration whose pass failed, if any.
    pub fn build_type(&self) -> Option<BuildType> {
        match self {
            OrchestrateError::BuildPass { build_type, .. } => Some(*build_type),
            OrchestrateError::InvalidRequest(_) => None,
        }
    }
}
