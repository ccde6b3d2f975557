//! uuid-build - build orchestrator for the stduuid library
//!
//! This crate derives a CMake build environment (preferring Ninja when it is
//! available), expands a request into Debug and/or Release passes, and runs
//! each pass through a project builder.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Test utilities and mocks for unit tests.
///
/// Only available when compiling tests. Provides a fixed-answer tool probe
/// and a recording project builder.
#[cfg(test)]
pub mod test_support;

pub use builder::{CMakeProjectBuilder, ProjectBuilder, ToolProbe, WhichProbe};
pub use crate::core::{
    BuildEnvironment, BuildOptionSet, BuildRequest, BuildType, ConfigurationPass, RawBuildArgs,
};
pub use util::errors::{InvalidRequest, OrchestrateError};
