//! High-level operations.
//!
//! Environment composition, configuration matrix expansion, and the run that
//! ties them to a project builder.

pub mod build_uuid;
pub mod compose;
pub mod matrix;

pub use build_uuid::{build, BuildOptions, BuildResult};
pub use compose::EnvironmentComposer;
pub use matrix::MatrixDriver;
