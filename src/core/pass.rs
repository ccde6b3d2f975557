//! A single configuration pass.

use serde::Serialize;

use crate::core::build_type::BuildType;
use crate::core::env::BuildEnvironment;
use crate::core::options::BuildOptionSet;

/// One build configuration with its own environment and options.
///
/// Passes are built fresh for every run and handed to the Project Builder;
/// they are never written anywhere except as `--plan` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigurationPass {
    pub build_type: BuildType,
    pub env: BuildEnvironment,
    pub options: BuildOptionSet,
}
