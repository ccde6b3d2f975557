//! Implementation of a full orchestration run.

use serde::Serialize;

use crate::builder::probe::ToolProbe;
use crate::builder::ProjectBuilder;
use crate::core::build_type::BuildType;
use crate::core::env::BuildEnvironment;
use crate::core::pass::ConfigurationPass;
use crate::core::request::BuildRequest;
use crate::ops::compose::EnvironmentComposer;
use crate::ops::matrix::MatrixDriver;
use crate::util::config::DEFAULT_FEATURE_PREFIX;
use crate::util::errors::OrchestrateError;

/// Options for a run that do not come from the request itself.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Prefix of the library's own option names
    pub feature_prefix: String,
    /// Expand the passes but do not build
    pub emit_plan: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            feature_prefix: DEFAULT_FEATURE_PREFIX.to_string(),
            emit_plan: false,
        }
    }
}

/// Outcome of a run.
#[derive(Debug, Clone, Serialize)]
pub struct BuildResult {
    /// Every pass the request selected, in order
    pub passes: Vec<ConfigurationPass>,
    /// Configurations that were built (empty in plan mode)
    pub built: Vec<BuildType>,
}

/// Compose the environment over `ambient`, expand the configuration matrix
/// and run each pass through `builder`.
pub fn build<P, B>(
    request: &BuildRequest,
    ambient: &BuildEnvironment,
    probe: &P,
    builder: B,
    opts: &BuildOptions,
) -> Result<BuildResult, OrchestrateError>
where
    P: ToolProbe + ?Sized,
    B: ProjectBuilder,
{
    let env = EnvironmentComposer::new(probe).compose(ambient);

    let driver = MatrixDriver::new(builder).feature_prefix(opts.feature_prefix.as_str());
    let passes = driver.plan(request, &env);

    if opts.emit_plan {
        return Ok(BuildResult {
            passes,
            built: Vec::new(),
        });
    }

    let built = driver.run_passes(request, &passes)?;
    Ok(BuildResult { passes, built })
}
