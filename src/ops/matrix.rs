//! Configuration matrix expansion.
//!
//! A request selects Debug, Release, both, or neither. Each selected
//! configuration becomes one [`ConfigurationPass`] with its own copy of the
//! environment and a layered option set:
//!
//! 1. orchestrator defaults (`<P>_BUILD_TESTS`, `<P>_ENABLE_INSTALL`)
//! 2. `CMAKE_BUILD_TYPE`
//! 3. caller-supplied options
//!
//! Passes run one after another, Debug first. The first failure stops the run.

use crate::builder::ProjectBuilder;
use crate::core::build_type::BuildType;
use crate::core::env::{BuildEnvironment, BUILD_TYPE_KEY};
use crate::core::options::{BuildOptionSet, BUILD_TYPE_OPTION};
use crate::core::pass::ConfigurationPass;
use crate::core::request::BuildRequest;
use crate::util::config::DEFAULT_FEATURE_PREFIX;
use crate::util::errors::OrchestrateError;

/// Expands requests into passes and feeds them to a [`ProjectBuilder`].
pub struct MatrixDriver<B> {
    builder: B,
    feature_prefix: String,
}

impl<B: ProjectBuilder> MatrixDriver<B> {
    pub fn new(builder: B) -> Self {
        MatrixDriver {
            builder,
            feature_prefix: DEFAULT_FEATURE_PREFIX.to_string(),
        }
    }

    /// Set the prefix of the library's own option names.
    pub fn feature_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.feature_prefix = prefix.into();
        self
    }

    /// Options every pass starts from.
    pub fn default_options(&self, request: &BuildRequest) -> BuildOptionSet {
        let mut options = BuildOptionSet::new();
        options.set(format!("{}_BUILD_TESTS", self.feature_prefix), request.build_tests());
        options.set(format!("{}_ENABLE_INSTALL", self.feature_prefix), true);
        options
    }

    /// The passes `request` selects, in execution order.
    pub fn plan(&self, request: &BuildRequest, env: &BuildEnvironment) -> Vec<ConfigurationPass> {
        let defaults = self.default_options(request);

        BuildType::ALL
            .into_iter()
            .filter(|build_type| request.includes(*build_type))
            .map(|build_type| {
                let mut pass_env = env.clone();
                pass_env.set(BUILD_TYPE_KEY, build_type.as_str());

                let mut options = defaults.clone();
                options.set(BUILD_TYPE_OPTION, build_type.as_str());
                options.merge(request.extra_options());

                ConfigurationPass {
                    build_type,
                    env: pass_env,
                    options,
                }
            })
            .collect()
    }

    /// Run every selected pass. Returns the configurations that were built.
    pub fn run(
        &self,
        request: &BuildRequest,
        env: &BuildEnvironment,
    ) -> Result<Vec<BuildType>, OrchestrateError> {
        let passes = self.plan(request, env);
        self.run_passes(request, &passes)
    }

    /// Run already planned passes in order, stopping at the first failure.
    pub fn run_passes(
        &self,
        request: &BuildRequest,
        passes: &[ConfigurationPass],
    ) -> Result<Vec<BuildType>, OrchestrateError> {
        if passes.is_empty() {
            tracing::warn!("no configuration selected; nothing to build");
        }

        let mut built = Vec::with_capacity(passes.len());
        for pass in passes {
            tracing::info!("Starting {} pass", pass.build_type);

            self.builder
                .build(request, pass)
                .map_err(|source| OrchestrateError::BuildPass {
                    build_type: pass.build_type,
                    source,
                })?;

            tracing::info!("Finished {} pass", pass.build_type);
            built.push(pass.build_type);
        }

        Ok(built)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::OptionValue;
    use crate::core::request::RawBuildArgs;
    use crate::test_support::RecordingBuilder;
    use tempfile::TempDir;

    fn request(tmp: &TempDir, debug: bool, release: bool) -> BuildRequest {
        RawBuildArgs {
            base_path: Some(tmp.path().to_path_buf()),
            debug,
            release,
            ..Default::default()
        }
        .validate()
        .unwrap()
    }

    #[test]
    fn test_no_configuration_no_calls() {
        let tmp = TempDir::new().unwrap();
        let recorder = RecordingBuilder::new();
        let driver = MatrixDriver::new(&recorder);

        let built = driver
            .run(&request(&tmp, false, false), &BuildEnvironment::new())
            .unwrap();

        assert!(built.is_empty());
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn test_single_configuration() {
        let tmp = TempDir::new().unwrap();
        let recorder = RecordingBuilder::new();
        let driver = MatrixDriver::new(&recorder);

        driver
            .run(&request(&tmp, false, true), &BuildEnvironment::new())
            .unwrap();

        let calls = recorder.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.build_type, BuildType::Release);
    }

    #[test]
    fn test_build_all_runs_debug_then_release() {
        let tmp = TempDir::new().unwrap();
        let req = RawBuildArgs {
            base_path: Some(tmp.path().to_path_buf()),
            build_all: true,
            ..Default::default()
        }
        .validate()
        .unwrap();
        assert!(req.build_dir().is_none());
        assert!(req.version().is_none());

        let recorder = RecordingBuilder::new();
        let driver = MatrixDriver::new(&recorder);
        let built = driver.run(&req, &BuildEnvironment::new()).unwrap();

        assert_eq!(built, vec![BuildType::Debug, BuildType::Release]);

        let calls = recorder.calls();
        assert_eq!(calls.len(), 2);
        for ((call_req, pass), expected) in calls.iter().zip(BuildType::ALL) {
            assert_eq!(call_req, &req);
            assert_eq!(pass.build_type, expected);
            assert_eq!(
                pass.options.get("CMAKE_BUILD_TYPE"),
                Some(&OptionValue::from(expected.as_str()))
            );
            assert_eq!(pass.options.get("UUID_BUILD_TESTS"), Some(&OptionValue::Bool(false)));
            assert_eq!(pass.options.get("UUID_ENABLE_INSTALL"), Some(&OptionValue::Bool(true)));
            assert_eq!(pass.env.get("CMAKE_BUILD_TYPE"), Some(expected.as_str()));
        }
    }

    #[test]
    fn test_passes_do_not_share_environment() {
        let tmp = TempDir::new().unwrap();
        let base = BuildEnvironment::from_vars([("PATH", "/usr/bin")]);
        let driver = MatrixDriver::new(RecordingBuilder::new());

        let passes = driver.plan(&request(&tmp, true, true), &base);

        assert_eq!(passes[0].env.get(BUILD_TYPE_KEY), Some("Debug"));
        assert_eq!(passes[1].env.get(BUILD_TYPE_KEY), Some("Release"));
        assert!(!base.contains(BUILD_TYPE_KEY));
    }

    #[test]
    fn test_extra_options_override_defaults() {
        let tmp = TempDir::new().unwrap();
        let mut extra = BuildOptionSet::new();
        extra.set("STDUUID_ENABLE_INSTALL", false);
        extra.set("CMAKE_BUILD_TYPE", "RelWithDebInfo");
        extra.set("UUID_USING_CXX20_SPAN", true);

        let req = RawBuildArgs {
            base_path: Some(tmp.path().to_path_buf()),
            debug: true,
            build_test: true,
            options: extra,
            ..Default::default()
        }
        .validate()
        .unwrap();

        let driver = MatrixDriver::new(RecordingBuilder::new()).feature_prefix("STDUUID");
        let passes = driver.plan(&req, &BuildEnvironment::new());

        assert_eq!(passes.len(), 1);
        let options = &passes[0].options;
        assert_eq!(options.get("STDUUID_BUILD_TESTS"), Some(&OptionValue::Bool(true)));
        assert_eq!(options.get("STDUUID_ENABLE_INSTALL"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.get("CMAKE_BUILD_TYPE"), Some(&OptionValue::from("RelWithDebInfo")));
        assert_eq!(options.get("UUID_USING_CXX20_SPAN"), Some(&OptionValue::Bool(true)));
        // The pass itself still reports the configuration it was planned for
        assert_eq!(passes[0].build_type, BuildType::Debug);
    }

    #[test]
    fn test_failure_stops_remaining_passes() {
        let tmp = TempDir::new().unwrap();
        let recorder = RecordingBuilder::failing_on(BuildType::Debug);
        let driver = MatrixDriver::new(&recorder);

        let err = driver
            .run(&request(&tmp, true, true), &BuildEnvironment::new())
            .unwrap_err();

        assert_eq!(err.build_type(), Some(BuildType::Debug));
        assert!(err.to_string().contains("Debug build pass failed"));
        assert_eq!(recorder.calls().len(), 1);
    }

    #[test]
    fn test_release_failure_after_debug_success() {
        let tmp = TempDir::new().unwrap();
        let recorder = RecordingBuilder::failing_on(BuildType::Release);
        let driver = MatrixDriver::new(&recorder);

        let err = driver
            .run(&request(&tmp, true, true), &BuildEnvironment::new())
            .unwrap_err();

        assert_eq!(err.build_type(), Some(BuildType::Release));
        assert_eq!(recorder.calls().len(), 2);
        // Builder error is preserved as the source
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("simulated failure"));
    }
}
