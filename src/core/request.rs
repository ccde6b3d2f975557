//! Build requests.
//!
//! [`RawBuildArgs`] is what the front-end collected, shortcut flags and all.
//! [`RawBuildArgs::validate`] resolves the shortcuts once and produces an
//! immutable [`BuildRequest`]; nothing downstream re-interprets raw flags.

use std::path::{Path, PathBuf};

use crate::core::build_type::BuildType;
use crate::core::options::BuildOptionSet;
use crate::util::errors::InvalidRequest;

/// Unresolved user input.
#[derive(Debug, Clone, Default)]
pub struct RawBuildArgs {
    /// Directory containing the project's CMakeLists.txt
    pub base_path: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub install_dir: Option<PathBuf>,
    pub version: Option<String>,

    /// Shortcut for `rerun_config` + `rm_cache`
    pub rm_cache_reconfig: bool,
    pub rerun_config: bool,
    pub rm_cache: bool,

    /// Stop once configuration finishes
    pub cmake_only: bool,
    /// Skip configuration and only build
    pub build_only: bool,
    pub build_test: bool,

    pub debug: bool,
    pub release: bool,
    /// Shortcut for `debug` + `release`
    pub build_all: bool,

    /// Caller-supplied named options
    pub options: BuildOptionSet,
}

impl RawBuildArgs {
    /// Resolve shortcut flags and check the project path.
    pub fn validate(self) -> Result<BuildRequest, InvalidRequest> {
        let project_path = self.base_path.ok_or(InvalidRequest::MissingProjectPath)?;
        if !project_path.is_dir() {
            return Err(InvalidRequest::ProjectPathNotDirectory { path: project_path });
        }

        if self.cmake_only && self.build_only {
            return Err(InvalidRequest::ConflictingStages);
        }

        let request = BuildRequest {
            project_path,
            build_dir: self.build_dir,
            version: self.version,
            reconfigure: self.rerun_config || self.rm_cache_reconfig,
            remove_cache: self.rm_cache || self.rm_cache_reconfig,
            cmake_only: self.cmake_only,
            build_only: self.build_only,
            install_dir: self.install_dir,
            build_tests: self.build_test,
            include_debug: self.debug || self.build_all,
            include_release: self.release || self.build_all,
            extra_options: self.options,
        };

        tracing::debug!(?request, "validated build request");
        Ok(request)
    }
}

/// A validated, immutable description of one orchestration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    project_path: PathBuf,
    build_dir: Option<PathBuf>,
    version: Option<String>,
    reconfigure: bool,
    remove_cache: bool,
    cmake_only: bool,
    build_only: bool,
    install_dir: Option<PathBuf>,
    build_tests: bool,
    include_debug: bool,
    include_release: bool,
    extra_options: BuildOptionSet,
}

impl BuildRequest {
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn build_dir(&self) -> Option<&Path> {
        self.build_dir.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn reconfigure(&self) -> bool {
        self.reconfigure
    }

    pub fn remove_cache(&self) -> bool {
        self.remove_cache
    }

    pub fn cmake_only(&self) -> bool {
        self.cmake_only
    }

    pub fn build_only(&self) -> bool {
        self.build_only
    }

    pub fn install_dir(&self) -> Option<&Path> {
        self.install_dir.as_deref()
    }

    pub fn build_tests(&self) -> bool {
        self.build_tests
    }

    pub fn include_debug(&self) -> bool {
        self.include_debug
    }

    pub fn include_release(&self) -> bool {
        self.include_release
    }

    /// Whether a pass should run for `build_type`.
    pub fn includes(&self, build_type: BuildType) -> bool {
        match build_type {
            BuildType::Debug => self.include_debug,
            BuildType::Release => self.include_release,
        }
    }

    /// Caller-supplied options, applied after the orchestrator's own.
    pub fn extra_options(&self) -> &BuildOptionSet {
        &self.extra_options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn raw(base: &Path) -> RawBuildArgs {
        RawBuildArgs {
            base_path: Some(base.to_path_buf()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_base_path() {
        let err = RawBuildArgs::default().validate().unwrap_err();
        assert!(matches!(err, InvalidRequest::MissingProjectPath));
        assert!(err.to_string().contains("missing or nonexistent project path"));
    }

    #[test]
    fn test_nonexistent_base_path() {
        let tmp = TempDir::new().unwrap();
        let err = raw(&tmp.path().join("nope")).validate().unwrap_err();
        assert!(matches!(err, InvalidRequest::ProjectPathNotDirectory { .. }));
    }

    #[test]
    fn test_base_path_is_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("CMakeLists.txt");
        std::fs::write(&file, "").unwrap();

        assert!(raw(&file).validate().is_err());
    }

    #[test]
    fn test_defaults_are_disabled() {
        let tmp = TempDir::new().unwrap();
        let req = raw(tmp.path()).validate().unwrap();

        assert_eq!(req.project_path(), tmp.path());
        assert!(req.build_dir().is_none());
        assert!(req.version().is_none());
        assert!(req.install_dir().is_none());
        assert!(!req.reconfigure());
        assert!(!req.remove_cache());
        assert!(!req.cmake_only());
        assert!(!req.build_only());
        assert!(!req.build_tests());
        assert!(!req.include_debug());
        assert!(!req.include_release());
        assert!(req.extra_options().is_empty());
    }

    #[test]
    fn test_rm_cache_reconfig_matches_manual_flags() {
        let tmp = TempDir::new().unwrap();

        for (rerun, rm) in [(false, false), (true, false), (false, true), (true, true)] {
            let shortcut = RawBuildArgs {
                rm_cache_reconfig: true,
                rerun_config: rerun,
                rm_cache: rm,
                ..raw(tmp.path())
            }
            .validate()
            .unwrap();

            let manual = RawBuildArgs {
                rerun_config: true,
                rm_cache: true,
                ..raw(tmp.path())
            }
            .validate()
            .unwrap();

            assert_eq!(shortcut, manual);
        }
    }

    #[test]
    fn test_build_all_selects_both() {
        let tmp = TempDir::new().unwrap();
        let req = RawBuildArgs {
            build_all: true,
            ..raw(tmp.path())
        }
        .validate()
        .unwrap();

        assert!(req.includes(BuildType::Debug));
        assert!(req.includes(BuildType::Release));
    }

    #[test]
    fn test_single_configuration() {
        let tmp = TempDir::new().unwrap();
        let req = RawBuildArgs {
            release: true,
            ..raw(tmp.path())
        }
        .validate()
        .unwrap();

        assert!(!req.includes(BuildType::Debug));
        assert!(req.includes(BuildType::Release));
    }

    #[test]
    fn test_conflicting_stages() {
        let tmp = TempDir::new().unwrap();
        let err = RawBuildArgs {
            cmake_only: true,
            build_only: true,
            ..raw(tmp.path())
        }
        .validate()
        .unwrap_err();

        assert!(matches!(err, InvalidRequest::ConflictingStages));
    }
}
