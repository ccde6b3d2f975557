//! CMake-backed project builder.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::probe::{ToolProbe, WhichProbe};
use crate::builder::ProjectBuilder;
use crate::core::build_type::BuildType;
use crate::core::pass::ConfigurationPass;
use crate::core::request::BuildRequest;
use crate::util::fs::{ensure_dir, has_cmake_cache, remove_cmake_cache};
use crate::util::process::ProcessBuilder;

/// Runs configure, build, install and test through the `cmake` and `ctest`
/// executables found on the pass environment's `PATH`.
#[derive(Debug, Clone, Default)]
pub struct CMakeProjectBuilder<P = WhichProbe> {
    probe: P,
    jobs: Option<usize>,
}

impl CMakeProjectBuilder<WhichProbe> {
    pub fn new() -> Self {
        CMakeProjectBuilder::default()
    }
}

fn tool_purpose(name: &str) -> &'static str {
    match name {
        "ctest" => "ctest runs the library's test suite and ships with CMake.",
        _ => "CMake is required to build the library.",
    }
}

impl<P: ToolProbe> CMakeProjectBuilder<P> {
    /// Use a custom probe to locate `cmake` and `ctest`.
    pub fn with_probe(probe: P) -> Self {
        CMakeProjectBuilder { probe, jobs: None }
    }

    /// Set the number of parallel build jobs.
    pub fn jobs(mut self, jobs: Option<usize>) -> Self {
        self.jobs = jobs;
        self
    }

    /// Build directory for a pass: the requested one, else
    /// `<project>/build[/<version>]/<BuildType>`.
    pub fn build_dir(request: &BuildRequest, build_type: BuildType) -> PathBuf {
        if let Some(dir) = request.build_dir() {
            return dir.to_path_buf();
        }

        let mut dir = request.project_path().join("build");
        if let Some(version) = request.version() {
            dir.push(version);
        }
        dir.push(build_type.as_str());
        dir
    }

    fn find_tool(&self, name: &str, pass: &ConfigurationPass) -> Result<PathBuf> {
        match self.probe.probe(name, &pass.env) {
            Some(path) => Ok(path),
            None => bail!(
                "{} not found\n\
                 \n\
                 {}\n\
                 Install CMake and ensure `{}` is in your PATH.",
                name,
                tool_purpose(name),
                name
            ),
        }
    }

    /// The `cmake` configure invocation for a pass.
    pub fn configure_command(
        cmake: &Path,
        request: &BuildRequest,
        pass: &ConfigurationPass,
        build_dir: &Path,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(cmake)
            .arg("-S")
            .arg(request.project_path())
            .arg("-B")
            .arg(build_dir)
            .args(pass.options.to_defines());

        if let Some(install_dir) = request.install_dir() {
            cmd = cmd.arg(format!("-DCMAKE_INSTALL_PREFIX:PATH={}", install_dir.display()));
        }

        cmd.build_env(&pass.env)
    }

    /// The `cmake --build` invocation for a pass.
    pub fn build_command(
        &self,
        cmake: &Path,
        pass: &ConfigurationPass,
        build_dir: &Path,
    ) -> ProcessBuilder {
        let mut cmd = ProcessBuilder::new(cmake)
            .arg("--build")
            .arg(build_dir)
            // Multi-config generators pick the configuration here
            .arg("--config")
            .arg(pass.build_type.as_str())
            .arg("--parallel");

        if let Some(jobs) = self.jobs {
            cmd = cmd.arg(jobs.to_string());
        }

        cmd.build_env(&pass.env)
    }

    fn configure(
        &self,
        cmake: &Path,
        request: &BuildRequest,
        pass: &ConfigurationPass,
        build_dir: &Path,
    ) -> Result<()> {
        tracing::info!(
            "Configuring {} ({})",
            request.project_path().display(),
            pass.build_type
        );
        Self::configure_command(cmake, request, pass, build_dir).status_and_check()
    }

    fn compile(&self, cmake: &Path, pass: &ConfigurationPass, build_dir: &Path) -> Result<()> {
        tracing::info!("Building {} configuration", pass.build_type);
        self.build_command(cmake, pass, build_dir).status_and_check()
    }

    fn install(
        &self,
        cmake: &Path,
        pass: &ConfigurationPass,
        build_dir: &Path,
        prefix: &Path,
    ) -> Result<()> {
        tracing::info!("Installing to {}", prefix.display());
        ProcessBuilder::new(cmake)
            .arg("--install")
            .arg(build_dir)
            .arg("--config")
            .arg(pass.build_type.as_str())
            .arg("--prefix")
            .arg(prefix)
            .build_env(&pass.env)
            .status_and_check()
    }

    fn test(&self, pass: &ConfigurationPass, build_dir: &Path) -> Result<()> {
        let ctest = self.find_tool("ctest", pass)?;

        tracing::info!("Testing {} configuration", pass.build_type);
        ProcessBuilder::new(ctest)
            .arg("--test-dir")
            .arg(build_dir)
            .arg("-C")
            .arg(pass.build_type.as_str())
            .arg("--output-on-failure")
            .build_env(&pass.env)
            .status_and_check()
    }
}

impl<P: ToolProbe> ProjectBuilder for CMakeProjectBuilder<P> {
    fn build(&self, request: &BuildRequest, pass: &ConfigurationPass) -> Result<()> {
        let cmake = self.find_tool("cmake", pass)?;
        let build_dir = Self::build_dir(request, pass.build_type);
        ensure_dir(&build_dir)?;

        if request.remove_cache() {
            tracing::debug!("removing CMake cache in {}", build_dir.display());
            remove_cmake_cache(&build_dir)?;
        }

        // Each pass configures with its own options, even in a shared build dir
        if !request.build_only() || request.reconfigure() {
            if has_cmake_cache(&build_dir) {
                tracing::debug!("updating existing cache in {}", build_dir.display());
            }
            self.configure(&cmake, request, pass, &build_dir)?;
        }

        if request.cmake_only() {
            tracing::info!("Stopping after configuration of {}", build_dir.display());
            return Ok(());
        }

        self.compile(&cmake, pass, &build_dir)?;

        if let Some(prefix) = request.install_dir() {
            self.install(&cmake, pass, &build_dir, prefix)?;
        }

        if request.build_tests() {
            self.test(pass, &build_dir)?;
        }

        Ok(())
    }
}
