//! Test utilities and mocks for unit tests.
//!
//! Provides stand-ins for the two external collaborators of an orchestration
//! run: a [`FixedProbe`] that answers tool lookups without touching `PATH`,
//! and a [`RecordingBuilder`] that records every pass instead of running CMake.
//!
//! # Example
//!
//! ```rust,ignore
//! let probe = FixedProbe::present("/usr/bin/ninja");
//! let recorder = RecordingBuilder::failing_on(BuildType::Release);
//!
//! let result = build(&request, &BuildEnvironment::new(), &probe, &recorder, &opts);
//! assert_eq!(recorder.calls().len(), 2);
//! ```

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Result};

use crate::builder::probe::ToolProbe;
use crate::builder::ProjectBuilder;
use crate::core::build_type::BuildType;
use crate::core::env::BuildEnvironment;
use crate::core::pass::ConfigurationPass;
use crate::core::request::BuildRequest;

/// Tool probe with a fixed answer for every tool.
///
/// Each query is recorded together with the `PATH` it was asked about.
#[derive(Debug, Default)]
pub struct FixedProbe {
    answer: Option<PathBuf>,
    queries: Mutex<Vec<(String, Option<String>)>>,
}

impl FixedProbe {
    /// Every tool resolves to `path`.
    pub fn present(path: impl Into<PathBuf>) -> Self {
        FixedProbe {
            answer: Some(path.into()),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// No tool is reachable.
    pub fn absent() -> Self {
        FixedProbe::default()
    }

    /// Tool names and `PATH` values seen so far.
    pub fn queries(&self) -> Vec<(String, Option<String>)> {
        self.queries.lock().unwrap().clone()
    }
}

impl ToolProbe for FixedProbe {
    fn probe(&self, name: &str, env: &BuildEnvironment) -> Option<PathBuf> {
        self.queries
            .lock()
            .unwrap()
            .push((name.to_string(), env.get("PATH").map(str::to_owned)));
        self.answer.clone()
    }
}

/// Project builder that records passes instead of building.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    calls: Mutex<Vec<(BuildRequest, ConfigurationPass)>>,
    fail_on: Option<BuildType>,
}

impl RecordingBuilder {
    /// Create a builder where every pass succeeds.
    pub fn new() -> Self {
        RecordingBuilder::default()
    }

    /// Create a builder that fails the pass for `build_type`.
    pub fn failing_on(build_type: BuildType) -> Self {
        RecordingBuilder {
            calls: Mutex::new(Vec::new()),
            fail_on: Some(build_type),
        }
    }

    /// All passes received, in call order.
    pub fn calls(&self) -> Vec<(BuildRequest, ConfigurationPass)> {
        self.calls.lock().unwrap().clone()
    }
}

impl ProjectBuilder for RecordingBuilder {
    fn build(&self, request: &BuildRequest, pass: &ConfigurationPass) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((request.clone(), pass.clone()));

        if self.fail_on == Some(pass.build_type) {
            bail!("simulated failure in {} pass", pass.build_type);
        }
        Ok(())
    }
}
