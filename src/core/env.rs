//! Process environment for build passes.
//!
//! A [`BuildEnvironment`] is a snapshot of the ambient environment plus an
//! overlay of keys chosen by the orchestrator. Lookups see the overlay first.
//! Nothing here touches the real process environment; callers hand the
//! finished mapping to whatever spawns the build tools.

use std::collections::BTreeMap;
use std::ffi::{OsStr, OsString};

use serde::Serialize;

/// Environment key CMake reads to pick its generator.
pub const GENERATOR_KEY: &str = "CMAKE_GENERATOR";

/// Environment key carrying the active configuration name.
pub const BUILD_TYPE_KEY: &str = "CMAKE_BUILD_TYPE";

/// Ambient snapshot plus orchestrator overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildEnvironment {
    #[serde(skip)]
    inherited: BTreeMap<String, String>,
    /// Ambient variables that are not valid UTF-8, passed through untouched
    #[serde(skip)]
    opaque: BTreeMap<OsString, OsString>,
    overlay: BTreeMap<String, String>,
}

impl BuildEnvironment {
    /// Create an empty environment.
    pub fn new() -> Self {
        BuildEnvironment::default()
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::from_os_vars(std::env::vars_os())
    }

    /// Build an environment from raw OS pairs.
    ///
    /// Pairs that are not valid UTF-8 cannot be looked up, but are still handed
    /// to every spawned tool through [`os_vars`](Self::os_vars).
    pub fn from_os_vars<I>(vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let mut env = BuildEnvironment::new();
        for (key, value) in vars {
            match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => {
                    env.inherited.insert(key, value);
                }
                (key, value) => {
                    let key = key.map_or_else(|raw| raw, OsString::from);
                    let value = value.map_or_else(|raw| raw, OsString::from);
                    tracing::debug!("keeping non-UTF-8 variable {:?} opaque", key);
                    env.opaque.insert(key, value);
                }
            }
        }
        env
    }

    /// Build an environment whose inherited layer is `vars`.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        BuildEnvironment {
            inherited: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            ..BuildEnvironment::default()
        }
    }

    /// Look up a variable, overlay first.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.overlay
            .get(key)
            .or_else(|| self.inherited.get(key))
            .map(String::as_str)
    }

    /// Whether the variable is defined in either layer.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Set a variable in the overlay.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.overlay.insert(key.into(), value.into());
    }

    /// Builder-style [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Keys chosen by the orchestrator, without the inherited layer.
    pub fn overlay(&self) -> &BTreeMap<String, String> {
        &self.overlay
    }

    /// The ambient snapshot this environment was seeded from.
    pub fn inherited(&self) -> &BTreeMap<String, String> {
        &self.inherited
    }

    /// Iterate the effective variables in key order.
    pub fn vars(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut merged: BTreeMap<&str, &str> = self
            .inherited
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        for (k, v) in &self.overlay {
            merged.insert(k, v);
        }
        merged.into_iter()
    }

    /// Every variable a spawned tool should see, opaque ones included.
    ///
    /// A UTF-8 entry shadows an opaque entry with the same key.
    pub fn os_vars(&self) -> impl Iterator<Item = (&OsStr, &OsStr)> {
        let mut merged: BTreeMap<&OsStr, &OsStr> = self
            .opaque
            .iter()
            .map(|(k, v)| (k.as_os_str(), v.as_os_str()))
            .collect();
        for (k, v) in self.vars() {
            merged.insert(OsStr::new(k), OsStr::new(v));
        }
        merged.into_iter()
    }
}
