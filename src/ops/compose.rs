//! Environment composition and generator selection.
//!
//! Ninja is preferred when it is reachable. An ambient `CMAKE_GENERATOR`
//! always wins: it decides whether Ninja is in use and is never rewritten.

use crate::builder::probe::ToolProbe;
use crate::core::env::{BuildEnvironment, GENERATOR_KEY};

/// Executable probed for the Ninja generator.
pub const NINJA: &str = "ninja";

/// Derives the base build environment from an ambient snapshot.
pub struct EnvironmentComposer<'a, P: ToolProbe + ?Sized> {
    probe: &'a P,
}

impl<'a, P: ToolProbe + ?Sized> EnvironmentComposer<'a, P> {
    pub fn new(probe: &'a P) -> Self {
        EnvironmentComposer { probe }
    }

    /// Layer the orchestrator's keys over `ambient`, returning a new mapping.
    pub fn compose(&self, ambient: &BuildEnvironment) -> BuildEnvironment {
        let mut env = ambient.clone();

        let mut use_ninja = self.probe.probe(NINJA, &env).is_some();
        let pinned = env.get(GENERATOR_KEY).map(str::to_owned);
        if let Some(ref existing) = pinned {
            use_ninja = existing.eq_ignore_ascii_case(NINJA);
        }

        tracing::debug!(
            use_ninja,
            pinned = pinned.as_deref().unwrap_or("<unset>"),
            "selected generator"
        );

        if use_ninja && pinned.is_none() {
            env.set(GENERATOR_KEY, NINJA);
        }

        env
    }
}
