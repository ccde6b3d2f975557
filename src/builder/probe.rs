//! Tool reachability checks.

use std::path::PathBuf;

use crate::core::env::BuildEnvironment;

/// Reports whether a named executable is reachable from an environment.
pub trait ToolProbe {
    /// Resolve `name` using the `PATH` of `env`. `None` means absent.
    fn probe(&self, name: &str, env: &BuildEnvironment) -> Option<PathBuf>;
}

/// Looks tools up on the environment's `PATH`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhichProbe;

impl ToolProbe for WhichProbe {
    fn probe(&self, name: &str, env: &BuildEnvironment) -> Option<PathBuf> {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        match which::which_in(name, env.get("PATH"), cwd) {
            Ok(path) => {
                tracing::debug!("found `{}` at {}", name, path.display());
                Some(path)
            }
            Err(e) => {
                tracing::debug!("`{}` not reachable: {}", name, e);
                None
            }
        }
    }
}
