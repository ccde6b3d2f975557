//! Project builders and tool probes.
//!
//! A [`ProjectBuilder`] runs one configuration pass to completion: configure,
//! build and the optional install/test steps. It is the only place that
//! spawns build tools or writes into the build directory.

pub mod cmake;
pub mod probe;

use anyhow::Result;

use crate::core::pass::ConfigurationPass;
use crate::core::request::BuildRequest;

pub use cmake::CMakeProjectBuilder;
pub use probe::{ToolProbe, WhichProbe};

/// Executes a single build pass.
///
/// `build` blocks until the pass has finished. Implementations are called
/// once per selected configuration, one at a time.
pub trait ProjectBuilder {
    fn build(&self, request: &BuildRequest, pass: &ConfigurationPass) -> Result<()>;
}

impl<B: ProjectBuilder + ?Sized> ProjectBuilder for &B {
    fn build(&self, request: &BuildRequest, pass: &ConfigurationPass) -> Result<()> {
        (**self).build(request, pass)
    }
}
