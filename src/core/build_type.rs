//! Build configurations.

use std::fmt;

use serde::Serialize;

/// A CMake build configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    /// All configurations, in the order passes run.
    pub const ALL: [BuildType; 2] = [BuildType::Debug, BuildType::Release];

    /// The name CMake expects for `CMAKE_BUILD_TYPE`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
