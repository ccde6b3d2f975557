//! Core data model: requests, environments, options and passes.

pub mod build_type;
pub mod env;
pub mod options;
pub mod pass;
pub mod request;

pub use build_type::BuildType;
pub use env::BuildEnvironment;
pub use options::{BuildOptionSet, OptionDefine, OptionValue};
pub use pass::ConfigurationPass;
pub use request::{BuildRequest, RawBuildArgs};
