//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use uuid_build::core::{BuildOptionSet, OptionDefine, RawBuildArgs};

/// Build stduuid with CMake, in Debug and/or Release
#[derive(Parser)]
#[command(name = "uuid-build")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("configuration").multiple(false)))]
pub struct Cli {
    /// uuid base path (CMakeLists.txt folder)
    #[arg(short = 'b', long)]
    pub base_path: Option<PathBuf>,

    /// uuid build directory
    #[arg(long)]
    pub build_dir: Option<PathBuf>,

    /// uuid install directory
    #[arg(short, long)]
    pub install_dir: Option<PathBuf>,

    /// Library version label, used in the default build directory
    #[arg(long, value_name = "VERSION")]
    pub lib_version: Option<String>,

    /// Delete cache and reconfigure
    #[arg(short = 'r', long)]
    pub rm_cache_reconfig: bool,

    /// Reconfigure
    #[arg(long, visible_alias = "rec")]
    pub rerun_config: bool,

    /// Remove CMake cache
    #[arg(long, visible_alias = "rmc")]
    pub rm_cache: bool,

    /// Stop once cmake terminates. Leave users a chance to adjust build options
    #[arg(short, long, conflicts_with = "build_only")]
    pub cmake_only: bool,

    /// Skip configuration and only build
    #[arg(long)]
    pub build_only: bool,

    /// Build test cases
    #[arg(long)]
    pub build_test: bool,

    /// Build the Release configuration only
    #[arg(long, group = "configuration")]
    pub release: bool,

    /// Build the Debug configuration only
    #[arg(long, group = "configuration")]
    pub debug: bool,

    /// Build both Debug and Release
    #[arg(long, group = "configuration")]
    pub build_all: bool,

    /// Extra CMake option, NAME=VALUE (repeatable)
    #[arg(short = 'D', long = "define", value_name = "NAME=VALUE")]
    pub defines: Vec<OptionDefine>,

    /// Number of parallel build jobs
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Print the configuration passes as JSON and exit without building
    #[arg(long)]
    pub plan: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Raw request arguments, with `options` as the lowest caller layer.
    pub fn raw_args(&self, mut options: BuildOptionSet) -> RawBuildArgs {
        options.extend(
            self.defines
                .iter()
                .map(|d| (d.name.clone(), d.value.clone())),
        );

        RawBuildArgs {
            base_path: self.base_path.clone(),
            build_dir: self.build_dir.clone(),
            install_dir: self.install_dir.clone(),
            version: self.lib_version.clone(),
            rm_cache_reconfig: self.rm_cache_reconfig,
            rerun_config: self.rerun_config,
            rm_cache: self.rm_cache,
            cmake_only: self.cmake_only,
            build_only: self.build_only,
            build_test: self.build_test,
            debug: self.debug,
            release: self.release,
            build_all: self.build_all,
            options,
        }
    }
}
