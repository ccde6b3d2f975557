//! uuid-build CLI - builds stduuid in Debug and/or Release

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::Cli;
use uuid_build::builder::{CMakeProjectBuilder, WhichProbe};
use uuid_build::core::BuildEnvironment;
use uuid_build::ops::{build, BuildOptions};
use uuid_build::util::config::{global_config_path, load_config, project_config_path, Config};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("uuid_build=debug")
    } else {
        EnvFilter::new("uuid_build=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // Configuration only exists once we know where the project is
    let config = match cli.base_path {
        Some(ref base) => load_config(global_config_path().as_deref(), &project_config_path(base)),
        None => Config::default(),
    };

    let request = cli.raw_args(config.build.options.clone()).validate()?;

    let ambient = BuildEnvironment::from_process();
    let builder = CMakeProjectBuilder::new().jobs(cli.jobs.or(config.build.jobs));
    let opts = BuildOptions {
        feature_prefix: config.feature_prefix().to_string(),
        emit_plan: cli.plan,
    };

    let result = build(&request, &ambient, &WhichProbe, &builder, &opts)?;

    if cli.plan {
        println!("{}", serde_json::to_string_pretty(&result.passes)?);
    } else {
        for build_type in &result.built {
            eprintln!("    Finished `{}` configuration", build_type);
        }
    }

    Ok(())
}
