use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the sigma-deploy tool
#[derive(Debug)]
pub struct Args {
    /// Enable verbose output
    pub verbose: bool,

    /// Path to sigma.toml or directory containing it
    pub path: Option<PathBuf>,

    /// Deployment preset to run
    pub preset: Option<String>,

    /// Build output directory (deployment root)
    pub output_dir: Option<PathBuf>,

    /// Compiled server code directory
    pub server_dir: Option<PathBuf>,

    /// Runtime entries directory
    pub runtime_dir: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        let matches = command().get_matches();

        Self {
            verbose: matches.get_flag("verbose"),
            path: matches.get_one::<String>("path").map(PathBuf::from),
            preset: matches.get_one::<String>("preset").cloned(),
            output_dir: matches.get_one::<String>("output-dir").map(PathBuf::from),
            server_dir: matches.get_one::<String>("server-dir").map(PathBuf::from),
            runtime_dir: matches.get_one::<String>("runtime-dir").map(PathBuf::from),
        }
    }
}

fn command() -> Command {
    Command::new("sigma-deploy")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Run the post-build step of a Sigma deployment preset")
        .arg(
            Arg::new("path")
                .short('p')
                .long("path")
                .value_name("PATH")
                .help("Path to sigma.toml or directory containing it")
        )
        .arg(
            Arg::new("preset")
                .long("preset")
                .value_name("NAME")
                .env("SIGMA_PRESET")
                .help("Deployment preset (azure, node-server)")
        )
        .arg(
            Arg::new("output-dir")
                .short('o')
                .long("output-dir")
                .value_name("DIR")
                .help("Build output directory to deploy")
        )
        .arg(
            Arg::new("server-dir")
                .long("server-dir")
                .value_name("DIR")
                .help("Directory holding the compiled server (default: <output-dir>/server)")
        )
        .arg(
            Arg::new("runtime-dir")
                .long("runtime-dir")
                .value_name("DIR")
                .help("Directory holding the runtime entries")
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable verbose output")
        )
}
