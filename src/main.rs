mod archive;
mod args;
mod config;
mod context;
mod error;
mod manifest;
mod preset;
mod presets;
mod result;
mod tpl;
mod utils;

use args::Args;
use config::{Config, Overrides};
use context::{BuildOutput, Context};
use error::Error;
use preset::Preset;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    // Parse command-line arguments
    let Args {
        verbose,
        path,
        preset,
        output_dir,
        server_dir,
        runtime_dir,
    } = Args::parse();

    // Resolve configuration: flags, then sigma.toml, then defaults
    let config_path = utils::find_config(path.as_deref())?;
    let cwd = std::env::current_dir()?;
    let from_cwd = |dir: Option<std::path::PathBuf>| dir.map(|dir| utils::resolve(&cwd, &dir));
    let config = Config::load(
        config_path.as_deref(),
        &cwd,
        Overrides {
            preset,
            output_dir: from_cwd(output_dir),
            server_dir: from_cwd(server_dir),
            runtime_dir: from_cwd(runtime_dir),
        },
    )?;

    let ctx = Context::new(config.base_dir.clone(), verbose).with_runtime_dir(config.runtime_dir.clone());
    let preset = Preset::find(&config.preset)?;

    if !config.output_dir.is_dir() {
        return Err(Error::OutputNotFound(config.output_dir.display().to_string()));
    }
    let output = BuildOutput::new(config.output_dir, config.server_dir);

    // Use cliclack for nice UI
    cliclack::intro("sigma")?;

    let mut info = format!("Preset {}", preset.name);
    if let Some(base) = preset.extends {
        info.push_str(&format!(" (extends {})", base));
    }
    cliclack::log::info(info)?;
    if verbose {
        cliclack::log::remark(format!("Entry: {}", preset.entry(&ctx)))?;
        cliclack::log::remark(format!(
            "Serve static: {}, inline chunks: {}",
            preset.serve_static,
            preset.inline_chunks.map_or("default".to_string(), |v| v.to_string())
        ))?;
        cliclack::log::remark(format!("Output: {}", utils::pretty_path(&output.root_dir, &ctx.base_dir)))?;
    }

    // Run post-build hooks
    let messages = if preset.hooks.compiled.is_empty() {
        Vec::new()
    } else {
        let spinner = cliclack::spinner();
        spinner.start(format!("Running {} post-build steps...", preset.name));
        match preset.run_compiled(&ctx, &output) {
            Ok(messages) => {
                spinner.stop(format!("{} post-build steps completed", preset.name));
                messages
            }
            Err(e) => {
                spinner.error(format!("{} post-build steps failed", preset.name));
                return Err(e);
            }
        }
    };

    for message in &messages {
        cliclack::log::success(message)?;
    }

    if let Some(preview) = preset.preview {
        cliclack::log::info(format!("You can preview this build using `{}`", preview))?;
    }

    cliclack::outro("Build output is ready for deployment")?;
    Ok(())
}
