//! uspto-load - load USPTO bulk patent XML dumps.

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use uspto_cli::commands;
use uspto_cli::logging;
use uspto_cli::{Cli, Config, Formatter};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --init-config may name a file that does not exist yet
    let fresh = cli.init_config && cli.config.as_deref().is_some_and(|p| !p.exists());
    let mut config = if fresh {
        Config::default()
    } else {
        Config::load(cli.config.as_deref()).context("loading configuration")?
    };
    config.apply_args(&cli).context("applying command-line options")?;

    let formatter = Formatter::new(config.settings.format, config.settings.color);

    if cli.init_config {
        let path = match &cli.config {
            Some(path) => path.clone(),
            None => Config::default_path()?,
        };
        commands::execute_init(&config, &path, &formatter)?;
        return Ok(());
    }

    logging::init_logging(&config.logging).context("initializing logging")?;

    let metrics = commands::execute_load(&cli.paths, &config)?;
    println!("{}", formatter.format_metrics(&metrics)?);

    Ok(())
}
