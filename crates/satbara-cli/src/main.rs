//! Sat Bara CLI - Command-line interface for 7/12 extraction.

use clap::Parser;
use satbara_cli::commands;
use satbara_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> satbara_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    satbara_cli::init_logging(cli.verbose);

    // Load config, then apply per-invocation overrides
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let mut config = Config::load_from(&config_path)?;
    config.apply_overrides(cli.endpoint, cli.model);

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Extract(args) => commands::execute_extract(args, &config, &formatter).await?,
        Command::List => commands::execute_list(&config, &formatter).await?,
        Command::Clear(args) => commands::execute_clear(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?
        }
    }

    Ok(())
}
