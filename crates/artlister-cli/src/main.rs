//! ArtLister CLI - turn scripts and office documents into prop inventories.

use artlister_cli::commands;
use artlister_cli::{AppConfig, Cli, Command, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> artlister_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Config file defaults to the application directory
    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let base_dir = AppConfig::base_dir(&config_path);

    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Init(args) => {
            commands::execute_init(args, &config_path, &base_dir, &formatter)?;
        }
        Command::Config => {
            let config = AppConfig::load(&config_path)?;
            commands::execute_show_config(&config, &config_path, &base_dir, &formatter)?;
        }
        Command::Process(args) => {
            let config = AppConfig::load(&config_path)?;
            commands::execute_process(args, &config, &base_dir, &formatter)?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
