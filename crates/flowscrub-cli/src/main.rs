mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use flowscrub_config::Config;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Progress lines already report each file, so logs are opt-in
    let default_filter = match cli.verbose {
        0 => "off",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir()?;

    let command = cli
        .command
        .unwrap_or_else(|| cli::Commands::Run(cli::RunArgs::default()));

    match command {
        cli::Commands::Init => commands::init::handle(&cwd),
        cli::Commands::Run(args) => {
            let resolved = Config::resolve(cli.config.as_deref(), &cwd)?;
            commands::run::handle(args, resolved, &cwd)
        }
        cli::Commands::File { input, output } => {
            let resolved = Config::resolve(cli.config.as_deref(), &cwd)?;
            commands::file::handle(&resolved.config, &input, output.as_deref())
        }
        cli::Commands::Check { inputs } => {
            let resolved = Config::resolve(cli.config.as_deref(), &cwd)?;
            commands::check::handle(inputs, resolved, &cwd)
        }
    }
}
