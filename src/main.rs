use std::process::ExitCode;

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

/// Initialise stderr logging. `RUST_LOG` overrides the per-command default.
fn init_logging(default_filter: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => "info,lexicon=debug",
        Commands::Convert { .. } => "info",
        _ => "warn",
    };
    init_logging(default_filter);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            ExitCode::FAILURE
        }
    }
}
