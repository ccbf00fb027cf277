use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bk_cli::commands::{build, gaps};
use bk_cli::{Cli, Commands, Config};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Build {
            trips,
            status,
            output,
            json,
        }) => {
            let config = Config::load_from(cli.config.as_deref())
                .context("failed to load configuration")?;
            tracing::debug!(?config, "loaded configuration");
            let output = output.as_deref().unwrap_or(&config.output_path);
            build::run(trips, status, output, *json)?;
        }
        Some(Commands::Gaps { trips }) => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            gaps::run(&mut handle, trips)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
