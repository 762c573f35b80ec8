use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

mod commands;

#[derive(Parser)]
#[command(name = "foxprep")]
#[command(author, version)]
#[command(
    about = "First-run automation for the MetaMask browser extension",
    long_about = "Foxprep fetches the MetaMask extension, launches a Chromium-family browser \
                  with it loaded, creates a wallet through the onboarding flow, and configures \
                  a custom network, leaving the browser open and ready to use."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log file, truncated on every run
    #[arg(long, global = true, default_value = "foxprep.log", value_name = "FILE")]
    log_file: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full setup: extension, wallet, custom network
    Setup(commands::setup::SetupArgs),

    /// Download and unpack the MetaMask extension without launching a browser
    Fetch(commands::fetch::FetchArgs),

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Completion scripts are parsed from stdout; keep log output away from them
    let _guard = match &cli.command {
        Commands::Completion { .. } => None,
        _ => init_logging(cli.verbose, &cli.log_file),
    };

    match cli.command {
        Commands::Setup(args) => commands::setup::execute(args),
        Commands::Fetch(args) => commands::fetch::execute(args),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            commands::completion::execute(shell, &mut cmd)
        }
    }
}

fn init_logging(
    verbose: bool,
    log_file: &Path,
) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = if verbose {
        EnvFilter::new(
            "foxprep=debug,foxprep_extension=debug,foxprep_browser=debug,foxprep_wallet=debug",
        )
    } else {
        EnvFilter::new(
            "foxprep=info,foxprep_extension=info,foxprep_browser=info,foxprep_wallet=info",
        )
    };

    let console = tracing_subscriber::fmt::layer()
        .with_target(false)
        .without_time();

    // Truncate the log each run
    match std::fs::File::create(log_file) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(file_layer)
                .init();
            Some(guard)
        }
        Err(err) => {
            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .init();
            tracing::warn!(
                "Could not open log file {} ({}), logging to console only",
                log_file.display(),
                err
            );
            None
        }
    }
}
