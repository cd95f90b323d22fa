mod cmd_report;
mod cmd_show;
mod cmd_sync;
mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "confab", version, about = "Meeting transcript analytics sync")]
struct Cli {
    /// Transcription provider API key
    #[arg(long, env = "CONFAB_API_KEY", global = true, hide_env_values = true)]
    api_key: Option<String>,

    /// Data directory (records, reports, sync state)
    #[arg(long, env = "CONFAB_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, analyze, and store recent meeting transcripts
    Sync {
        /// Maximum number of meetings to list
        #[arg(long, default_value_t = confab_sync::DEFAULT_LIMIT)]
        limit: usize,
        /// Log intended writes without performing them
        #[arg(long)]
        dry_run: bool,
        /// Reprocess meetings that already have a record
        #[arg(long)]
        force: bool,
        /// Include the full transcript in rendered reports
        #[arg(long)]
        verbose: bool,
        /// Pause between meetings, in milliseconds
        #[arg(long, default_value_t = 500)]
        delay_ms: u64,
    },
    /// Print a stored analytics record
    Show {
        /// Meeting id
        id: String,
        /// Output the full record as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stored markdown report
    Report {
        /// Meeting id
        id: String,
    },
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.cmd {
        Command::Sync {
            limit,
            dry_run,
            force,
            verbose,
            delay_ms,
        } => cmd_sync::run(
            cli.api_key,
            cli.data_dir,
            cmd_sync::SyncArgs {
                limit,
                dry_run,
                force,
                verbose,
                delay_ms,
            },
        ),
        Command::Show { id, json } => cmd_show::run(cli.data_dir, &id, json),
        Command::Report { id } => cmd_report::run(cli.data_dir, &id),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("confab: {err:#}");
            let code = if err.downcast_ref::<config::ConfigError>().is_some() {
                2
            } else {
                1
            };
            std::process::exit(code);
        }
    }
}
