mod collect;
mod rank;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "codeboard-cli")]
#[command(about = "Aggregate coding-profile statistics for a student roster")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch every student's profiles and write the aggregate JSON file
    Collect {
        /// Roster file (defaults to `CODEBOARD_ROSTER_PATH`)
        #[arg(long)]
        roster: Option<PathBuf>,
        /// Output file (defaults to `CODEBOARD_OUTPUT_PATH`)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Validate the roster and show what would be fetched, without network calls
        #[arg(long)]
        dry_run: bool,
    },
    /// Print standings from a previously written aggregate file
    Rank {
        /// Aggregate file (defaults to `CODEBOARD_OUTPUT_PATH`)
        #[arg(long)]
        input: Option<PathBuf>,
        /// Show only the top N students
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = codeboard_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Collect {
            roster,
            output,
            dry_run,
        }) => {
            let roster = roster.unwrap_or_else(|| config.roster_path.clone());
            let output = output.unwrap_or_else(|| config.output_path.clone());
            collect::run_collect(&config, &roster, &output, dry_run).await?;
        }
        Some(Commands::Rank { input, limit }) => {
            let input = input.unwrap_or_else(|| config.output_path.clone());
            rank::run_rank(&input, limit)?;
        }
        None => println!("codeboard-cli: run `collect` or `rank` (see --help)"),
    }

    Ok(())
}
