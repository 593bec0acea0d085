//! docgate CLI - CI gates for a static documentation site.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "docgate")]
#[command(about = "CI gates for a static documentation site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docgate.toml config file
    #[arg(short, long, default_value = "docgate.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default docgate.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },

    /// Run the site build and check that the output directory exists
    VerifyBuild {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Scan Markdown/MDX sources for empty or "#" link targets
    CheckLinks {
        /// Docs source directory (defaults to config or "src/content/docs")
        #[arg(short, long)]
        docs: Option<PathBuf>,

        /// Print a JSON report on stdout
        #[arg(long)]
        json: bool,
    },

    /// Time the site build and check output size against budgets
    Perf {
        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Build time budget in milliseconds
        #[arg(long)]
        max_build_ms: Option<u64>,

        /// Output size budget in bytes
        #[arg(long)]
        max_output_bytes: Option<u64>,

        /// Print a JSON report on stdout
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    fn wants_json(&self) -> bool {
        matches!(
            self,
            Commands::CheckLinks { json: true, .. } | Commands::Perf { json: true, .. }
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Keep stdout clean for JSON reports
    if cli.command.wants_json() {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    // Execute command
    let result = match cli.command {
        Commands::Init { yes } => commands::init::run(&cli.config, yes).await,
        Commands::VerifyBuild { output } => commands::verify::run(&cli.config, output).await,
        Commands::CheckLinks { docs, json } => commands::links::run(&cli.config, docs, json).await,
        Commands::Perf {
            output,
            max_build_ms,
            max_output_bytes,
            json,
        } => {
            let overrides = commands::perf::Overrides {
                output,
                max_build_ms,
                max_output_bytes,
            };
            commands::perf::run(&cli.config, overrides, json).await
        }
    };

    match result {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::error!("❌ {:#}", e);
            ExitCode::FAILURE
        }
    }
}
