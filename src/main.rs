//! haku CLI entrypoint
//! Parses command-line arguments and dispatches to the project orchestrator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use haku::generation::{GenerationReport, ProjectOrchestrator};
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "haku")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Project directory containing haku.yml (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    working_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Generate controllers for every configured service
    Generate,
    /// Validate config and specs, and list the files generate would write
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let working_dir = match cli.working_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };
    info!(working_dir = %working_dir.display(), "Starting Haku");

    let orchestrator =
        ProjectOrchestrator::with_defaults().context("Failed to initialize generator")?;

    match cli.command {
        Commands::Generate => {
            let report = orchestrator
                .generate(&working_dir)
                .await
                .context("Generation failed")?;
            print_report(&working_dir, &report, "Wrote");
        }
        Commands::Check => {
            let report = orchestrator
                .check(&working_dir)
                .await
                .context("Check failed")?;
            print_report(&working_dir, &report, "Would write");
        }
    }

    Ok(())
}

fn print_report(working_dir: &Path, report: &GenerationReport, verb: &str) {
    for path in &report.written {
        let display = path.strip_prefix(working_dir).unwrap_or(path);
        let note = if report.overwritten.contains(path) {
            " (overwrite)"
        } else {
            ""
        };
        println!("{verb} {}{note}", display.display());
    }
    for service in &report.skipped_services {
        println!("Skipped service '{service}': no operations declared");
    }
    println!(
        "{} controller(s) from {} service(s)",
        report.generated_services.len(),
        report.generated_services.len() + report.skipped_services.len()
    );
}
