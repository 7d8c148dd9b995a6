//! Brainnet CLI
//!
//! Converts the movie and story edge-list recordings into per-subject,
//! per-time-bucket GEXF graphs. With no arguments it reads
//! `./brain_networks/{movie,story}/` and writes to `./graphs/`.

use anyhow::Result;
use brainnet_batch::{convert_all, ConverterConfig};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "brainnet")]
#[command(
    author,
    version,
    about = "Convert brain-connectivity edge lists into time-bucketed GEXF graphs"
)]
struct Cli {
    /// Directory of movie-condition recordings
    #[arg(long)]
    movie_dir: Option<PathBuf>,
    /// Directory of story-condition recordings
    #[arg(long)]
    story_dir: Option<PathBuf>,
    /// Output directory for `.gexf` files (created if missing)
    #[arg(long)]
    out_dir: Option<PathBuf>,
    /// Log per-file diagnostics to stderr (overrides RUST_LOG)
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,
    /// Only log errors (overrides RUST_LOG)
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn config(&self) -> ConverterConfig {
        let defaults = ConverterConfig::default();
        ConverterConfig {
            movie_dir: self.movie_dir.clone().unwrap_or(defaults.movie_dir),
            story_dir: self.story_dir.clone().unwrap_or(defaults.story_dir),
            out_dir: self.out_dir.clone().unwrap_or(defaults.out_dir),
        }
    }

    fn log_level(&self) -> Option<Level> {
        if self.verbose {
            Some(Level::DEBUG)
        } else if self.quiet {
            Some(Level::ERROR)
        } else {
            None
        }
    }

    /// Filter directives: explicit flags, else `RUST_LOG`, else `warn`.
    fn filter_directives(&self, rust_log: Option<&str>) -> String {
        match (self.log_level(), rust_log) {
            (Some(level), _) => level.as_str().to_ascii_lowercase(),
            (None, Some(env)) if !env.trim().is_empty() => env.to_string(),
            (None, _) => "warn".to_string(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(cli.filter_directives(rust_log.as_deref()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    let summary = convert_all(&config)?;

    println!(
        "{} {} subjects → {} graphs in {} ({} duplicate records dropped)",
        "Converted".green().bold(),
        summary.subjects(),
        summary.files_written(),
        config.out_dir.display(),
        summary.duplicates_dropped()
    );
    Ok(())
}
