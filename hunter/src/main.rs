//! Job hunter
//!
//! Searches the configured job boards once, keeps postings that match the
//! qualification profile and writes internships and entry-level jobs to
//! separate CSV files.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use hunter::config::{self, FileConfig, HunterConfig, SourceConfig};
use hunter::{logging, pipeline, source, Categorizer, OutputTargets};

#[derive(Debug, Parser)]
#[command(name = "job-hunter")]
#[command(about = "Sort matching job postings into internship and entry-level CSV files", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.config/job-hunter/config.toml.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory for the CSV files.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Prefix output file names with the current time instead of overwriting.
    #[arg(long)]
    timestamped: bool,

    /// Read postings from local JSON files instead of the configured sources.
    #[arg(long = "input", value_name = "FILE")]
    inputs: Vec<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> Result<HunterConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        if let Some(dir) = &self.output_dir {
            cfg.output.dir = dir.clone();
        }
        if self.timestamped {
            cfg.output.timestamped = true;
        }
        if !self.inputs.is_empty() {
            cfg.sources = self
                .inputs
                .iter()
                .map(|path| {
                    SourceConfig::File(FileConfig {
                        name: path.display().to_string(),
                        path: path.clone(),
                    })
                })
                .collect();
        }
        Ok(cfg)
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = cli.load_config()?;
    let started = chrono::Local::now();

    println!("🔍 Starting job search for {}...", cfg.profile.job_type);
    if cfg.sources.is_empty() {
        tracing::warn!("no sources configured");
        println!("⚠️  No sources configured; writing empty files");
    }

    let sources = source::build_sources(&cfg.sources, &cfg.http)?;
    let categorizer = Categorizer::new(cfg.keywords.clone());
    let targets = OutputTargets::from_config(&cfg.output, started);

    let summary = pipeline::run(&sources, &cfg.profile, &categorizer, &targets)?;

    println!("📊 Fetched {} postings, {} matched the profile", summary.fetched, summary.matched);
    println!(
        "💾 Saved {} internships to {}",
        summary.internships,
        targets.internships.display()
    );
    println!(
        "💾 Saved {} entry-level positions to {}",
        summary.entry_level,
        targets.entry_level.display()
    );
    if summary.uncategorized > 0 {
        println!("   ({} matching postings fit neither category)", summary.uncategorized);
    }
    println!("✨ Job search completed!");
    Ok(())
}

fn main() {
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        tracing::error!("run failed: {:#}", err);
        eprintln!("job-hunter error: {:#}", err);
        std::process::exit(1);
    }
}
