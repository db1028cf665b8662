// 🏗️ Salon Directory CLI - build or inspect a site from a zipped CSV dataset

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use salon_directory::{inspect, run, FileSink, MemorySink, SiteConfig};

#[derive(Parser)]
#[command(name = "salon-directory", version, about = "Generate a static salon directory site from a zipped CSV dataset")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the full site: pages, sitemaps and JSON snapshots
    Build {
        /// Zip archive with salons.csv, cities.csv, states.csv, categories.csv
        #[arg(long)]
        archive: Option<PathBuf>,
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// TOML config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Origin used for canonical and sitemap URLs
        #[arg(long)]
        base_url: Option<String>,
        /// Generate everything in memory without writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Load and resolve the dataset, then print the resolution report
    Inspect {
        #[arg(long)]
        archive: Option<PathBuf>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<PathBuf>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::from_file(path),
        None => Ok(SiteConfig::default()),
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("salon-directory {} started", salon_directory::VERSION);

    if let Err(err) = run_command(cli.command) {
        eprintln!("❌ Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run_command(command: Commands) -> Result<()> {
    match command {
        Commands::Build {
            archive,
            out,
            config,
            base_url,
            dry_run,
        } => {
            let mut config = load_config(config)?;
            if let Some(archive) = archive {
                config = config.with_archive(archive);
            }
            if let Some(out) = out {
                config = config.with_output_dir(out);
            }
            if let Some(base_url) = base_url {
                config = config.with_base_url(&base_url);
            }

            println!("🏗️  Building site from {:?}", config.archive);
            let report = if dry_run {
                let sink = MemorySink::new();
                run(&config, &sink)?
            } else {
                let sink = FileSink::new(&config.output_dir);
                run(&config, &sink)?
            };

            println!("{}", report.summary());
            if dry_run {
                println!("✓ Dry run: {} documents generated, nothing written", report.documents_written());
            } else {
                println!("✓ {} documents written to {:?}", report.documents_written(), config.output_dir);
            }
        }
        Commands::Inspect { archive, config } => {
            let mut config = load_config(config)?;
            if let Some(archive) = archive {
                config = config.with_archive(archive);
            }

            let report = inspect(&config)?;
            println!("{}", report.summary());
        }
    }

    Ok(())
}
