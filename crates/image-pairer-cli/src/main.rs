use clap::{Parser, Subcommand};
use image_pairer_core::{logging, Config, ImagePairer};
use log::{error, info, warn};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "image-pairer")]
#[command(about = "Pair visually similar images across two directories")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for log files
    #[arg(long, global = true, default_value = "logs")]
    log_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match images across two directories and write results plus report
    Match {
        /// Directory holding the images to find matches for
        directory_a: PathBuf,

        /// Directory holding the match candidates
        directory_b: PathBuf,

        /// Scratch directory for cached thumbnails (must exist)
        #[arg(long, default_value = "thumbnails")]
        cache_dir: PathBuf,

        /// Where to persist the match results
        #[arg(long, default_value = "pair-results.json")]
        results: PathBuf,

        /// Where to write the HTML report
        #[arg(long, default_value = "pair-report.html")]
        report: PathBuf,

        /// File extensions eligible for comparison
        #[arg(long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// How many files to match concurrently
        #[arg(long, default_value_t = 2)]
        concurrency: usize,
    },

    /// Rebuild the HTML report from previously persisted results
    Report,

    /// Show the renames the persisted results propose
    Apply {
        /// Actually perform the renames instead of printing them
        #[arg(long)]
        execute: bool,
    },

    /// Generate default configuration file
    GenerateConfig {
        /// Path to save configuration file
        #[arg(default_value = "image-pairer.json")]
        path: PathBuf,
    },
}

fn load_config(path: &Option<PathBuf>) -> Result<Config, anyhow::Error> {
    match path {
        Some(path) => Ok(Config::from_file(path)?),
        None => Ok(Config::default()),
    }
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // File logging keeps the progress bar output clean; fall back to the
    // console when the log directory cannot be set up
    if let Err(e) = logging::init_logger(&cli.log_dir) {
        env_logger::init();
        warn!("File logging unavailable ({}), logging to console", e);
    }

    match cli.command {
        Commands::Match {
            directory_a,
            directory_b,
            cache_dir,
            results,
            report,
            extensions,
            concurrency,
        } => {
            let mut config = load_config(&cli.config)?;

            // Command line arguments override config file values
            config.directory_a = directory_a;
            config.directory_b = directory_b;
            config.cache_dir = cache_dir;
            config.results_path = results;
            config.report_path = report;
            config.match_concurrency = concurrency;
            if let Some(extensions) = extensions {
                config.allowed_extensions = extensions;
            }

            config.validate()?;

            let pairer = ImagePairer::new(config);

            info!("Starting image pairing...");
            if let Err(e) = pairer.run() {
                error!("Pairing failed: {}", e);
                return Err(e.into());
            }
            info!("Pairing complete");

            Ok(())
        }

        Commands::Report => {
            let config = load_config(&cli.config)?;
            let pairer = ImagePairer::new(config);

            pairer.rebuild_report()?;
            println!("Report rebuilt");

            Ok(())
        }

        Commands::Apply { execute } => {
            let config = load_config(&cli.config)?;
            let pairer = ImagePairer::new(config);

            let plans = pairer.planned_renames()?;
            if plans.is_empty() {
                println!("Nothing to rename");
                return Ok(());
            }

            for plan in &plans {
                println!("{}", plan.as_command());
                if execute {
                    plan.apply()?;
                }
            }

            if !execute {
                println!("Re-run with --execute to perform these renames");
            }

            Ok(())
        }

        Commands::GenerateConfig { path } => {
            let config = Config::default();
            config.save_to_file(&path)?;
            println!("Configuration file generated at: {}", path.display());
            Ok(())
        }
    }
}
