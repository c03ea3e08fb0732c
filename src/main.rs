use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use planboard::{Plan, Studio, StudioConfig};

#[derive(Parser, Debug)]
#[command(
    name = "planboard",
    version,
    about = "Render, capture, and share AI-generated year roadmaps"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a generation exchange and print (or save) the resulting plan
    Generate {
        /// The goal or request to send to the generation endpoint
        #[arg(long)]
        message: String,
        /// Generation endpoint override
        #[arg(long)]
        endpoint: Option<String>,
        /// Write the plan JSON to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Capture a plan and save it as a single-page PDF
    Export {
        /// Plan JSON produced by `generate --out`
        #[arg(long)]
        plan: PathBuf,
        /// Directory for the exported document (defaults to the current one)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Capture a plan's summary card and publish it to the share endpoint
    Share {
        /// Plan JSON produced by `generate --out`
        #[arg(long)]
        plan: PathBuf,
        /// Share endpoint override
        #[arg(long)]
        endpoint: Option<String>,
    },
}

fn load_plan(path: &PathBuf) -> Result<Plan> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read plan from {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} does not contain a valid plan", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { message, endpoint, out } => {
            let mut config = StudioConfig::default();
            if let Some(endpoint) = endpoint {
                config.generate_endpoint = endpoint;
            }
            let mut studio = Studio::new(config)?;
            match studio.generate(&message) {
                Ok(plan) => {
                    println!("{} ({}% success)", plan.title, plan.success_rate);
                    if let Some(out) = out {
                        let json = serde_json::to_string_pretty(plan)?;
                        fs::write(&out, json)
                            .with_context(|| format!("failed to write {}", out.display()))?;
                        println!("Saved plan to {}", out.display());
                    }
                }
                Err(err) => {
                    if let Some(line) = studio.error_line() {
                        eprintln!("{}", line);
                    }
                    return Err(err.into());
                }
            }
        }
        Commands::Export { plan, out_dir } => {
            let mut studio = Studio::new(StudioConfig::default())?;
            studio.load_plan(load_plan(&plan)?);
            let dir = out_dir.unwrap_or_else(|| PathBuf::from("."));
            let path = studio.export_pdf(&dir)?;
            println!("Saved {}", path.display());
        }
        Commands::Share { plan, endpoint } => {
            let mut config = StudioConfig::default();
            if let Some(endpoint) = endpoint {
                config.share_endpoint = endpoint;
            }
            let mut studio = Studio::new(config)?;
            studio.load_plan(load_plan(&plan)?);
            let outcome = studio.share()?;
            println!("Share URL: {}", outcome.share_url);
            println!("Composer:  {}", outcome.composer_url);
        }
    }

    Ok(())
}
