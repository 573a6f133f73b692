mod categorize;
mod export;
mod generate;
mod plan;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use platemate_core::{FileStore, PlannerConfig, UserData};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "platemate")]
#[command(about = "PlateMate recipe and meal planning CLI", long_about = None)]
struct Cli {
    /// Record store directory (default: $PLATEMATE_DATA_DIR or ~/.platemate/data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate recipes from pantry ingredients
    Generate {
        /// Pantry ingredients, separated by commas or spaces
        pantry: String,
        /// Restrict cuisine styles (repeatable)
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,
        /// Number of recipes (default: $PLATEMATE_RECIPE_COUNT or 5)
        #[arg(long)]
        count: Option<usize>,
        /// Seed for reproducible output (default: $PLATEMATE_SEED)
        #[arg(long)]
        seed: Option<u64>,
        /// Print recipes as JSON
        #[arg(long)]
        json: bool,
        /// Remember the pantry for this user
        #[arg(long)]
        user: Option<String>,
        /// Put the first recipe on this day of the user's plan
        #[arg(long, requires_all = ["user", "slot"])]
        day: Option<String>,
        /// Meal slot (1 or 2) for --day
        #[arg(long, requires = "day")]
        slot: Option<String>,
    },
    /// Build the grocery list for a user's meal plan
    Grocery {
        #[arg(long)]
        user: String,
        #[arg(long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show or clear a user's meal plan
    Plan {
        #[command(subcommand)]
        action: PlanAction,
    },
    /// Print the grocery category of each ingredient
    Categorize {
        items: Vec<String>,
        /// Write an ingredient,category CSV file instead of printing
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
enum PlanAction {
    Show {
        #[arg(long)]
        user: String,
    },
    Clear {
        #[arg(long)]
        user: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Text,
    Html,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Seeded generator when a seed is given, thread-local randomness otherwise.
fn make_rng(seed: Option<u64>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(ChaCha8Rng::seed_from_u64(seed)),
        None => Box::new(rand::rng()),
    }
}

fn user_data(config: &PlannerConfig, user: &str) -> UserData {
    tracing::debug!(dir = %config.data_dir.display(), user, "Opening record store");
    UserData::new(Arc::new(FileStore::new(&config.data_dir)), user)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = PlannerConfig::from_env().context("Failed to read configuration")?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    match cli.command {
        Commands::Generate {
            pantry,
            cuisines,
            count,
            seed,
            json,
            user,
            day,
            slot,
        } => {
            let options = generate::GenerateOptions {
                cuisines,
                count: count.unwrap_or(config.recipe_count),
                seed: seed.or(config.seed),
                json,
                user,
                day,
                slot,
            };
            generate::generate(&config, &pantry, options).await?;
        }
        Commands::Grocery {
            user,
            format,
            output,
        } => {
            export::grocery(&config, &user, format, output.as_deref()).await?;
        }
        Commands::Plan { action } => match action {
            PlanAction::Show { user } => plan::show(&config, &user).await?,
            PlanAction::Clear { user } => plan::clear(&config, &user).await?,
        },
        Commands::Categorize { items, csv } => {
            categorize::categorize(&items, csv.as_deref())?;
        }
    }

    Ok(())
}
