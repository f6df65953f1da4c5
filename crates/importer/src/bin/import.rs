use clap::{Parser, Subcommand};
use importer::{CatalogValidator, Result};
use std::path::{Path, PathBuf};
use storage::{Database, catalog::ParkCatalog, repository::park::ParkRepository};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "park-import")]
#[command(about = "Park catalog importer", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://parks.db")]
    database_url: String,

    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a catalog and insert parks that are not yet in the database
    Seed {
        #[arg(default_value = "park-images.json")]
        file: PathBuf,

        /// Seed even when validation reports errors
        #[arg(long)]
        force: bool,
    },
    /// Check a catalog without touching the database
    Validate {
        #[arg(default_value = "park-images.json")]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("park_import={},importer={},storage={}", log_level, log_level, log_level)
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Seed { file, force } => {
            handle_seed(&file, force, &cli.database_url).await?;
        }
        Commands::Validate { file } => {
            load_and_validate(&file)?;
        }
    }

    Ok(())
}

fn load_and_validate(file: &Path) -> Result<ParkCatalog> {
    tracing::info!("Loading park catalog from: {}", file.display());
    let catalog = ParkCatalog::from_path(file)?;
    tracing::info!("Loaded {} catalog entries", catalog.len());

    let report = CatalogValidator::validate(&catalog)?;
    report.log_warnings();
    tracing::info!("✓ Validation successful!");

    Ok(catalog)
}

async fn handle_seed(file: &Path, force: bool, database_url: &str) -> Result<()> {
    let catalog = match load_and_validate(file) {
        Ok(catalog) => catalog,
        Err(e) if force => {
            tracing::warn!("Seeding despite validation failure: {}", e);
            ParkCatalog::from_path(file)?
        }
        Err(e) => return Err(e),
    };

    tracing::info!("Opening database...");
    let db = Database::new(database_url).await?;
    db.run_migrations().await?;

    let repo = ParkRepository::new(db.pool());
    let report = repo.seed_catalog(&catalog).await?;
    tracing::info!(
        "✓ Seeding completed: {} inserted, {} already present",
        report.inserted,
        report.skipped
    );
    tracing::info!("Database contains {} parks", repo.count().await?);

    db.close().await;
    Ok(())
}
