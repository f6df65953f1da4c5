use anyhow::Context;
use storage::{Database, catalog::ParkCatalog, repository::park::ParkRepository};
use tokio::net::TcpListener;
use tokio::signal;
use utoipa::OpenApi;

mod config;
mod error;
mod features;
mod routes;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    paths(
        features::parks::handlers::list_parks,
        features::parks::handlers::get_pair,
        features::parks::handlers::get_park,
        features::ranking::handlers::get_rankings,
        features::votes::handlers::record_vote,
        features::votes::handlers::recent_votes,
    ),
    components(
        schemas(
            storage::models::Park,
            storage::models::Vote,
            storage::dto::park::RankingEntry,
            storage::dto::vote::VoteRequest,
            storage::dto::vote::VoteResponse,
            storage::dto::vote::RatingOutcome,
            storage::dto::vote::RecentVote,
            storage::dto::common::ErrorResponse,
        )
    ),
    tags(
        (name = "parks", description = "Park catalog and voting pairs"),
        (name = "rankings", description = "Leaderboard endpoints"),
        (name = "votes", description = "Vote recording and history"),
    )
)]
pub struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Park Rank API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!("Opening database at: {}", config.database_url);
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    seed_parks(&db, &config).await?;

    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, routes::router(db.clone()))
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Closing database");
    db.close().await;

    Ok(())
}

async fn seed_parks(db: &Database, config: &Config) -> anyhow::Result<()> {
    if !config.park_catalog.exists() {
        tracing::warn!(
            "Park catalog not found at {}, skipping seeding",
            config.park_catalog.display()
        );
        return Ok(());
    }

    let catalog = ParkCatalog::from_path(&config.park_catalog)
        .context("Failed to load park catalog")?;
    tracing::info!(
        "Loaded {} parks from {}",
        catalog.len(),
        config.park_catalog.display()
    );

    let repo = ParkRepository::new(db.pool());
    let report = repo
        .seed_catalog(&catalog)
        .await
        .context("Failed to seed parks")?;
    tracing::info!(
        "Seeded parks: {} inserted, {} already present",
        report.inserted,
        report.skipped
    );
    tracing::info!("Database contains {} parks", repo.count().await?);

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn wait_for_shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
