use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flavor_api::auth::{generate_jwt, Claims};
use flavor_api::config::{AppConfig, StoreBackend};
use flavor_api::database::{DatabaseManager, MemoryStore, PgStore, Store};
use flavor_api::{app, AppState};

#[derive(Parser)]
#[command(name = "flavor-api")]
#[command(about = "REST API over the flavor, ingredient and preparation catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Run the HTTP server (default)")]
    Serve,

    #[command(about = "Print a bearer token signed with the configured secret")]
    Token {
        #[arg(long, help = "User name placed in the token subject")]
        user: String,
        #[arg(long, help = "Numeric user id")]
        user_id: i64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("flavor_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Token { user, user_id } => {
            let claims = Claims::new(user, user_id, config.security.jwt_expiry_hours);
            println!("{}", generate_jwt(&claims, &config.security.jwt_secret)?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tracing::info!("Starting flavor API in {:?} mode", config.environment);

    let store: Arc<dyn Store> = match config.database.backend {
        StoreBackend::Postgres => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to open database pool")?;
            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            tracing::warn!("Serving the in-memory fixture catalog; changes are not persisted");
            Arc::new(MemoryStore::with_fixture())
        }
    };

    let bind_addr = config.bind_addr();
    let state = AppState::new(store, config);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Flavor API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.context("server error")?;
    Ok(())
}
