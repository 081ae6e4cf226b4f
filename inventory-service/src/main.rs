use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use diesel::PgConnection;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

use anyhow::Result;
use clap::Parser;
use diesel::Connection;
use diesel_async::{pooled_connection::bb8::Pool, AsyncPgConnection};
use inventory_service::api::{self, AppState};
use inventory_service::config::{Args, StoreKind};
use inventory_service::flash::FlashKey;
use inventory_service::memory::MemoryInventoryStore;
use inventory_service::store::{InventoryStore, PgInventoryStore};
use inventory_service::workflow::InventoryWorkflow;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let store: Arc<dyn InventoryStore> = match args.store {
        StoreKind::Postgres => {
            let database_url = args.database_url();

            // Run migrations first
            info!("Running database migrations...");
            let mut conn = PgConnection::establish(&database_url)?;
            conn.run_pending_migrations(MIGRATIONS).map_err(|e| anyhow::anyhow!("Migration error: {}", e))?;
            info!("Migrations completed successfully");

            let config = diesel_async::pooled_connection::AsyncDieselConnectionManager::<AsyncPgConnection>::new(&database_url);
            let pool = Pool::builder().max_size(args.pool_size).build(config).await?;
            Arc::new(PgInventoryStore::new(pool))
        }
        StoreKind::Memory => {
            warn!("Using the in-memory store; records are lost on shutdown");
            Arc::new(MemoryInventoryStore::new())
        }
    };

    let app_state = AppState {
        workflow: InventoryWorkflow::new(store),
        flash_key: FlashKey::new(&args.secret_key),
    };

    let app = api::create_router(app_state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", args.port)).await?;

    info!("Inventory service started on port {}", args.port);
    info!("Inventory listing available at http://0.0.0.0:{}/", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
