//! Store service entry point: loads settings, migrates the schema and serves
//! the HTTP API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context as _, Result, eyre};
use diesel::Connection as _;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use ortho_config::OrthoConfig as _;
use url::Url;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use merch_store::config::StoreSettings;
use merch_store::inbound::http::health::HealthState;
use merch_store::outbound::identity::IdentityHttpClient;
use merch_store::outbound::persistence::{DbPool, PoolConfig};
use server::{ServerConfig, create_server};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

fn run_migrations(database_url: &str) -> Result<()> {
    let mut conn =
        PgConnection::establish(database_url).wrap_err("connect for schema migrations")?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| eyre!("apply migrations: {err}"))?;
    info!(count = applied.len(), "schema migrations applied");
    Ok(())
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = StoreSettings::load().map_err(|err| eyre!("load settings: {err}"))?;

    let database_url = settings.database_url.clone();
    tokio::task::spawn_blocking(move || run_migrations(&database_url))
        .await
        .wrap_err("migration task panicked")??;

    let pool = DbPool::new(
        PoolConfig::new(settings.database_url.as_str()).with_max_size(settings.pool_max_size),
    )
    .await
    .map_err(|err| eyre!("database pool: {}", err.into_message()))?;

    let identity_url =
        Url::parse(settings.identity_url()).wrap_err("parse identity service url")?;
    let identity = IdentityHttpClient::new(identity_url, settings.identity_timeout())
        .wrap_err("build identity client")?;

    let config = ServerConfig::new(settings.bind_addr(), pool, identity)
        .with_request_timeout(settings.request_timeout())
        .with_start_balance(settings.start_balance());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &config)?;
    info!(addr = %settings.bind_addr(), "store listening");
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
