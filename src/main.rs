use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use coupon_cutter::adapters::auth::{Argon2PasswordHasher, JwtTokenCodec};
use coupon_cutter::adapters::http;
use coupon_cutter::adapters::memory::{InMemoryCouponStore, InMemoryIdentityStore};
use coupon_cutter::adapters::postgres::{
    run_migrations, PostgresCouponRepository, PostgresIdentityRepository,
};
use coupon_cutter::application::{IdentityService, RedemptionEngine, StorageDeadline};
use coupon_cutter::config::{AppConfig, ConfigError};
use coupon_cutter::domain::foundation::{DomainError, ValidationError};
use coupon_cutter::ports::{CouponRepository, IdentityRepository};

/// Failures that stop the process during startup.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid auth settings: {0}")]
    Auth(#[from] ValidationError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Migration(#[from] DomainError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate().map_err(ConfigError::from)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.server.environment,
        "Starting coupon-cutter"
    );

    // A malformed signing secret is fatal here and nowhere else.
    let codec = JwtTokenCodec::new(&config.auth.jwt_secret, config.auth.token_ttl_days)?;
    let hasher = Argon2PasswordHasher::new(
        config.auth.password_hash_memory_kib,
        config.auth.password_hash_iterations,
    )?;

    let (identities, coupons): (Arc<dyn IdentityRepository>, Arc<dyn CouponRepository>) =
        match &config.database {
            Some(database) => {
                let pool = PgPoolOptions::new()
                    .min_connections(database.min_connections)
                    .max_connections(database.max_connections)
                    .acquire_timeout(database.acquire_timeout())
                    .connect(&database.url)
                    .await?;
                if database.run_migrations {
                    run_migrations(&pool).await?;
                    tracing::info!("Database migrations applied");
                }
                tracing::info!("Using PostgreSQL storage");
                (
                    Arc::new(PostgresIdentityRepository::new(pool.clone(), hasher))
                        as Arc<dyn IdentityRepository>,
                    Arc::new(PostgresCouponRepository::new(pool)) as Arc<dyn CouponRepository>,
                )
            }
            None => {
                tracing::warn!("No database configured, using in-memory storage");
                (
                    Arc::new(InMemoryIdentityStore::new(hasher)) as Arc<dyn IdentityRepository>,
                    Arc::new(InMemoryCouponStore::new()) as Arc<dyn CouponRepository>,
                )
            }
        };

    let deadline = StorageDeadline::new(config.auth.storage_timeout());
    let identity = IdentityService::new(identities, Arc::new(codec), deadline);
    let redemption = RedemptionEngine::new(coupons, deadline);
    let app = http::router(identity, redemption, config.server.request_timeout());

    let addr = config.server.socket_addr().map_err(ConfigError::from)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
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
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received SIGINT, starting graceful shutdown"),
        _ = terminate => tracing::info!("Received SIGTERM, starting graceful shutdown"),
    }
}
