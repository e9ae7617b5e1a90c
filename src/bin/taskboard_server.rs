//! Serves the board API over HTTP.
//!
//! Configuration comes from the environment, optionally seeded from a `.env`
//! file in the working directory. Boards are stored in `PostgreSQL` when
//! `DATABASE_URL` is set and in memory otherwise.

use std::sync::Arc;
use taskboard::{
    api::{AppState, router},
    board::{
        adapters::{
            memory::{InMemoryBoardRepository, InMemoryUserDirectory},
            postgres::{PostgresBoardRepository, build_pool},
        },
        domain::UserId,
        ports::{BoardRepository, UserProfile},
    },
    config::AppConfig,
    telemetry::init_tracing,
};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        return Err(err.into());
    }

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format)?;

    let repository: Arc<dyn BoardRepository> = match config.database_url.as_deref() {
        Some(url) => {
            tracing::info!(pool_size = config.db_pool_size, "using PostgreSQL board store");
            let postgres = PostgresBoardRepository::new(build_pool(url, config.db_pool_size)?);
            postgres.ensure_schema().await?;
            Arc::new(postgres)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; boards are kept in memory");
            Arc::new(InMemoryBoardRepository::new())
        }
    };

    let profiles = config
        .seed_users
        .iter()
        .map(|user| UserId::new(user.as_str()).map(UserProfile::new))
        .collect::<Result<Vec<_>, _>>()?;
    let directory = Arc::new(InMemoryUserDirectory::with_profiles(profiles));

    let state = Arc::new(AppState::new(
        repository,
        directory,
        config.service_config(),
    ));
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
