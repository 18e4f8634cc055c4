//! SparkVibe Backend
//!
//! HTTP service for the SparkVibe morning-habit app.

use anyhow::Result;
use sparkvibe_backend::{config, db, routes, state::AppState};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        timezone = %config.habits.timezone,
        "Starting SparkVibe backend"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let db_pool = db::create_pool(&config.database).await?;

    // Production runs migrations as a separate job
    if !config::AppConfig::is_production() {
        db::run_migrations(&db_pool).await?;
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let seed_on_startup = config.habits.seed_messages_on_startup;
    let state = AppState::new(db_pool, config)?;

    if seed_on_startup {
        match state.messages.seed_messages().await {
            Ok(0) => {}
            Ok(count) => info!(count, "Seeded message catalog on startup"),
            Err(e) => warn!(error = %e, "Could not seed message catalog"),
        }
    }

    let app = routes::create_router(state);

    info!(address = %addr, "Server listening");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Pretty logs in development, JSON in production
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "sparkvibe_backend=info,tower_http=info".into()
        } else {
            "sparkvibe_backend=debug,tower_http=debug,sqlx=warn".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if config.jwt.secret.contains("development") || config.jwt.secret.len() < 32 {
        errors.push("JWT secret must be at least 32 characters and not contain 'development'");
    }

    if config.habits.timezone().is_err() {
        errors.push("habits.timezone must be an IANA timezone name");
    }

    if config.habits.jitter_seed.is_some() {
        warn!("habits.jitter_seed is set; message selection will repeat across requests");
    }

    if config.database.url.contains("localhost") || config.database.url.contains("127.0.0.1") {
        warn!("Database URL contains localhost - ensure this is intentional for production");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
