use anyhow::Result;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use api::{AppConfig, AppState, create_router};
use auth::{AuthService, JwtConfig, JwtService, UserRepository};
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use media::{
    ImageRepository, ImageService, S3BlobStore, S3Config, blob::s3::create_s3_client,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting imgshare API service");

    let app_config = AppConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let s3_config = S3Config::from_env()?;

    if !app_config.secure_cookies() {
        warn!("Running in development mode: session cookies are not marked Secure");
    }

    // Initialize database connection pool
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if health_check(&pool).await {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    run_migrations(&pool).await?;

    let s3_client = create_s3_client(&s3_config).await;
    info!("Storing images in bucket {}", s3_config.bucket);

    let auth_service = AuthService::new(
        Arc::new(UserRepository::new(pool.clone())),
        JwtService::new(jwt_config),
        app_config.identifier,
    );
    let image_service = ImageService::new(
        Arc::new(ImageRepository::new(pool)),
        Arc::new(S3BlobStore::new(s3_client, &s3_config)),
    );

    let app_state = AppState::new(auth_service, image_service, app_config.secure_cookies());
    let app = create_router(app_state);

    let address = app_config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API service stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
