use anyhow::Context;
use clap::Parser;
use storefront::auth::{self, SessionStore};
use storefront::config::ServiceConfig;
use storefront::http::{build_router, cors_layer, AppState};
use storefront::lifecycle::{setup_tracing, StoreSystem};
use storefront::media::MediaStore;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::parse();
    setup_tracing(config.log_format);

    let media = MediaStore::new(&config.media_dir);
    let system = StoreSystem::new(media.clone(), config.channel_capacity);

    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        let admin = auth::ensure_admin(&system.account_client, &config.admin_name, email, password)
            .await
            .context("failed to provision the administrator account")?;
        info!(account = %admin.id, email = %admin.email, "Administrator ready");
    } else {
        warn!("No administrator configured; admin routes are unreachable until one exists");
    }

    let state = AppState {
        accounts: system.account_client.clone(),
        products: system.product_client.clone(),
        orders: system.order_client.clone(),
        sessions: SessionStore::new(),
        media,
    };
    let app = build_router(state).layer(cors_layer(config.frontend_origin.as_deref()));

    let listener = tokio::net::TcpListener::bind(config.listen)
        .await
        .with_context(|| format!("failed to bind {}", config.listen))?;
    info!(addr = %config.listen, media_dir = %config.media_dir.display(), "Storefront listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    system
        .shutdown()
        .await
        .map_err(anyhow::Error::msg)
        .context("actor shutdown failed")?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
