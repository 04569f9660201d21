//! WanderLink Hub API server binary.
//!
//! Wires configuration, the PostgreSQL store, the auth and payment
//! providers, and the HTTP router, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use wanderlink_hub::api::build_router;
use wanderlink_hub::app_state::AppState;
use wanderlink_hub::auth::HttpAuthProvider;
use wanderlink_hub::config::HubConfig;
use wanderlink_hub::payments::StripeGateway;
use wanderlink_hub::persistence::{HubStore, PostgresStore};
use wanderlink_hub::service::{BillingService, ListingService, ModerationService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = HubConfig::from_env()?;
    config.warn_on_missing_secrets();

    tracing::info!(addr = %config.listen_addr, "starting wanderlink-hub");

    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .min_connections(config.database_min_connections)
        .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
        .connect(&config.database_url)
        .await?;

    let store = PostgresStore::new(pool);
    store.migrate().await?;
    let store: Arc<dyn HubStore> = Arc::new(store);

    let http = reqwest::Client::new();
    let auth = Arc::new(HttpAuthProvider::new(
        http.clone(),
        config.auth_base_url.clone(),
        config.auth_anon_key.clone(),
    ));
    let gateway = Arc::new(StripeGateway::new(
        http,
        config.stripe_secret_key.clone(),
        config.stripe_price_id.clone(),
        config.checkout_success_url.clone(),
        config.checkout_cancel_url.clone(),
    ));

    let state = AppState {
        listings: Arc::new(ListingService::new(Arc::clone(&store))),
        moderation: Arc::new(ModerationService::new(Arc::clone(&store))),
        billing: Arc::new(BillingService::new(
            store,
            gateway,
            config.stripe_webhook_secret.clone(),
        )),
        auth,
    };

    let app = build_router()
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
