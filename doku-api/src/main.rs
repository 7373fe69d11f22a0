mod app_state;
mod config;
mod router;
mod routes;
mod store;

use app_state::AppState;
use store::ContextStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doku_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = config::read_config().expect("Failed to read configuration");
    let address = format!(
        "{}:{}",
        config.application.host, config.application.port
    );

    let app_state = AppState::new(ContextStore::new(config.storage.data_dir.clone()));
    let app = router::create(app_state, &config);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .unwrap_or_else(|_| panic!("Failed to bind {}", address));
    tracing::info!("listening on {}", address);

    axum::serve(listener, app).await.expect("Server failed");
}
