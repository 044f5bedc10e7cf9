use std::sync::Arc;

use sqlx::mysql::MySqlPoolOptions;

use teamdesk_api::api::{self, AppState};
use teamdesk_api::config::AppConfig;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().expect("Failed to load configuration");
    let bind_addr = config.bind_addr;

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = MySqlPoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Database connected successfully");

    let app = api::router(AppState {
        pool,
        config: Arc::new(config),
    });

    // Start server
    tracing::info!("Server listening on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app).await.expect("Server failed");
}
