mod api_client;
mod indicators;
mod models;
mod routes;
mod services;
mod state;

use axum::{routing::get, Router};
use state::AppState;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let state = AppState::new();

    // Public API: any origin, all methods and headers
    let app = Router::new()
        .route("/", get(routes::health::root))
        .route("/get_stock_data", get(routes::stock_data::get_stock_data))
        .route("/get_prices", get(routes::prices::get_prices))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8000);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
