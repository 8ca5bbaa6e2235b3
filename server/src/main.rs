mod error;
mod routes;
mod services;
mod state;
mod stores;
mod validate;

use std::sync::Arc;

use crate::stores::memory::{MemoryPostStore, MemoryUserStore};
use crate::stores::postgres::{PgPostStore, PgUserStore, init_pool};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()
        .expect("invalid PORT");

    // Postgres when configured, in-memory otherwise. The memory
    // backing loses everything on restart; it exists for local
    // development and tests.
    let state = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = init_pool(&database_url).await.expect("database init failed");
            state::AppState::new(
                Arc::new(PgPostStore::new(pool.clone())),
                Arc::new(PgUserStore::new(pool)),
            )
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set — using in-memory stores");
            state::AppState::new(Arc::new(MemoryPostStore::new()), Arc::new(MemoryUserStore::new()))
        }
    };

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "blog server listening");
    axum::serve(listener, app).await.expect("server failed");
}
