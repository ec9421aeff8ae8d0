use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod error;

mod dto {
    pub mod catalog_dto;
    pub mod form_dto;
    pub mod in_time_dto;
    pub mod team_dto;
    pub mod time_dto;
    pub mod update_dto;
}

mod routes {
    pub mod catalog;
    pub mod in_times;
    pub mod schedule;
    pub mod sessions;
    pub mod teams;
}

mod services {
    pub mod form_model;
    pub mod schedule_formatter;
    pub mod session_store;
    pub mod websocket;
}

use config::ServerConfig;
use services::session_store::SessionStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "move_schedule_backend=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env().expect("Invalid server configuration");
    let addr = config.addr();

    let store = SessionStore::new();
    store.spawn_idle_sweeper(config.session_idle());
    info!("Sessions idle for {}s are discarded.", config.session_idle_secs);

    let app = app::build_router(store, Arc::new(config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Could not bind server address");
    info!("Started server on {}.", addr);
    axum::serve(listener, app).await.expect("Server error");
}
