mod config;
mod error;
mod helpers;
mod jikan;
mod models;
mod routes;
mod stream;
mod types;

#[cfg(test)]
mod tests;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::extract::FromRef;
use dotenvy::dotenv;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    jikan::JikanClient,
    stream::{MockStreamLinks, StreamLinkProvider},
};

pub const PUBLIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/public");

const DEFAULT_LOG_FILTER: &str = "anime_proxy=info,tower_http=info";

#[derive(Clone)]
pub struct AppState {
    jikan: JikanClient,
    streams: Arc<dyn StreamLinkProvider>,
}

impl AppState {
    pub fn new(jikan: JikanClient, streams: Arc<dyn StreamLinkProvider>) -> Self {
        Self { jikan, streams }
    }
}

impl FromRef<AppState> for JikanClient {
    fn from_ref(state: &AppState) -> Self {
        state.jikan.clone()
    }
}

impl FromRef<AppState> for Arc<dyn StreamLinkProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.streams.clone()
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    tracing::info!("Starting server...");

    let config = Config::from_env().context("Invalid configuration")?;
    tracing::info!("Proxying anime API at {}", config.anime_api_base);

    let jikan = JikanClient::new(config.anime_api_base.clone())
        .context("Failed to build anime API client")?;
    let state = AppState::new(jikan, Arc::new(MockStreamLinks));

    let app = routes::router(state, PUBLIC_DIR);

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    tracing::info!("listening on http://{}", address);

    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
