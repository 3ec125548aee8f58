mod config;
mod web;

use std::sync::Arc;

use anyhow::{Context, Result};
use fatality_charts::Dataset;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::web::state::WebState;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let config = Config::from_env();
    info!("loading dataset from {:?}", config.dataset_path);
    // no dataset, no server
    let dataset = Dataset::load(&config.dataset_path)
        .with_context(|| format!("failed to load dataset {:?}", config.dataset_path))?;
    info!("{} fatality records ready", dataset.len());
    let web_state = WebState {
        dataset: Arc::new(dataset),
    };
    web::start_web(web_state, config.listen_addr()).await
}
