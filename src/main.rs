use std::sync::Arc;

use anyhow::{Error, Result};
use order_bridge::{
    api::run_api_server, clients::queue::QueueClient, config::Config, worker::run_batch_worker,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .json()
        .init();

    let queue = Arc::new(QueueClient::connect(&config).await?);

    tokio::select! {
        result = run_api_server(config.clone(), Arc::clone(&queue)) => result,
        result = run_batch_worker(&config, queue.as_ref()) => result,
    }
}
