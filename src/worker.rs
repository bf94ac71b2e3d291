use std::time::Duration;

use anyhow::{Error, Result};
use futures_util::StreamExt;
use reqwest::{Client, Method};
use tracing::{info, warn};

use crate::{clients::queue::QueueClient, config::Config, models::batch::BatchEnvelope};

/// Consumes batch-description messages and executes each contained request.
/// A payload that fails to decode is rejected without requeue; per-item HTTP
/// failures are logged and never abort the rest of the envelope.
pub async fn run_batch_worker(config: &Config, queue: &QueueClient) -> Result<(), Error> {
    let http_client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;

    let mut consumer = queue.create_batch_consumer().await?;

    info!(queue = %config.batch_queue_name, "Batch worker started");

    while let Some(delivery) = consumer.next().await {
        let delivery = match delivery {
            Ok(delivery) => delivery,
            Err(e) => {
                warn!(error = %e, "Batch delivery failed");
                continue;
            }
        };

        match serde_json::from_slice::<BatchEnvelope>(&delivery.data) {
            Ok(envelope) => {
                execute_envelope(&http_client, &envelope).await;
                queue.acknowledge(delivery.delivery_tag).await?;
            }
            Err(e) => {
                warn!(error = %e, "Undecodable batch payload, rejecting");
                queue.reject(delivery.delivery_tag, false).await?;
            }
        }
    }

    Ok(())
}

/// Issues every url/body pair in the envelope with the envelope's credential
/// pair, best-effort.
pub async fn execute_envelope(http_client: &Client, envelope: &BatchEnvelope) {
    let method = match envelope.method.parse::<Method>() {
        Ok(method) => method,
        Err(_) => {
            warn!(method = %envelope.method, "Unsupported method in batch envelope, skipping");
            return;
        }
    };

    for (index, url) in envelope.urls.iter().enumerate() {
        let body = envelope.bodies.get(index).cloned().unwrap_or_default();

        let result = http_client
            .request(method.clone(), url)
            .header("Content-Type", "application/json")
            .header("X-User-Email", &envelope.credentials.email)
            .header("X-User-Token", &envelope.credentials.token)
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) => {
                info!(url = %url, status = %response.status(), "Batch item delivered");
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Batch item request failed");
            }
        }
    }

    info!(item_count = envelope.len(), "Batch envelope processed");
}
