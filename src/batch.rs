use anyhow::Error;
use async_trait::async_trait;
use tracing::{info, warn};

use crate::models::{
    batch::{BatchEnvelope, WorkItem},
    request::Credentials,
    response::Warning,
};

/// Partitions work items into envelopes of at most `capacity` items, walking
/// the input once. Produces `ceil(n / capacity)` envelopes; item order is
/// preserved across envelope boundaries, and every envelope carries the same
/// method and credential pair. Zero items yield zero envelopes, and the
/// caller is responsible for reporting an empty partition instead of
/// silently succeeding.
pub fn partition(
    items: &[WorkItem],
    capacity: usize,
    method: &str,
    credentials: &Credentials,
) -> Vec<BatchEnvelope> {
    let capacity = capacity.max(1);

    items
        .chunks(capacity)
        .map(|chunk| BatchEnvelope {
            method: method.to_string(),
            credentials: credentials.clone(),
            urls: chunk.iter().map(|item| item.url.clone()).collect(),
            bodies: chunk.iter().map(|item| item.body.clone()).collect(),
        })
        .collect()
}

/// Seam between envelope fan-out and the queue transport, so partial-failure
/// reporting is testable without a broker.
#[async_trait]
pub trait EnvelopePublisher: Send + Sync {
    async fn publish_envelope(&self, envelope: &BatchEnvelope) -> Result<String, Error>;
}

#[derive(Debug, Default)]
pub struct PublishReport {
    pub envelopes_sent: usize,
    pub requests_enqueued: usize,
    pub warnings: Vec<Warning>,
}

/// Publishes each envelope independently: a failed envelope is recorded as a
/// warning and never prevents the remaining envelopes from being attempted.
/// The caller decides what an all-failed report means; here nothing is fatal.
pub async fn publish_all(
    publisher: &dyn EnvelopePublisher,
    envelopes: &[BatchEnvelope],
) -> PublishReport {
    let mut report = PublishReport::default();

    for (index, envelope) in envelopes.iter().enumerate() {
        match publisher.publish_envelope(envelope).await {
            Ok(message_id) => {
                info!(
                    envelope_index = index,
                    item_count = envelope.len(),
                    message_id = %message_id,
                    "Batch envelope enqueued"
                );
                report.envelopes_sent += 1;
                report.requests_enqueued += envelope.len();
            }
            Err(e) => {
                warn!(envelope_index = index, error = %e, "Failed to enqueue batch envelope");
                report.warnings.push(Warning {
                    subject: format!("envelope {}", index),
                    detail: "message queue publish failed".to_string(),
                });
            }
        }
    }

    report
}
