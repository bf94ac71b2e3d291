use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties, Consumer,
    options::{
        BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicRejectOptions,
        QueueDeclareOptions,
    },
    types::{AMQPValue, FieldTable},
};
use tracing::info;
use uuid::Uuid;

use crate::{
    batch::EnvelopePublisher,
    config::Config,
    dispatch::JobPublisher,
    models::{batch::BatchEnvelope, notification::NotificationJob},
};

/// Producer/consumer plumbing for the outbound message queue. Publishes mail
/// jobs and batch envelopes as persistent messages; the message identifier
/// returned to callers is the uuid stamped on the message before publish.
pub struct QueueClient {
    channel: Channel,
    mailer_queue_name: String,
    batch_queue_name: String,
    delay_seconds: u64,
}

impl QueueClient {
    pub async fn connect(config: &Config) -> Result<Self, Error> {
        let connection = Connection::connect(&config.rabbitmq_url, ConnectionProperties::default())
            .await
            .map_err(|_| anyhow!("Failed to connect to RabbitMQ"))?;

        info!("RabbitMQ connection established");

        let channel = connection
            .create_channel()
            .await
            .map_err(|_| anyhow!("RabbitMQ channel creation failed"))?;

        channel
            .queue_declare(
                &config.mailer_queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|_| anyhow!("Failed to declare mailer queue"))?;

        channel
            .queue_declare(
                &config.batch_queue_name,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|_| anyhow!("Failed to declare batch queue"))?;

        info!(
            mailer_queue = %config.mailer_queue_name,
            batch_queue = %config.batch_queue_name,
            "Queues declared"
        );

        Ok(Self {
            channel,
            mailer_queue_name: config.mailer_queue_name.clone(),
            batch_queue_name: config.batch_queue_name.clone(),
            delay_seconds: config.queue_delay_seconds,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.channel.status().connected()
    }

    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<String, Error> {
        let message_id = Uuid::new_v4().to_string();

        let mut headers = FieldTable::default();
        headers.insert(
            "x-delay".into(),
            AMQPValue::LongLongInt((self.delay_seconds * 1000) as i64),
        );

        let properties = BasicProperties::default()
            .with_delivery_mode(2)
            .with_message_id(message_id.clone().into())
            .with_headers(headers);

        let confirm = self
            .channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                payload,
                properties,
            )
            .await
            .map_err(|_| anyhow!("Failed to publish message"))?;

        confirm
            .await
            .map_err(|_| anyhow!("Publish was not confirmed"))?;

        Ok(message_id)
    }

    pub async fn create_batch_consumer(&self) -> Result<Consumer, Error> {
        let consumer = self
            .channel
            .basic_consume(
                &self.batch_queue_name,
                "batch_worker",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|_| anyhow!("Failed to create batch consumer"))?;

        Ok(consumer)
    }

    pub async fn acknowledge(&self, delivery_tag: u64) -> Result<(), Error> {
        self.channel
            .basic_ack(delivery_tag, BasicAckOptions::default())
            .await
            .map_err(|_| anyhow!("Failed to acknowledge message"))?;

        Ok(())
    }

    pub async fn reject(&self, delivery_tag: u64, requeue: bool) -> Result<(), Error> {
        self.channel
            .basic_reject(delivery_tag, BasicRejectOptions { requeue })
            .await
            .map_err(|_| anyhow!("Failed to reject message"))?;

        Ok(())
    }
}

#[async_trait]
impl JobPublisher for QueueClient {
    async fn publish_job(&self, job: &NotificationJob) -> Result<String, Error> {
        let payload = serde_json::to_vec(job)?;
        self.publish(&self.mailer_queue_name, &payload).await
    }
}

#[async_trait]
impl EnvelopePublisher for QueueClient {
    async fn publish_envelope(&self, envelope: &BatchEnvelope) -> Result<String, Error> {
        let payload = serde_json::to_vec(envelope)?;
        self.publish(&self.batch_queue_name, &payload).await
    }
}
