use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub erp_base_url: String,

    pub rabbitmq_url: String,
    pub mailer_queue_name: String,
    pub batch_queue_name: String,

    #[serde(default = "default_batch_capacity")]
    pub batch_capacity: usize,

    #[serde(default = "default_queue_delay_seconds")]
    pub queue_delay_seconds: u64,

    pub server_port: u16,
}

fn default_batch_capacity() -> usize {
    20
}

fn default_queue_delay_seconds() -> u64 {
    10
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }
}
