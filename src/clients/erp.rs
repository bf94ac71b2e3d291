use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::{
    error::AppError,
    models::{
        client::OverdueClient,
        order::{PurchaseOrder, SalesOrderRecord, SalesOrderRequest, SubmissionOutcome},
        request::Credentials,
    },
};

/// Client for the upstream ERP HTTP API. One reqwest client, reused across
/// calls; every request carries the caller-supplied credential pair.
pub struct ErpClient {
    http_client: Client,
    base_url: String,
}

impl ErpClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::transport("building ERP http client", e))?;

        Ok(Self {
            http_client,
            base_url: base_url.into(),
        })
    }

    pub async fn fetch_purchase_order(
        &self,
        purchase_order_id: u64,
        credentials: &Credentials,
    ) -> Result<PurchaseOrder, AppError> {
        let url = format!(
            "{}/purchases/purchase_orders/{}.json",
            self.base_url, purchase_order_id
        );

        debug!(purchase_order_id, "Fetching purchase order");

        let response = self
            .credentialed(self.http_client.get(&url), credentials)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::transport("fetching purchase order", e))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport("reading purchase order response", e))?;

        serde_json::from_str(&body).map_err(|e| AppError::decode("purchase order response", e))
    }

    pub async fn fetch_overdue_clients(
        &self,
        credentials: &Credentials,
    ) -> Result<Vec<OverdueClient>, AppError> {
        let url = format!(
            "{}/sales/reports/clients_with_overdue_payments.json",
            self.base_url
        );

        debug!("Fetching clients with overdue payments");

        let response = self
            .credentialed(self.http_client.get(&url), credentials)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| AppError::transport("fetching overdue clients", e))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport("reading overdue clients response", e))?;

        serde_json::from_str(&body).map_err(|e| AppError::decode("overdue clients response", e))
    }

    /// Submits the sales order and classifies the result. A well-formed
    /// response with an absent or zero identifier is the insufficient-stock
    /// business outcome, not an error; only transport and decode failures
    /// are hard errors here.
    pub async fn create_sales_order(
        &self,
        payload: &SalesOrderRequest,
        credentials: &Credentials,
    ) -> Result<SubmissionOutcome, AppError> {
        let url = format!("{}/sales/orders.json", self.base_url);

        debug!(order_number = %payload.invoice.order_number, "Creating sales order");

        // No error_for_status: a declined order can come back on a non-2xx
        // with a parseable body.
        let response = self
            .credentialed(self.http_client.post(&url), credentials)
            .header("Accept", "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| AppError::transport("creating sales order", e))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport("reading created sales order response", e))?;

        let record: SalesOrderRecord = serde_json::from_str(&body)
            .map_err(|e| AppError::decode("created sales order response", e))?;

        let outcome = SubmissionOutcome::classify(record);

        match &outcome {
            SubmissionOutcome::Created { id, .. } => {
                info!(sales_order_id = id, "Sales order created");
            }
            SubmissionOutcome::InsufficientStock => {
                info!("Sales order declined: insufficient stock");
            }
        }

        Ok(outcome)
    }

    fn credentialed(&self, builder: RequestBuilder, credentials: &Credentials) -> RequestBuilder {
        builder
            .header("Content-Type", "application/json")
            .header("X-User-Email", &credentials.email)
            .header("X-User-Token", &credentials.token)
    }
}
