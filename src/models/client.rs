use serde::{Deserialize, Serialize};

/// One entry from the overdue-payments report. Category and seller ids
/// arrive as strings, exactly as the ERP sends them.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OverdueClient {
    pub id: i64,

    #[serde(default)]
    pub info: String,

    #[serde(default)]
    pub cat: String,

    #[serde(default, rename = "default_seller")]
    pub seller: String,

    #[serde(default)]
    pub due: String,

    #[serde(default)]
    pub currency: String,
}

/// Exclusion filter for the bulk workflow: a client survives when its seller
/// and category are not excluded and its currency matches.
#[derive(Debug, Clone, Default)]
pub struct ClientFilter {
    pub exclude_sellers: Vec<i64>,
    pub exclude_categories: Vec<i64>,
    pub currency: String,
}

impl ClientFilter {
    pub fn matches(&self, client: &OverdueClient) -> bool {
        // An unparsable seller/category id cannot match an exclusion, so the
        // client is kept.
        let seller_excluded = client
            .seller
            .parse::<i64>()
            .is_ok_and(|seller| self.exclude_sellers.contains(&seller));

        let category_excluded = client
            .cat
            .parse::<i64>()
            .is_ok_and(|cat| self.exclude_categories.contains(&cat));

        !seller_excluded && !category_excluded && client.currency == self.currency
    }

    pub fn apply(&self, clients: Vec<OverdueClient>) -> Vec<OverdueClient> {
        clients
            .into_iter()
            .filter(|client| self.matches(client))
            .collect()
    }
}

pub const PENDING_PAYMENTS_REPORT_URL: &str = "sales/reports/client_pending_payments";

/// Body of one per-client report-delivery request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRequest {
    pub p_id: String,
    pub r_body: String,
    pub r_name: String,
    pub r_url: String,
    pub r_params: ReportParams,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportParams {
    pub client: String,
}

impl ReportRequest {
    pub fn for_client(client: &OverdueClient, report_name: &str, report_body: &str) -> Self {
        let client_id = client.id.to_string();

        Self {
            p_id: client_id.clone(),
            r_body: report_body.to_string(),
            r_name: report_name.to_string(),
            r_url: PENDING_PAYMENTS_REPORT_URL.to_string(),
            r_params: ReportParams { client: client_id },
        }
    }
}
