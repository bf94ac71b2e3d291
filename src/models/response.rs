use serde::Serialize;

use crate::models::notification::TargetKind;

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

/// Non-fatal failure attached to an otherwise-successful response, e.g. one
/// notification target out of several failing to dispatch.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Warning {
    pub subject: String,
    pub detail: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: String) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<Warning>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Outcome of the single-order workflow.
#[derive(Debug, Clone, Serialize)]
pub struct RelayOutcome {
    pub outcome: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sales_order_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,

    pub deliveries: Vec<Delivery>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Delivery {
    pub target: TargetKind,
    pub message_id: String,
}

/// Outcome of the bulk overdue-clients workflow.
#[derive(Debug, Clone, Serialize)]
pub struct BulkReportOutcome {
    pub clients_matched: usize,
    pub envelopes_sent: usize,
    pub requests_enqueued: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}
