use serde::{Deserialize, Serialize};

use crate::{
    error::AppError,
    models::{
        client::ClientFilter,
        notification::{NotificationTarget, TargetKind},
        order::CallerIds,
    },
};

/// ERP credential pair, carried as `X-User-Email` / `X-User-Token` headers on
/// every upstream call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    #[serde(rename = "user_email")]
    pub email: String,

    #[serde(rename = "user_token")]
    pub token: String,
}

/// Body of the single-order workflow request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayOrderRequest {
    #[serde(default)]
    pub purchase_order_id: u64,

    #[serde(default)]
    pub payment_term_id: i64,

    #[serde(default)]
    pub seller_id: i64,

    #[serde(default)]
    pub agency_id: i64,

    #[serde(default)]
    pub payee_id: String,

    #[serde(default)]
    pub recipient_email: String,

    #[serde(default)]
    pub sender_email: String,

    #[serde(default)]
    pub email_title: String,

    #[serde(default)]
    pub email_entity_logo: String,

    #[serde(default)]
    pub email_entity_name: String,

    #[serde(default)]
    pub email_recipient_name: String,

    #[serde(default)]
    pub email_extra_cc: String,

    #[serde(default)]
    pub email_extra_bcc: String,

    /// Optional second recipient; when present a dispatcher target is
    /// notified alongside the applicant.
    #[serde(default)]
    pub dispatch_email: String,

    #[serde(default)]
    pub dispatch_name: String,
}

impl RelayOrderRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.purchase_order_id == 0 {
            return Err(AppError::validation("purchase order id is missing"));
        }
        if self.payment_term_id == 0 {
            return Err(AppError::validation("payment term id is missing"));
        }
        if self.seller_id == 0 {
            return Err(AppError::validation("seller id is missing"));
        }
        if self.agency_id == 0 {
            return Err(AppError::validation("agency id is missing"));
        }
        if self.payee_id.is_empty() {
            return Err(AppError::validation("payee id is missing"));
        }
        if self.recipient_email.is_empty() {
            return Err(AppError::validation("recipient email is missing"));
        }
        if self.email_title.is_empty() {
            return Err(AppError::validation("email title is missing"));
        }
        if self.email_recipient_name.is_empty() {
            return Err(AppError::validation("email recipient name is missing"));
        }
        Ok(())
    }

    pub fn caller_ids(&self) -> CallerIds {
        CallerIds {
            payment_term_id: self.payment_term_id,
            seller_id: self.seller_id,
            agency_id: self.agency_id,
            payee_id: self.payee_id.clone(),
        }
    }

    /// The applicant is always notified; a dispatcher target is added when a
    /// dispatch email was supplied.
    pub fn targets(&self) -> Vec<NotificationTarget> {
        let mut targets = vec![NotificationTarget {
            kind: TargetKind::Applicant,
            email: self.recipient_email.clone(),
            name: self.email_recipient_name.clone(),
        }];

        if !self.dispatch_email.is_empty() {
            targets.push(NotificationTarget {
                kind: TargetKind::Dispatcher,
                email: self.dispatch_email.clone(),
                name: self.dispatch_name.clone(),
            });
        }

        targets
    }
}

/// Body of the bulk overdue-clients workflow request.
#[derive(Debug, Clone, Deserialize)]
pub struct OverdueReportRequest {
    #[serde(default)]
    pub exclude_sellers: Vec<i64>,

    #[serde(default)]
    pub exclude_categories: Vec<i64>,

    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default)]
    pub email_subject: String,

    #[serde(default)]
    pub email_body: String,
}

fn default_currency() -> String {
    "GTQ".to_string()
}

impl OverdueReportRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.email_subject.is_empty() {
            return Err(AppError::validation("email subject is missing"));
        }
        Ok(())
    }

    pub fn filter(&self) -> ClientFilter {
        ClientFilter {
            exclude_sellers: self.exclude_sellers.clone(),
            exclude_categories: self.exclude_categories.clone(),
            currency: self.currency.clone(),
        }
    }
}
