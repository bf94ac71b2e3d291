use std::fmt::{Display, Formatter, Result};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Independent notification recipient. Each target gets its own dispatch
/// attempt and its own outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    Applicant,
    Dispatcher,
}

impl Display for TargetKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TargetKind::Applicant => write!(f, "applicant"),
            TargetKind::Dispatcher => write!(f, "dispatcher"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationTarget {
    pub kind: TargetKind,
    pub email: String,
    pub name: String,
}

/// One outbound mail job, built once per (order, target) pair and handed to
/// the queue. Field names are the wire contract with the downstream mailer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationJob {
    pub title: String,
    pub body: String,
    pub recipient_email: String,
    pub recipient_name: String,
    pub sender_name: String,
    pub sender_email: String,
    pub extra_cc: String,
    pub extra_bcc: String,
    pub entity_logo: String,
    pub entity_name: String,
    pub attached_file_url: String,
    pub attachment_name: String,
    pub correlation_id: Uuid,
}
