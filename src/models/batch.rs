use serde::{Deserialize, Serialize};

use crate::models::request::Credentials;

/// One work item destined for an envelope: a request URL plus its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkItem {
    pub url: String,
    pub body: String,
}

/// A bounded batch of work items carried by a single queue message. The
/// credential pair and method apply to every item; `urls` and `bodies` are
/// parallel arrays of equal length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchEnvelope {
    pub method: String,

    #[serde(flatten)]
    pub credentials: Credentials,

    pub urls: Vec<String>,

    #[serde(rename = "body")]
    pub bodies: Vec<String>,
}

impl BatchEnvelope {
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
