//! Transport envelope and reply wire types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Inbound event envelope from the request transport.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Event kind, e.g. `scheduler.prioritize`.
    pub name: String,
    pub id: String,
    #[serde(default)]
    pub resource_id: String,
    /// Name the reply must be published under.
    #[serde(default)]
    pub reply_to: String,
    #[serde(default)]
    pub data: HashMap<String, serde_json::Value>,
}

/// Reply published back to the transport for one handled event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub name: String,
    pub previous_ids: Vec<String>,
    pub resource_type: String,
    pub resource_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Reply {
    /// Acknowledge `event`, optionally attaching response data.
    pub fn to_event(event: &Event, data: Option<serde_json::Value>) -> Self {
        Self {
            name: event.reply_to.clone(),
            previous_ids: vec![event.id.clone()],
            resource_type: "schedulerRequest".to_string(),
            resource_id: event.resource_id.clone(),
            data,
        }
    }
}
