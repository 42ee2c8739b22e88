//! The typed placement request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{EventError, EventResult};
use crate::event::Event;

/// Envelope field carrying the placement request payload.
const REQUEST_FIELD: &str = "schedulerRequest";

/// One placement request: the instances to be started.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchedulerRequest {
    #[serde(default, rename = "context")]
    pub instances: Vec<Instance>,
}

/// One instance context within a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub data: InstanceData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstanceData {
    #[serde(default)]
    pub fields: InstanceFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceFields {
    /// Image reference, e.g. `docker:nginx:latest`.
    #[serde(default)]
    pub image_uuid: String,
    /// Instance labels; keys unique per instance.
    #[serde(default)]
    pub labels: HashMap<String, String>,
}

impl Instance {
    pub fn labels(&self) -> &HashMap<String, String> {
        &self.data.fields.labels
    }

    pub fn labels_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.data.fields.labels
    }
}

/// Extract the typed placement request from an event envelope.
///
/// An event without the request payload is rejected; no candidate list
/// is computed for it.
pub fn decode_request(event: &Event) -> EventResult<SchedulerRequest> {
    let raw = event
        .data
        .get(REQUEST_FIELD)
        .ok_or_else(|| EventError::MissingRequest {
            id: event.id.clone(),
        })?;

    serde_json::from_value(raw.clone()).map_err(|source| EventError::Decode {
        id: event.id.clone(),
        source,
    })
}
