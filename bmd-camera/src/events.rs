use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::{Error, GetResponse, HttpCamera, Result};

pub const EVENT_LIST_ENDPOINT: &str = "/event/list";

// Older firmware answers with a bare array, newer with `{"events": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventList {
    Bare(Vec<String>),
    Wrapped { events: Vec<String> },
}

impl HttpCamera {
    /// Endpoints the camera can report on, each starting with `/`.
    pub async fn event_list(&self) -> Result<Vec<String>> {
        let list = match self.get_json::<EventList>(EVENT_LIST_ENDPOINT).await? {
            EventList::Bare(events) | EventList::Wrapped { events } => events,
        };

        Ok(list
            .into_iter()
            .map(|endpoint| {
                if endpoint.starts_with('/') {
                    endpoint
                } else {
                    format!("/{endpoint}")
                }
            })
            .collect())
    }

    /// Reads every endpoint from [`HttpCamera::event_list`]. Endpoints the
    /// camera refuses, or answers with something other than JSON, are
    /// skipped. Transport errors still abort the whole snapshot.
    pub async fn snapshot(&self) -> Result<BTreeMap<String, Value>> {
        let mut properties = BTreeMap::new();

        for endpoint in self.event_list().await? {
            match self.get(&endpoint).await {
                Ok(GetResponse::Success(value)) => {
                    properties.insert(endpoint, value);
                }
                Ok(GetResponse::Failure { status, .. }) => {
                    warn!(%endpoint, %status, "skipping property");
                }
                Err(Error::Decode(err)) => {
                    warn!(%endpoint, %err, "skipping property with malformed body");
                }
                Err(err) => return Err(err),
            }
        }

        Ok(properties)
    }
}
