use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::{CameraControl, HttpCamera, Result};

pub const RECORD_ENDPOINT: &str = "/transports/0/record";

/// Body of `/transports/0/record`. Keys the camera sends that aren't
/// modelled here are kept in `extra` and written back as they came.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordState {
    pub recording: bool,
    #[serde(rename = "clipName", default, skip_serializing_if = "Option::is_none")]
    pub clip_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RecordState {
    pub fn new(recording: bool) -> Self {
        RecordState {
            recording,
            clip_name: None,
            extra: Map::new(),
        }
    }

    /// Flips `recording` and names the clip if `clip_name` is non-empty.
    pub fn toggled(mut self, clip_name: &str) -> Self {
        self.recording = !self.recording;
        if !clip_name.is_empty() {
            self.clip_name = Some(clip_name.to_owned());
        }
        self
    }
}

#[async_trait::async_trait]
impl CameraControl for HttpCamera {
    async fn record_state(&self) -> Result<RecordState> {
        self.get_json(RECORD_ENDPOINT).await
    }

    async fn set_recording(&self, on: bool) -> Result<()> {
        self.put(RECORD_ENDPOINT, &RecordState::new(on))
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn toggle_record(&self, clip_name: &str) -> Result<RecordState> {
        let state = self.record_state().await?.toggled(clip_name);
        self.put(RECORD_ENDPOINT, &state)
            .await?
            .error_for_status()?;

        info!(recording = state.recording, clip = ?state.clip_name, "toggled recording");
        Ok(state)
    }
}
