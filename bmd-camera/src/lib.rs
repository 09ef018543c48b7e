//! Control Blackmagic studio cameras through the REST API they serve under
//! `/control/api/v1`.

mod config;
mod error;
mod events;
mod http;
mod record;
mod video;

pub use config::*;
pub use error::*;
pub use events::*;
pub use http::*;
pub use record::*;
pub use video::*;

/// Recording transport operations.
#[async_trait::async_trait]
pub trait CameraControl: private::Sealed {
    async fn record_state(&self) -> Result<RecordState>;

    async fn set_recording(&self, on: bool) -> Result<()>;

    /// Reads the recording state, inverts it and writes it back, naming the
    /// clip when `clip_name` is non-empty. Returns the state that was written.
    ///
    /// This is a plain read-modify-write: a second client toggling at the
    /// same time can make both writes land on the same value.
    async fn toggle_record(&self, clip_name: &str) -> Result<RecordState>;
}

mod private {
    pub trait Sealed {}

    impl Sealed for crate::HttpCamera {}
}
