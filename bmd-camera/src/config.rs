use std::{env, time::Duration};

use crate::Error;

/// Path prefix of the control API on every camera.
pub const API_PREFIX: &str = "/control/api/v1";

pub const DEFAULT_HOST: &str = "Studio-Camera-6K-Pro.local";
pub const DEFAULT_SCHEME: &str = "http";

/// Where a camera lives on the network and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConfig {
    pub scheme: String,
    pub host: String,
    /// Per-request timeout. `None` waits for as long as the transport does.
    pub timeout: Option<Duration>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_owned(),
            host: DEFAULT_HOST.to_owned(),
            timeout: None,
        }
    }
}

impl CameraConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Default::default()
        }
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// `{scheme}://{host}/control/api/v1`, without a trailing slash.
    pub fn base_address(&self) -> String {
        format!("{}://{}{}", self.scheme, self.host, API_PREFIX)
    }

    /// Reads `BMD_CAMERA_HOST`, `BMD_CAMERA_SCHEME` and `BMD_CAMERA_TIMEOUT_MS`,
    /// falling back to the defaults for anything unset or blank.
    pub fn from_env() -> Result<Self, Error> {
        let host = non_empty_var("BMD_CAMERA_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let scheme =
            non_empty_var("BMD_CAMERA_SCHEME").unwrap_or_else(|| DEFAULT_SCHEME.to_owned());
        let timeout = match non_empty_var("BMD_CAMERA_TIMEOUT_MS") {
            Some(raw) => Some(parse_timeout_ms(&raw)?),
            None => None,
        };

        Ok(Self {
            scheme,
            host,
            timeout,
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

pub(crate) fn parse_timeout_ms(raw: &str) -> Result<Duration, Error> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| Error::InvalidConfig(format!("timeout `{raw}` is not a number of milliseconds")))
}
