use reqwest::{StatusCode, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::{CameraConfig, Error, Result};

/// Outcome of a GET that reached the camera.
#[derive(Debug, Clone, PartialEq)]
pub enum GetResponse<T = Value> {
    Success(T),
    Failure { status: StatusCode, body: String },
}

impl<T> GetResponse<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, GetResponse::Success(_))
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            GetResponse::Success(value) => Ok(value),
            GetResponse::Failure { status, body } => Err(Error::Status { status, body }),
        }
    }
}

/// Raw answer to a PUT, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Status {
                status: self.status,
                body: self.body,
            })
        }
    }
}

// Anything below 300 is success. reqwest follows redirects, so a 3xx only
// gets here when it carries no `Location`.
fn is_success(status: StatusCode) -> bool {
    status.as_u16() < 300
}

pub struct HttpCamera {
    client: reqwest::Client,
    config: CameraConfig,
}

impl HttpCamera {
    pub fn new(config: CameraConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Self::with_client(builder.build()?, config)
    }

    /// Fails if the host is blank or the base address would resolve to a
    /// host other than the configured one.
    pub fn with_client(client: reqwest::Client, config: CameraConfig) -> Result<Self> {
        if config.host.trim().is_empty() {
            return Err(Error::InvalidConfig("camera host is empty".to_owned()));
        }

        let base = Url::parse(&config.base_address())?;
        let expected = host_without_port(&config.host);
        if !base
            .host_str()
            .is_some_and(|host| host.eq_ignore_ascii_case(expected))
        {
            return Err(Error::InvalidConfig(format!(
                "`{}` is not a plain host name or address",
                config.host
            )));
        }

        Ok(HttpCamera { client, config })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    fn endpoint_url(&self, endpoint: &str) -> Result<Url> {
        if !endpoint.starts_with('/') {
            return Err(Error::InvalidEndpoint(endpoint.to_owned()));
        }
        Ok(Url::parse(&format!("{}{}", self.config.base_address(), endpoint))?)
    }

    /// GETs `endpoint` and decodes a successful body as JSON. An empty
    /// successful body decodes as `null`.
    pub async fn get(&self, endpoint: &str) -> Result<GetResponse> {
        let url = self.endpoint_url(endpoint)?;
        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        debug!(%url, %status, "GET");

        let body = response.text().await?;
        if !is_success(status) {
            return Ok(GetResponse::Failure { status, body });
        }

        let value = if body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&body)?
        };
        Ok(GetResponse::Success(value))
    }

    /// Like [`HttpCamera::get`], but failure statuses become [`Error::Status`]
    /// and the body is deserialized into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let value = self.get(endpoint).await?.into_result()?;
        Ok(serde_json::from_value(value)?)
    }

    /// PUTs `body` as JSON. The response is handed back unchecked; use
    /// [`ApiResponse::error_for_status`] to treat failures as errors.
    pub async fn put<B>(&self, endpoint: &str, body: &B) -> Result<ApiResponse>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(endpoint)?;
        let response = self.client.put(url.clone()).json(body).send().await?;
        let status = response.status();
        debug!(%url, %status, "PUT");
        if !is_success(status) {
            warn!(%url, %status, "camera rejected PUT");
        }

        let body = response.text().await?;
        Ok(ApiResponse { status, body })
    }
}

// `[::1]:80` -> `[::1]`, `cam.local:8080` -> `cam.local`.
fn host_without_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}
