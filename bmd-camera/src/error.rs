use reqwest::StatusCode;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The request never produced a response: DNS, refused connection, timeout.
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("camera answered {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("endpoint `{0}` must start with `/`")]
    InvalidEndpoint(String),

    #[error("invalid camera address: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
