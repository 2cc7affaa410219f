use reqwest::header::InvalidHeaderValue;
use thiserror::Error;

/// Errors surfaced by flavor detection and probing.
#[derive(Debug, Error)]
pub enum Error {
    #[error("MAILERLITE_API_KEY missing. Copy .env.template to .env and set the key.")]
    CredentialMissing,

    #[error(
        "could not determine MailerLite API flavor; check connectivity and API key ({})",
        .attempts.join("; ")
    )]
    DetectionFailure { attempts: Vec<String> },

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API key is not a valid header value")]
    InvalidHeader(#[from] InvalidHeaderValue),

    #[error("invalid base url `{url}`")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("building HTTP client")]
    Client(#[source] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
