use std::time::Duration;

use reqwest::{Client, ClientBuilder};

use crate::error::{Error, Result};
use crate::model::{ApiKey, Endpoints};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Wrapper around the configured HTTP client and the probe inputs.
#[derive(Debug, Clone)]
pub struct HttpSession {
    client: Client,
    endpoints: Endpoints,
    api_key: ApiKey,
}

/// Minimal data required to build an HTTP session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub api_key: ApiKey,
    pub endpoints: Endpoints,
    pub timeout: Duration,
}

impl SessionConfig {
    pub fn new(api_key: ApiKey, endpoints: Endpoints, timeout: Duration) -> Self {
        Self {
            api_key,
            endpoints,
            timeout,
        }
    }
}

impl HttpSession {
    /// Build a new HTTP session; every request it sends is bounded by `config.timeout`.
    pub fn new(config: &SessionConfig) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(Error::Client)?;

        Ok(Self {
            client,
            endpoints: config.endpoints.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Returns reference to the inner `reqwest::Client`.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}
