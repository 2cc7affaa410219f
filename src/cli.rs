use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::error::{Error, Result};
use crate::model::{self, ApiKey, Endpoints};
use crate::session::SessionConfig;

/// Command-line options for the MailerLite flavor probe.
#[derive(Debug, Clone, Parser)]
#[command(
    author,
    version,
    about = "Detect the MailerLite API flavor of a key and probe it",
    long_about = None
)]
pub struct CliArgs {
    /// MailerLite API key (Connect or classic v2).
    #[arg(long = "api-key", env = "MAILERLITE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base url of the Connect ("new") API.
    #[arg(
        long = "new-base",
        value_name = "URL",
        env = "MAILERLITE_NEW_BASE",
        default_value = model::NEW_BASE
    )]
    pub new_base: String,

    /// Base url of the classic v2 API.
    #[arg(
        long = "classic-base",
        value_name = "URL",
        env = "MAILERLITE_CLASSIC_BASE",
        default_value = model::CLASSIC_BASE
    )]
    pub classic_base: String,

    /// Only detect the flavor; skip the identity probe.
    #[arg(long = "detect-only", action = ArgAction::SetTrue)]
    pub detect_only: bool,

    /// Network timeout (seconds) applied to each HTTP request.
    #[arg(
        long = "timeout",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=120)
    )]
    timeout_secs: u64,
}

impl CliArgs {
    /// Returns the configured network timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolve the credential from `--api-key` or the environment.
    pub fn api_key(&self) -> Result<ApiKey> {
        ApiKey::new(self.api_key.as_deref().ok_or(Error::CredentialMissing)?)
    }

    pub fn endpoints(&self) -> Result<Endpoints> {
        Endpoints::new(&self.new_base, &self.classic_base)
    }

    /// Convert CLI arguments into a session configuration.
    pub fn session_config(&self) -> Result<SessionConfig> {
        Ok(SessionConfig::new(
            self.api_key()?,
            self.endpoints()?,
            self.timeout(),
        ))
    }
}

/// Load `.env` from the working directory so `MAILERLITE_API_KEY` and
/// `RUST_LOG` can live there. Runs before tracing is installed, so the
/// outcome is reported afterwards through [`log_dotenv`].
pub fn load_dotenv() -> dotenvy::Result<PathBuf> {
    load_dotenv_from(Path::new(".env"))
}

fn load_dotenv_from(path: &Path) -> dotenvy::Result<PathBuf> {
    dotenvy::from_path(path).map(|()| path.to_path_buf())
}

pub fn log_dotenv(outcome: &dotenvy::Result<PathBuf>) {
    match outcome {
        Ok(path) => tracing::debug!("loaded environment from {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("ignoring unreadable .env file: {err}"),
    }
}
