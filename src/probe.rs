//! Flavor detection and the identity probe.
//!
//! Detection walks [`DETECTION_RULES`] in order and stops at the first
//! endpoint that answers with one of its accepted statuses. Transport errors
//! during detection are recorded and skipped; during `whoami` they propagate.

use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Response;
use url::Url;

use crate::auth::auth_headers;
use crate::error::{Error, Result};
use crate::model::{endpoint_url, Detection, Flavor, ProbeResult, CLASSIC_HINT};
use crate::session::HttpSession;

/// One detection attempt: the flavor it proves and the statuses that count as proof.
#[derive(Debug, Clone, Copy)]
pub struct DetectionRule {
    pub flavor: Flavor,
    pub accepted: &'static [u16],
}

impl DetectionRule {
    fn accepts(&self, status: u16) -> bool {
        self.accepted.contains(&status)
    }
}

/// 401/403 still prove the endpoint understood the auth scheme.
/// Classic additionally answers 422 for some authenticated-but-invalid requests.
pub const DETECTION_RULES: &[DetectionRule] = &[
    DetectionRule {
        flavor: Flavor::New,
        accepted: &[200, 401, 403],
    },
    DetectionRule {
        flavor: Flavor::Classic,
        accepted: &[200, 401, 403, 422],
    },
];

/// Determine which API generation the session's key belongs to.
///
/// Any failed attempt, including a key that cannot be sent as a header,
/// falls through to the next rule.
pub async fn detect_flavor(session: &HttpSession) -> Result<Detection> {
    detect_with_rules(session, DETECTION_RULES).await
}

async fn detect_with_rules(session: &HttpSession, rules: &[DetectionRule]) -> Result<Detection> {
    let mut attempts = Vec::with_capacity(rules.len());

    for rule in rules {
        let base = session.endpoints().base_for(rule.flavor);
        let url = endpoint_url(base, rule.flavor.probe_path());

        match send(session, &url, rule.flavor).await {
            Ok(response) => {
                let status = response.status().as_u16();
                if rule.accepts(status) {
                    tracing::debug!(%url, status, flavor = %rule.flavor, "flavor detected");
                    return Ok(Detection {
                        base_url: base.clone(),
                        flavor: rule.flavor,
                    });
                }
                tracing::debug!(%url, status, "inconclusive status");
                attempts.push(format!(
                    "{} /{}: HTTP {status}",
                    rule.flavor,
                    rule.flavor.probe_path()
                ));
            }
            Err(err) => {
                tracing::debug!(%url, "attempt failed: {err}");
                attempts.push(format!(
                    "{} /{}: {err}",
                    rule.flavor,
                    rule.flavor.probe_path()
                ));
            }
        }
    }

    Err(Error::DetectionFailure { attempts })
}

/// Issue one identity-style request against an already detected flavor.
pub async fn whoami(session: &HttpSession, base_url: &Url, flavor: Flavor) -> Result<ProbeResult> {
    let url = endpoint_url(base_url, flavor.probe_path());
    let response = send(session, &url, flavor).await?;
    let status = response.status().as_u16();
    tracing::debug!(%url, status, "probe response");

    match flavor {
        Flavor::New => {
            let data = if declares_json(response.headers()) {
                Some(response.json().await.map_err(Error::Transport)?)
            } else {
                None
            };
            Ok(ProbeResult {
                status,
                data,
                hint: None,
            })
        }
        Flavor::Classic => Ok(ProbeResult {
            status,
            data: None,
            hint: Some(CLASSIC_HINT.to_owned()),
        }),
    }
}

async fn send(session: &HttpSession, url: &str, flavor: Flavor) -> Result<Response> {
    let headers = auth_headers(session.api_key(), flavor)?;
    session
        .client()
        .get(url)
        .headers(headers)
        .send()
        .await
        .map_err(Error::Transport)
}

fn declares_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}
