//! Value types shared by detection and probing.

use std::fmt;

use serde::{Serialize, Serializer};
use url::Url;

use crate::error::{Error, Result};

pub const NEW_BASE: &str = "https://connect.mailerlite.com/api";
pub const CLASSIC_BASE: &str = "https://api.mailerlite.com/api/v2";

pub const CLASSIC_HINT: &str = "Classic API probe (/groups)";

/// Opaque MailerLite API key. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trims surrounding whitespace; an empty result is rejected.
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(Error::CredentialMissing);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Which MailerLite API generation a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Connect API, bearer-token auth.
    New,
    /// v2 API, `X-MailerLite-ApiKey` auth.
    Classic,
}

impl Flavor {
    pub fn is_new(self) -> bool {
        matches!(self, Flavor::New)
    }

    /// Path probed for this flavor, relative to its base url.
    pub fn probe_path(self) -> &'static str {
        match self {
            Flavor::New => "me",
            Flavor::Classic => "groups",
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Flavor::New => f.write_str("new"),
            Flavor::Classic => f.write_str("classic"),
        }
    }
}

/// Base urls of both API generations.
#[derive(Debug, Clone)]
pub struct Endpoints {
    pub new_base: Url,
    pub classic_base: Url,
}

impl Endpoints {
    pub fn new(new_base: &str, classic_base: &str) -> Result<Self> {
        Ok(Self {
            new_base: parse_base(new_base)?,
            classic_base: parse_base(classic_base)?,
        })
    }

    pub fn base_for(&self, flavor: Flavor) -> &Url {
        match flavor {
            Flavor::New => &self.new_base,
            Flavor::Classic => &self.classic_base,
        }
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| Error::InvalidUrl {
        url: raw.to_owned(),
        source,
    })
}

/// Joins `path` onto `base`, keeping any path the base already carries.
pub fn endpoint_url(base: &Url, path: &str) -> String {
    format!("{}/{}", base.as_str().trim_end_matches('/'), path)
}

/// Outcome of flavor detection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    #[serde(serialize_with = "serialize_url")]
    pub base_url: Url,
    #[serde(rename = "is_new", serialize_with = "serialize_is_new")]
    pub flavor: Flavor,
}

fn serialize_url<S: Serializer>(
    url: &Url,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(url.as_str().trim_end_matches('/'))
}

fn serialize_is_new<S: Serializer>(
    flavor: &Flavor,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_bool(flavor.is_new())
}

/// Status and payload of a `whoami` probe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn api_key_is_trimmed() {
        let key = ApiKey::new("  abc123\n").unwrap();
        assert_eq!(key.expose(), "abc123");
    }

    #[test]
    fn blank_api_key_is_missing() {
        assert_matches!(ApiKey::new(""), Err(Error::CredentialMissing));
        assert_matches!(ApiKey::new(" \t "), Err(Error::CredentialMissing));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("secret-value").unwrap();
        assert!(!format!("{key:?}").contains("secret-value"));
    }

    #[test]
    fn endpoint_url_keeps_base_path() {
        let base = Url::parse("https://api.mailerlite.com/api/v2").unwrap();
        assert_eq!(
            endpoint_url(&base, "groups"),
            "https://api.mailerlite.com/api/v2/groups"
        );
        let slashed = Url::parse("http://127.0.0.1:9000/").unwrap();
        assert_eq!(endpoint_url(&slashed, "me"), "http://127.0.0.1:9000/me");
    }

    #[test]
    fn rejects_unparseable_base() {
        assert_matches!(
            Endpoints::new("not a url", CLASSIC_BASE),
            Err(Error::InvalidUrl { url, .. }) if url == "not a url"
        );
    }

    #[test]
    fn detection_serializes_like_report() {
        let detection = Detection {
            base_url: Endpoints::new(NEW_BASE, CLASSIC_BASE).unwrap().new_base,
            flavor: Flavor::New,
        };
        assert_eq!(
            serde_json::to_value(&detection).unwrap(),
            json!({ "base_url": NEW_BASE, "is_new": true })
        );
    }

    #[test]
    fn probe_result_skips_absent_fields() {
        let result = ProbeResult {
            status: 200,
            data: None,
            hint: Some(CLASSIC_HINT.to_owned()),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "status": 200, "hint": CLASSIC_HINT })
        );
    }
}
