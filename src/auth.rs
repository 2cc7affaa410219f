use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::Result;
use crate::model::{ApiKey, Flavor};

/// Header carrying the key on the Classic (v2) API.
pub const CLASSIC_KEY_HEADER: &str = "x-mailerlite-apikey";

/// Builds the request headers for `flavor`'s authentication convention.
///
/// Pure: the same key and flavor always produce the same map. The header
/// value is marked sensitive so it is masked in reqwest's debug output.
pub fn auth_headers(key: &ApiKey, flavor: Flavor) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let (name, mut value) = match flavor {
        Flavor::New => (
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", key.expose()))?,
        ),
        Flavor::Classic => (
            classic_key_header(),
            HeaderValue::from_str(key.expose())?,
        ),
    };
    value.set_sensitive(true);
    headers.insert(name, value);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

fn classic_key_header() -> HeaderName {
    HeaderName::from_static(CLASSIC_KEY_HEADER)
}
