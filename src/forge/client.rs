use crate::error::{ReleaseMakerError, Result};
use crate::forge::ForgeApi;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde_json::Value;
use tracing::debug;

/// Blocking HTTP client for a GitHub-compatible REST API.
///
/// Requests are anonymous unless a token is supplied. There is no retry and
/// no timeout beyond the client defaults.
pub struct HttpForge {
    client: Client,
}

impl HttpForge {
    pub fn new(token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("release-maker/", env!("CARGO_PKG_VERSION"))),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        if let Some(token) = token {
            let mut value = HeaderValue::from_str(&format!("token {}", token)).map_err(|_| {
                ReleaseMakerError::token("Forge token contains characters not allowed in a header")
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder().default_headers(headers).build()?;
        Ok(HttpForge { client })
    }

    /// Decode a response, turning any non-2xx status into an error with the body
    fn decode(url: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ReleaseMakerError::http(url, status.as_u16(), body));
        }
        Ok(response.json::<Value>()?)
    }
}

impl ForgeApi for HttpForge {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        debug!(url, ?query, "GET");
        let response = self.client.get(url).query(query).send()?;
        Self::decode(url, response)
    }

    fn post(&self, url: &str, body: &Value) -> Result<Value> {
        debug!(url, "POST");
        let response = self.client.post(url).json(body).send()?;
        Self::decode(url, response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_client_builds() {
        assert!(HttpForge::new(None).is_ok());
    }

    #[test]
    fn test_token_client_builds() {
        assert!(HttpForge::new(Some("ghp_example")).is_ok());
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        let err = HttpForge::new(Some("bad\ntoken")).err().unwrap();
        assert!(matches!(err, ReleaseMakerError::Token(_)));
    }
}
