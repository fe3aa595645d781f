//! Shared HTTP plumbing for upstream providers.
//!
//! One pooled `reqwest::Client` per provider, built once from the endpoint
//! configuration with the identifying `User-Agent` and a bounded timeout.
//! Every transport fault is classified into the crate error model here so
//! provider clients never see a raw `reqwest::Error`.

use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

use super::{Fetched, ProviderFailure, ProviderResult};
use crate::types::{EndpointConfig, Error, Result};

/// HTTP client bound to one upstream base URL.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    name: &'static str,
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl UpstreamClient {
    /// Build a client for `endpoint`.
    pub fn new(name: &'static str, endpoint: &EndpointConfig, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(endpoint.timeout)
            .build()?;

        Ok(Self {
            name,
            client,
            base_url: endpoint.base_url.trim_end_matches('/').to_string(),
            timeout: endpoint.timeout,
        })
    }

    /// Resolve `path` and `query` against the base URL.
    pub fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url> {
        let raw = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut url = Url::parse(&raw)
            .map_err(|e| Error::config(format!("invalid {} URL '{}': {}", self.name, raw, e)))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Issue one GET and decode the JSON body into `T`.
    pub async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(path, query)?;
        let endpoint = url.to_string();

        tracing::debug!(upstream = self.name, %endpoint, "Sending upstream request");

        match self.fetch(url).await {
            Ok(value) => Ok(Fetched::new(endpoint, value)),
            Err(error) => {
                tracing::debug!(upstream = self.name, %endpoint, %error, "Upstream request failed");
                Err(ProviderFailure::new(Some(endpoint), error))
            }
        }
    }

    async fn fetch<T>(&self, url: Url) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(Error::upstream(
                Some(status.as_u16()),
                format!("{} responded with {}", self.name, upstream_reason(status, &body)),
            ));
        }

        if body.trim().is_empty() {
            return Err(Error::parse(format!("{} returned an empty body", self.name)));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::parse(format!("{} returned an unreadable body: {}", self.name, e)))
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::timeout(format!(
                "{} did not respond within {}ms",
                self.name,
                self.timeout.as_millis()
            ))
        } else if err.is_decode() {
            Error::parse(format!("{} returned an unreadable body: {}", self.name, err))
        } else {
            Error::upstream(
                err.status().map(|s| s.as_u16()),
                format!("{} request failed: {}", self.name, err),
            )
        }
    }
}

/// Best human-readable reason for a failed status: the upstream's own
/// message if the body is JSON carrying one, otherwise the canonical phrase.
fn upstream_reason(status: StatusCode, body: &str) -> String {
    let from_body = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.get("message")
            .and_then(Value::as_str)
            .or_else(|| v.get("error").and_then(Value::as_str))
            .or_else(|| v.pointer("/error/message").and_then(Value::as_str))
            .map(str::to_string)
    });

    let phrase = status.canonical_reason().unwrap_or("unknown status");
    match from_body {
        Some(msg) => format!("HTTP {} {}: {}", status.as_u16(), phrase, msg),
        None => format!("HTTP {} {}", status.as_u16(), phrase),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> UpstreamClient {
        let endpoint = EndpointConfig::new("http://localhost:9/", Duration::from_secs(1));
        UpstreamClient::new("Nominatim", &endpoint, "test-agent").unwrap()
    }

    #[test]
    fn test_url_joins_path_and_query() {
        let url = client()
            .url("/search", &[("q", "New York".to_string()), ("format", "json".to_string())])
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:9/search?q=New+York&format=json");
    }

    #[test]
    fn test_url_keeps_osrm_coordinates() {
        let url = client().url("route/v1/car/-74.006,40.7128;-71.06,42.36", &[]).unwrap();
        assert_eq!(url.path(), "/route/v1/car/-74.006,40.7128;-71.06,42.36");
    }

    #[test]
    fn test_upstream_reason_prefers_body_message() {
        let reason = upstream_reason(
            StatusCode::BAD_REQUEST,
            r#"{"code":"InvalidQuery","message":"Query string malformed"}"#,
        );
        assert_eq!(reason, "HTTP 400 Bad Request: Query string malformed");

        let reason = upstream_reason(StatusCode::SERVICE_UNAVAILABLE, "<html>down</html>");
        assert_eq!(reason, "HTTP 503 Service Unavailable");
    }

    #[test]
    fn test_nested_error_message() {
        let reason = upstream_reason(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"Nothing to search for."}}"#,
        );
        assert!(reason.ends_with("Nothing to search for."));
    }
}
