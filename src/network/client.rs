//! HTTP transport - performs one request and formats the response

use std::future::Future;

use thiserror::Error;

use crate::models::FetchRequest;

/// A completed exchange as seen by the transport
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fetched {
    pub status: u16,
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid method `{0}`")]
    InvalidMethod(String),
    #[error("Relative url `{0}` needs a base_url in the config")]
    RelativeUrl(String),
    #[error("Invalid url `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Connection failed: {0}")]
    Connect(String),
    #[error("Error reading body: {0}")]
    Body(String),
    #[error("Request failed: {0}")]
    Other(String),
}

/// Given a method and URL, eventually produce a body or a failure
pub trait Transport: Clone + Send + Sync + 'static {
    fn fetch(&self, request: FetchRequest)
        -> impl Future<Output = Result<Fetched, FetchError>> + Send;
}

/// Transport backed by a shared reqwest client
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base_url: Option<String>,
}

impl ReqwestTransport {
    pub fn new(base_url: Option<String>) -> Self {
        ReqwestTransport {
            client: create_client(),
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()),
        }
    }

    /// `/path` is joined onto the base URL; a bare host gets `http://`
    pub fn resolve_url(&self, url: &str) -> Result<reqwest::Url, FetchError> {
        let full = if url.starts_with('/') {
            match &self.base_url {
                Some(base) => format!("{}{}", base, url),
                None => return Err(FetchError::RelativeUrl(url.to_string())),
            }
        } else if url.contains("://") {
            url.to_string()
        } else {
            format!("http://{}", url)
        };

        reqwest::Url::parse(&full).map_err(|e| FetchError::InvalidUrl {
            url: full.clone(),
            reason: e.to_string(),
        })
    }
}

impl Transport for ReqwestTransport {
    fn fetch(
        &self,
        request: FetchRequest,
    ) -> impl Future<Output = Result<Fetched, FetchError>> + Send {
        let client = self.client.clone();
        let target = self.resolve_url(&request.address.url);

        async move {
            let method = reqwest::Method::from_bytes(request.address.method.as_bytes())
                .map_err(|_| FetchError::InvalidMethod(request.address.method.clone()))?;
            let url = target?;

            let mut req_builder = client.request(method, url);
            for header in request.headers.iter() {
                req_builder = req_builder.header(&header.key, &header.value);
            }
            if let Some(body) = request.body {
                req_builder = req_builder.body(body);
            }

            let resp = req_builder.send().await.map_err(|e| {
                if e.is_connect() {
                    FetchError::Connect(e.to_string())
                } else {
                    FetchError::Other(e.to_string())
                }
            })?;

            let status = resp.status();
            let headers = resp
                .headers()
                .iter()
                .map(|(name, value)| {
                    (
                        name.to_string(),
                        String::from_utf8_lossy(value.as_bytes()).into_owned(),
                    )
                })
                .collect();

            let body = resp
                .text()
                .await
                .map_err(|e| FetchError::Body(e.to_string()))?;

            Ok(Fetched {
                status: status.as_u16(),
                reason: status.canonical_reason().map(String::from),
                headers,
                body: pretty_body(body),
            })
        }
    }
}

/// Re-indents JSON bodies, leaves everything else untouched
pub fn pretty_body(body: String) -> String {
    match serde_json::from_str::<serde_json::Value>(&body) {
        Ok(json) => serde_json::to_string_pretty(&json).unwrap_or(body),
        Err(_) => body,
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(concat!("gurl/", env!("CARGO_PKG_VERSION")))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, HeaderSet};

    fn request(method: &str, url: &str) -> FetchRequest {
        FetchRequest {
            address: Address {
                method: method.to_string(),
                url: url.to_string(),
            },
            headers: HeaderSet::new(),
            body: None,
        }
    }

    #[test]
    fn test_resolve_relative_against_base() {
        let transport = ReqwestTransport::new(Some(String::from("http://localhost:8080/api/")));
        let url = transport.resolve_url("/shops").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/shops");
    }

    #[test]
    fn test_resolve_bare_host_and_absolute() {
        let transport = ReqwestTransport::new(None);
        assert_eq!(
            transport.resolve_url("example.com/users").unwrap().as_str(),
            "http://example.com/users"
        );
        assert_eq!(
            transport.resolve_url("https://example.com/").unwrap().as_str(),
            "https://example.com/"
        );
        assert_eq!(
            transport.resolve_url("/shops"),
            Err(FetchError::RelativeUrl(String::from("/shops")))
        );
    }

    #[tokio::test]
    async fn test_invalid_method_fails_without_network() {
        let transport = ReqwestTransport::new(None);
        let result = transport.fetch(request("GE(T", "http://127.0.0.1:9/")).await;
        assert_eq!(result, Err(FetchError::InvalidMethod(String::from("GE(T"))));
    }

    #[tokio::test]
    async fn test_relative_url_fails_without_network() {
        let transport = ReqwestTransport::new(None);
        let result = transport.fetch(request("GET", "/users")).await;
        assert_eq!(result, Err(FetchError::RelativeUrl(String::from("/users"))));
    }

    #[test]
    fn test_pretty_body() {
        assert_eq!(pretty_body(String::from(r#"{"id":1}"#)), "{\n  \"id\": 1\n}");
        assert_eq!(pretty_body(String::from("plain text")), "plain text");
    }
}
