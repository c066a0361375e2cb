use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};

use crate::utils::error::{DashboardError, DashboardResult};

/// Read-only access to the event backend.
///
/// Implementations return the raw response body; decoding happens at the
/// component boundary so both failure kinds are handled in one place.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Issue a `GET` for `path` with the given query parameters
    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> DashboardResult<String>;
}

/// HTTP transport backed by reqwest.
///
/// No request timeout is configured; a hung backend holds the refresh until
/// the connection itself fails.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: Client,
}

impl HttpTransport {
    /// Create a transport for the backend at `base_url`
    pub fn new(base_url: &str) -> DashboardResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DashboardError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DashboardError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        let client = Client::builder().build()?;

        Ok(Self { base_url, client })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL for an endpoint; parameters are form-encoded in order
    pub fn endpoint_url(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> DashboardResult<Url> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| DashboardError::InvalidUrl(format!("{}: {}", path, e)))?;

        if !params.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(params.iter().map(|(key, value)| (*key, value.as_str())));
        }

        Ok(url)
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str, params: &[(&'static str, String)]) -> DashboardResult<String> {
        let url = self.endpoint_url(path, params)?;
        debug!("GET {}", url);

        let response = self.client.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Non-2xx bodies still go through envelope decoding; a JSON error body
        // with `success: false` is an application failure, not a transport one.
        debug!("GET {} -> {} ({} bytes)", url, status, body.len());

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_without_empty_query() {
        let transport = HttpTransport::new("http://127.0.0.1:5000").unwrap();

        let url = transport.endpoint_url("/api/events", &[]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/events");

        let url = transport
            .endpoint_url(
                "/api/events",
                &[("threat_level", "High".to_string()), ("source_ip", "10.0.0.1".to_string())],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:5000/api/events?threat_level=High&source_ip=10.0.0.1"
        );
    }

    #[test]
    fn encodes_query_values() {
        let transport = HttpTransport::new("http://localhost:8000/").unwrap();
        let url = transport
            .endpoint_url("/api/events", &[("source_ip", "10.0.0.1 &x=1".to_string())])
            .unwrap();
        assert_eq!(url.query(), Some("source_ip=10.0.0.1+%26x%3D1"));
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(HttpTransport::new("not a url").is_err());
        assert!(HttpTransport::new("mailto:soc@example.com").is_err());
    }
}
