//! HTTP gateway: the single point of entry for all calls to the resume backend.
//!
//! Endpoints: `GET /resumes`, `GET /resumes/{id}`, `POST /resumes`,
//! `PUT /resumes/{id}`, `DELETE /resumes/{id}`.
//!
//! No retries: a failed save is reported to the caller and the edit stays local.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, warn};

use crate::config::Config;
use crate::errors::GatewayError;
use crate::gateway::PersistenceGateway;
use crate::models::resume::{SaveRequest, StoredResume};

const RESUMES_PATH: &str = "resumes";

/// Error envelope produced by the backend framework: `{"detail": ...}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: serde_json::Value,
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// `{base}/resumes` or `{base}/resumes/{id}`, with `id` percent-encoded as
    /// a single path segment.
    fn resumes_url(&self, id: Option<&str>) -> Result<Url, GatewayError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| GatewayError::InvalidBaseUrl(self.base_url.to_string()))?;
            segments.pop_if_empty().push(RESUMES_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn list(&self) -> Result<Vec<StoredResume>, GatewayError> {
        let url = self.resumes_url(None)?;
        let response = self.client.get(url).send().await?;
        let resumes: Vec<StoredResume> = decode(response, None).await?;
        debug!("Listed {} resumes", resumes.len());
        Ok(resumes)
    }

    async fn load(&self, id: &str) -> Result<StoredResume, GatewayError> {
        let url = self.resumes_url(Some(id))?;
        let response = self.client.get(url).send().await?;
        decode(response, Some(id)).await
    }

    async fn save(&self, request: &SaveRequest) -> Result<StoredResume, GatewayError> {
        let builder = match request.id.as_deref() {
            Some(id) => self.client.put(self.resumes_url(Some(id))?),
            None => self.client.post(self.resumes_url(None)?),
        };
        let response = builder.json(request).send().await?;
        let stored: StoredResume = decode(response, request.id.as_deref()).await?;
        debug!("Saved resume {} (last edited {})", stored.id, stored.last_edited);
        Ok(stored)
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.resumes_url(Some(id))?;
        let response = self.client.delete(url).send().await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let _: serde_json::Value = decode(response, Some(id)).await?;
        debug!("Deleted resume {}", id);
        Ok(())
    }
}

/// Maps a backend response to `T` or a typed error.
async fn decode<T: DeserializeOwned>(
    response: Response,
    id: Option<&str>,
) -> Result<T, GatewayError> {
    let status = response.status();

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(GatewayError::NotFound(id.to_string()));
        }
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("Resume API returned {}: {}", status, body);
        return Err(GatewayError::Api {
            status: status.as_u16(),
            message: error_message(body),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Extracts `detail` from an error body, falling back to the raw body.
fn error_message(body: String) -> String {
    match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(ApiErrorBody {
            detail: serde_json::Value::String(message),
        }) => message,
        Ok(ApiErrorBody { detail }) => detail.to_string(),
        Err(_) => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(base: &str) -> HttpGateway {
        HttpGateway::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_resumes_url_without_trailing_slash() {
        let url = gateway("http://localhost:8000").resumes_url(None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/resumes");
    }

    #[test]
    fn test_resumes_url_keeps_base_path_and_encodes_id() {
        let url = gateway("http://example.com/api/")
            .resumes_url(Some("resume 1/x"))
            .unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/resumes/resume%201%2Fx");
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = HttpGateway::new("not a url", Duration::from_secs(1))
            .err()
            .expect("parse should fail");
        assert!(matches!(err, GatewayError::InvalidBaseUrl(_)));

        let err = HttpGateway::new("mailto:ops@example.com", Duration::from_secs(1))
            .err()
            .expect("cannot-be-a-base should fail");
        assert!(matches!(err, GatewayError::InvalidBaseUrl(_)));
    }

    #[test]
    fn test_error_message_prefers_detail_string() {
        assert_eq!(
            error_message(r#"{"detail":"Resume not found"}"#.to_string()),
            "Resume not found"
        );
        assert_eq!(
            error_message(r#"{"detail":[{"msg":"field required"}]}"#.to_string()),
            r#"[{"msg":"field required"}]"#
        );
        assert_eq!(error_message("boom".to_string()), "boom");
    }
}
