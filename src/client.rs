use crate::errors::ClientError;
use crate::models::{RequestDescriptor, decode_record, decode_records};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

/// JSON client for the dashboard backend.
///
/// Every call is a single attempt: no retries, no timeout, no caching. The
/// cookie store keeps whatever session the backend hands out and sends it back
/// on later requests to the same origin.
#[derive(Debug, Clone)]
pub struct JsonClient {
    base_url: Url,
    http: Client,
}

impl JsonClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        let http = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ClientError::Transport)?;
        Self::with_http(base_url, http)
    }

    pub fn with_http(base_url: &str, http: Client) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidTarget(base_url.to_string()))?;
        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn send_request(&self, descriptor: &RequestDescriptor) -> Result<Value, ClientError> {
        let result = self.execute(descriptor).await;
        if let Err(err) = &result {
            error!(
                resource = %descriptor.target,
                method = %descriptor.method,
                has_payload = descriptor.body().is_some(),
                "json request failed: {err}"
            );
        }
        result
    }

    /// Sends the request and decodes a single JSON object into `T`.
    pub async fn send_request_record<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ClientError> {
        let value = self.send_request(descriptor).await?;
        decode_record(value).inspect_err(|err| log_shape_error(descriptor, err))
    }

    /// Sends the request and decodes a JSON array of objects into `Vec<T>`.
    pub async fn send_request_records<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<Vec<T>, ClientError> {
        let value = self.send_request(descriptor).await?;
        decode_records(value).inspect_err(|err| log_shape_error(descriptor, err))
    }

    async fn execute(&self, descriptor: &RequestDescriptor) -> Result<Value, ClientError> {
        let url = self.resolve(&descriptor.target)?;
        debug!(%url, method = %descriptor.method, "sending json request");

        let mut request = self.http.request(descriptor.method.into(), url);
        if let Some(payload) = descriptor.body() {
            let body = serde_json::to_vec(payload).map_err(ClientError::Encode)?;
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await.map_err(ClientError::Transport)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(ClientError::Transport)?;
        serde_json::from_slice(&bytes).map_err(ClientError::Decode)
    }

    fn resolve(&self, target: &str) -> Result<Url, ClientError> {
        let target = target.trim();
        if target.is_empty() {
            return Err(ClientError::InvalidTarget(target.to_string()));
        }
        if let Ok(url) = Url::parse(target) {
            return Ok(url);
        }
        self.base_url
            .join(target)
            .map_err(|_| ClientError::InvalidTarget(target.to_string()))
    }
}

fn log_shape_error(descriptor: &RequestDescriptor, err: &ClientError) {
    error!(resource = %descriptor.target, "response has unexpected shape: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_targets_join_the_base_url() {
        let client = JsonClient::new("http://127.0.0.1:8000").unwrap();
        let url = client.resolve("/api/users_stats").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/users_stats");
    }

    #[test]
    fn absolute_targets_are_used_as_is() {
        let client = JsonClient::new("http://127.0.0.1:8000").unwrap();
        let url = client.resolve("http://example.com/api/commands").unwrap();
        assert_eq!(url.as_str(), "http://example.com/api/commands");
    }

    #[test]
    fn empty_target_is_rejected() {
        let client = JsonClient::new("http://127.0.0.1:8000").unwrap();
        assert!(matches!(
            client.resolve("  "),
            Err(ClientError::InvalidTarget(_))
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(matches!(
            JsonClient::new("not a url"),
            Err(ClientError::InvalidTarget(_))
        ));
    }
}
