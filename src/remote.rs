use crate::compress::write_atomically;
use crate::constants::{DEFAULT_TINIFY_ENDPOINT, TINIFY_API_KEY_ENV};
use crate::error::{OptimizeError, Result};
use crate::outcome::Outcome;
use reqwest::header::LOCATION;
use reqwest::StatusCode;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Client for the Tinify compression API. Constructed once and passed into
/// every remote call; there is no process-wide credential.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    api_key: String,
    endpoint: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
    message: String,
}

/// Renders a failure response into a single-line message. The service
/// normally answers with a JSON `{error, message}` body, but proxies and
/// auth layers can return HTML or nothing at all.
fn describe_failure(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiError>(body) {
        Ok(detail) => format!("{} ({}): {}", detail.error, status, detail.message),
        Err(_) => {
            let text = body.trim();
            if text.is_empty() {
                status.to_string()
            } else {
                format!("{} ({})", text, status)
            }
        }
    }
}

impl RemoteClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, DEFAULT_TINIFY_ENDPOINT)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Points an existing client at a different endpoint.
    pub fn at_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Reads the API key from the `TINIFY_API_KEY` environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(TINIFY_API_KEY_ENV)
            .map_err(|_| OptimizeError::MissingApiKey(TINIFY_API_KEY_ENV))?;
        Ok(Self::new(api_key))
    }

    /// Uploads raw image bytes to the service and downloads the optimized
    /// result. Quota, auth, and unsupported-format failures come back as
    /// `RemoteService` errors carrying the service's own detail message.
    pub async fn shrink(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(format!("{}/shrink", self.endpoint))
            .basic_auth("api", Some(&self.api_key))
            .body(data)
            .send()
            .await
            .map_err(|e| OptimizeError::RemoteService(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(OptimizeError::RemoteService(describe_failure(
                status, &body,
            )));
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
            .ok_or_else(|| {
                OptimizeError::RemoteService("response missing Location header".to_string())
            })?;

        let optimized = self
            .http
            .get(&location)
            .basic_auth("api", Some(&self.api_key))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| OptimizeError::RemoteService(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| OptimizeError::RemoteService(e.to_string()))?;

        Ok(optimized.to_vec())
    }

    pub fn shrink_sync(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| OptimizeError::RemoteService(format!("Failed to create runtime: {e}")))?;
        runtime.block_on(self.shrink(data))
    }
}

/// Compresses an image through the remote service and overwrites it in
/// place. Any service-side failure leaves the original bytes untouched; the
/// call consumes service quota and is never retried here.
pub fn compress_remote(path: &Path, client: &RemoteClient) -> Result<Outcome> {
    if !path.exists() {
        return Err(OptimizeError::FileNotFound(path.to_path_buf()));
    }

    let original_size = fs::metadata(path)?.len();
    let data = fs::read(path)?;

    let optimized = client.shrink_sync(data)?;
    write_atomically(path, &optimized)?;
    let new_size = fs::metadata(path)?.len();

    Ok(Outcome {
        path: path.to_path_buf(),
        original_size,
        new_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_from_env_missing_key() {
        std::env::remove_var(TINIFY_API_KEY_ENV);
        let result = RemoteClient::from_env();
        assert!(matches!(
            result,
            Err(OptimizeError::MissingApiKey(TINIFY_API_KEY_ENV))
        ));
    }

    #[test]
    fn test_describe_failure_json_body() {
        let body = r#"{"error":"Unauthorized","message":"Credentials are invalid."}"#;
        let msg = describe_failure(StatusCode::UNAUTHORIZED, body);
        assert_eq!(
            msg,
            "Unauthorized (401 Unauthorized): Credentials are invalid."
        );
    }

    #[test]
    fn test_describe_failure_non_json_body() {
        let msg = describe_failure(StatusCode::BAD_GATEWAY, "<html>upstream down</html>\n");
        assert_eq!(msg, "<html>upstream down</html> (502 Bad Gateway)");
    }

    #[test]
    fn test_describe_failure_empty_body() {
        let msg = describe_failure(StatusCode::UNAUTHORIZED, "");
        assert_eq!(msg, "401 Unauthorized");
    }

    #[test]
    fn test_compress_remote_not_found() {
        let client = RemoteClient::new("test-key");
        let result = compress_remote(Path::new("/no/such/file.jpg"), &client);
        assert!(matches!(result, Err(OptimizeError::FileNotFound(_))));
    }

    #[test]
    fn test_compress_remote_failure_leaves_file_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("photo.jpg");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"original image bytes").unwrap();
        drop(file);

        // Nothing listens here, so the upload fails before any write.
        let client = RemoteClient::with_endpoint("test-key", "http://127.0.0.1:9");
        let result = compress_remote(&path, &client);

        assert!(matches!(result, Err(OptimizeError::RemoteService(_))));
        assert_eq!(fs::read(&path).unwrap(), b"original image bytes");
    }
}
