//! HTTP client for the tournament REST API
//!
//! Submissions are JSON requests; any 2xx status counts as success and the
//! `detail` field of an error body is surfaced to the user when present.

use super::error::{extract_detail, SubmissionError};
use super::traits::{ModuleStatus, SubmissionRequest, SubmitReceipt, Submitter};
use crate::schema::{join_url, Method};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Default API address
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8001/api";

const MODULES_PATH: &str = "/accreditation/modules/public";

/// Submits forms over HTTP
pub struct HttpSubmitter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSubmitter {
    /// Create a submitter for `base_url`. Without a timeout requests run until
    /// the network stack gives up.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, SubmissionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SubmissionError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Submitter for HttpSubmitter {
    async fn send(&self, request: SubmissionRequest) -> Result<SubmitReceipt, SubmissionError> {
        let builder = match request.method {
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
        };
        let mut builder = builder
            .header("X-Request-Id", request.id.to_string())
            .json(&request.body);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(id = %request.id, method = %request.method, url = %request.url, "Sending submission");
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(SubmitReceipt {
                status: status.as_u16(),
                body: serde_json::from_str(&text).unwrap_or(Value::Null),
            })
        } else {
            Err(SubmissionError::from_status(
                status.as_u16(),
                extract_detail(&text),
            ))
        }
    }

    async fn public_modules(&self) -> Result<Vec<ModuleStatus>, SubmissionError> {
        self.get_json(MODULES_PATH, None).await
    }

    async fn list(&self, path: String, bearer: Option<String>) -> Result<Value, SubmissionError> {
        self.get_json(&path, bearer.as_deref()).await
    }
}

impl HttpSubmitter {
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, SubmissionError> {
        let url = join_url(&self.base_url, path);
        let mut builder = self.client.get(&url);
        if let Some(token) = bearer {
            builder = builder.bearer_auth(token);
        }
        tracing::debug!(%url, "Fetching");
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SubmissionError::from_status(
                status.as_u16(),
                extract_detail(&text),
            ));
        }
        Ok(response.json::<T>().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Endpoint;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;
    use uuid::Uuid;

    /// Serve a single canned response and hand back the raw request
    async fn serve_once(status: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw).to_string();
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&raw).to_string()
        });
        (format!("http://{addr}/api"), handle)
    }

    fn request(base: &str, bearer: Option<&str>) -> SubmissionRequest {
        SubmissionRequest {
            id: Uuid::new_v4(),
            method: Method::Post,
            url: Endpoint::post("/volunteers/register").url(base),
            body: json!({"first_name": "Achieng"}),
            bearer: bearer.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_success_status_returns_receipt() {
        let (base, server) = serve_once("201 Created", r#"{"id": "vol-1"}"#).await;
        let submitter = HttpSubmitter::new(base.clone(), None).unwrap();
        let req = request(&base, None);
        let id = req.id;

        let receipt = submitter.send(req).await.unwrap();
        assert_eq!(receipt.status, 201);
        assert_eq!(receipt.body, json!({"id": "vol-1"}));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /api/volunteers/register HTTP/1.1"));
        assert!(raw.to_lowercase().contains(&format!("x-request-id: {id}")));
        assert!(raw.ends_with(r#"{"first_name":"Achieng"}"#));
        assert!(!raw.to_lowercase().contains("authorization"));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_detail() {
        let (base, server) = serve_once(
            "500 Internal Server Error",
            r#"{"detail": "Registration is closed"}"#,
        )
        .await;
        let submitter = HttpSubmitter::new(base.clone(), None).unwrap();

        let err = submitter.send(request(&base, None)).await.unwrap_err();
        assert_eq!(
            err,
            SubmissionError::Rejected {
                status: 500,
                detail: Some("Registration is closed".to_string())
            }
        );
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unauthorized_and_bearer_header() {
        let (base, server) = serve_once("401 Unauthorized", "{}").await;
        let submitter = HttpSubmitter::new(base.clone(), None).unwrap();

        let err = submitter
            .send(request(&base, Some("tok-9")))
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());

        let raw = server.await.unwrap();
        assert!(raw.to_lowercase().contains("authorization: bearer tok-9"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = format!("http://{addr}/api");
        let submitter = HttpSubmitter::new(base.clone(), Some(Duration::from_secs(5))).unwrap();
        let err = submitter.send(request(&base, None)).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Network(_)));
    }

    #[tokio::test]
    async fn test_public_modules_parses_list() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"slug": "media", "name": "Media", "is_active": true}, {"slug": "jobs", "name": "Jobs", "is_active": false}]"#,
        )
        .await;
        let submitter = HttpSubmitter::new(base, None).unwrap();

        let modules = submitter.public_modules().await.unwrap();
        assert_eq!(modules.len(), 2);
        assert!(modules[0].is_active);
        assert_eq!(modules[1].slug, "jobs");
        assert!(!modules[1].is_active);

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/accreditation/modules/public HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_list_sends_bearer_and_returns_body() {
        let (base, server) = serve_once(
            "200 OK",
            r#"[{"zone_id": "z-1", "name": "VIP", "type": "vip"}]"#,
        )
        .await;
        let submitter = HttpSubmitter::new(base, None).unwrap();

        let listing = submitter
            .list("/accreditation/zones".to_string(), Some("tok-3".to_string()))
            .await
            .unwrap();
        assert_eq!(listing[0]["zone_id"], json!("z-1"));

        let raw = server.await.unwrap();
        assert!(raw.starts_with("GET /api/accreditation/zones HTTP/1.1"));
        assert!(raw.to_lowercase().contains("authorization: bearer tok-3"));
    }

    #[tokio::test]
    async fn test_list_forbidden_is_rejected() {
        let (base, server) = serve_once("403 Forbidden", r#"{"detail": "Super admin only"}"#).await;
        let submitter = HttpSubmitter::new(base, None).unwrap();

        let err = submitter
            .list("/accreditation/zones".to_string(), None)
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Super admin only");
        server.await.unwrap();
    }
}
