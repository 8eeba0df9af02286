use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use reqwest::{Client as ReqwestClient, Response};
use url::Url;

use crate::client_logger::ClientLogger;
use crate::error::{Error, Result};
use crate::observability::{
    CHAT_REQUEST_DURATION, CHAT_REQUEST_ERRORS, CHAT_REQUESTS, DOWNLOAD_BYTES, DOWNLOAD_ERRORS,
    DOWNLOADS, UPLOAD_BYTES, UPLOAD_ERRORS, UPLOADS,
};
use crate::types::{ChatReply, ChatRequest, ErrorReply, UploadReply, UploadedFile};

/// Server the client talks to when none is configured.
pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The three calls the chat client makes against the loan backend.
///
/// [`LoanServer`] speaks HTTP; tests substitute their own implementation.
#[async_trait::async_trait]
pub trait LoanApi: Send + Sync {
    /// `POST /api/chat`: send one user turn and get the assistant's reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;

    /// `POST /api/upload`: send a document for the session.
    async fn upload(&self, session_id: &str, file: &UploadedFile) -> Result<UploadReply>;

    /// `GET /api/download/{session_id}`: fetch the sanction letter PDF.
    async fn download(&self, session_id: &str) -> Result<Bytes>;
}

/// HTTP client for the loan backend.
#[derive(Clone)]
pub struct LoanServer {
    client: ReqwestClient,
    base_url: Url,
    timeout: Duration,
    logger: Option<Arc<dyn ClientLogger>>,
}

impl LoanServer {
    /// Create a client for the server at `http://localhost:5000/`.
    pub fn new() -> Result<Self> {
        Self::with_options(None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = parse_base_url(base_url.as_deref().unwrap_or(DEFAULT_SERVER_URL))?;
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            logger: None,
        })
    }

    /// Attach a logger that observes every exchange.
    pub fn with_logger(mut self, logger: Arc<dyn ClientLogger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// The server this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    fn json_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn send_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Turn a non-success response into an [`Error::Api`], keeping the
    /// server's `error` field when the body has one.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();
        let message = match response.bytes().await {
            Ok(body) => serde_json::from_slice::<ErrorReply>(&body)
                .ok()
                .and_then(|reply| reply.error),
            Err(_) => None,
        };
        Error::api(status_code, message)
    }

    async fn chat_inner(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint("api/chat")?;
        let response = self
            .client
            .post(url)
            .headers(Self::json_headers())
            .json(request)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.json::<ChatReply>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    async fn upload_inner(&self, session_id: &str, file: &UploadedFile) -> Result<UploadReply> {
        let url = self.endpoint("api/upload")?;
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)
            .map_err(|e| {
                Error::validation(
                    format!("Invalid MIME type {}: {}", file.mime_type, e),
                    Some("type".to_string()),
                )
            })?;
        let form = Form::new()
            .part("file", part)
            .text("session_id", session_id.to_string());

        let response = self
            .client
            .post(url)
            .header(header::ACCEPT, HeaderValue::from_static("application/json"))
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        // The body is optional on success.
        let body = response.bytes().await.map_err(|e| self.send_error(e))?;
        Ok(serde_json::from_slice(&body).unwrap_or_default())
    }

    async fn download_inner(&self, session_id: &str) -> Result<Bytes> {
        let url = self.endpoint(&format!("api/download/{}", session_id))?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.send_error(e))?;

        if !response.status().is_success() {
            return Err(Self::process_error_response(response).await);
        }

        response.bytes().await.map_err(|e| self.send_error(e))
    }
}

impl fmt::Debug for LoanServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoanServer")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

#[async_trait::async_trait]
impl LoanApi for LoanServer {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        CHAT_REQUESTS.click();
        let start = Instant::now();
        let result = self.chat_inner(request).await;
        CHAT_REQUEST_DURATION.add(start.elapsed().as_secs_f64());
        if result.is_err() {
            CHAT_REQUEST_ERRORS.click();
        }
        if let Some(logger) = &self.logger {
            logger.log_chat(request, result.as_ref());
        }
        result
    }

    async fn upload(&self, session_id: &str, file: &UploadedFile) -> Result<UploadReply> {
        UPLOADS.click();
        let result = self.upload_inner(session_id, file).await;
        match &result {
            Ok(_) => UPLOAD_BYTES.count(file.size()),
            Err(_) => UPLOAD_ERRORS.click(),
        }
        if let Some(logger) = &self.logger {
            logger.log_upload(
                session_id,
                &file.name,
                file.size(),
                result.as_ref().map(|_| ()),
            );
        }
        result
    }

    async fn download(&self, session_id: &str) -> Result<Bytes> {
        DOWNLOADS.click();
        let result = self.download_inner(session_id).await;
        match &result {
            Ok(bytes) => DOWNLOAD_BYTES.count(bytes.len() as u64),
            Err(_) => DOWNLOAD_ERRORS.click(),
        }
        if let Some(logger) = &self.logger {
            logger.log_download(session_id, result.as_ref().map(|b| b.len() as u64));
        }
        result
    }
}

/// Parse a server URL so that relative endpoints join beneath it.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = LoanServer::new().unwrap();
        assert_eq!(client.base_url.as_str(), "http://localhost:5000/");
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);
        assert!(client.logger.is_none());

        let client = LoanServer::with_options(
            Some("https://loans.example.com".to_string()),
            Some(Duration::from_secs(30)),
        )
        .unwrap();
        assert_eq!(client.base_url.as_str(), "https://loans.example.com/");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn endpoints_join_under_base_path() {
        let client =
            LoanServer::with_options(Some("http://10.0.0.5:8080/tenant".to_string()), None)
                .unwrap();
        assert_eq!(
            client.endpoint("api/chat").unwrap().as_str(),
            "http://10.0.0.5:8080/tenant/api/chat"
        );
        assert_eq!(
            client
                .endpoint("api/download/session_abc_1")
                .unwrap()
                .as_str(),
            "http://10.0.0.5:8080/tenant/api/download/session_abc_1"
        );
    }

    #[test]
    fn rejects_unparseable_url() {
        let err = LoanServer::with_options(Some("not a url".to_string()), None).unwrap_err();
        assert!(matches!(err, Error::Url { .. }));
    }

    #[test]
    fn debug_hides_client_internals() {
        let client = LoanServer::new().unwrap();
        let shown = format!("{:?}", client);
        assert!(shown.contains("localhost:5000"));
        assert!(shown.contains("logger: false"));
    }
}
