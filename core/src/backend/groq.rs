//! Groq Backend Implementation
//!
//! Completion backend for Groq's OpenAI-compatible chat API. Any endpoint
//! speaking the same `/chat/completions` dialect works by changing the URL.
//!
//! # Wire format
//!
//! - Request: `POST {api_url}` with a JSON [`CompletionRequest`] body and
//!   `Authorization: Bearer <key>`
//! - Response: JSON object; the reply lives at `choices[0].message.content`
//!
//! A missing API key is not checked here. The request goes out without an
//! `Authorization` header and the endpoint's 401 becomes the error.

use async_trait::async_trait;

use super::traits::{CompletionBackend, CompletionError, CompletionRequest};

/// Default chat-completion endpoint
pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Groq (OpenAI-compatible) backend client
#[derive(Clone)]
pub struct GroqBackend {
    /// Full chat-completions URL
    api_url: String,
    /// Bearer credential
    api_key: Option<String>,
    /// HTTP client
    http_client: reqwest::Client,
}

impl GroqBackend {
    /// Create a new backend
    ///
    /// No request timeout is set; a call waits as long as the connection
    /// stays open.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built (e.g. no TLS backend).
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> reqwest::Result<Self> {
        Ok(Self {
            api_url: api_url.into(),
            api_key,
            http_client: reqwest::Client::builder()
                .user_agent(concat!("botsrig/", env!("CARGO_PKG_VERSION")))
                .build()?,
        })
    }

    /// The endpoint URL
    #[must_use]
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Whether a credential was supplied
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for GroqBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqBackend")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// Pull `choices[0].message.content` out of a response body
pub(crate) fn extract_reply(data: &serde_json::Value) -> Result<String, CompletionError> {
    data.pointer("/choices/0/message/content")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            CompletionError::MalformedResponse("missing choices[0].message.content".to_string())
        })
}

#[async_trait]
impl CompletionBackend for GroqBackend {
    fn name(&self) -> &'static str {
        "Groq"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        let mut builder = self.http_client.post(&self.api_url).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(
            model = %request.model,
            messages = request.messages.len(),
            temperature = request.temperature,
            "Sending completion request"
        );

        let response = builder.send().await?;

        // Check for HTTP errors
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let data: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        extract_reply(&data)
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;
    use crate::messages::Message;

    /// Serve one canned HTTP response and hand back the raw request
    async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/openai/v1/chat/completions", listener.local_addr().unwrap());
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&chunk[..n]);
                if request_complete(&raw) {
                    break;
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });

        (url, handle)
    }

    fn request_complete(raw: &[u8]) -> bool {
        let text = String::from_utf8_lossy(raw);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        raw.len() >= header_end + 4 + content_length
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new("llama3-70b-8192", vec![Message::user("how do I reverse a list?")])
            .with_temperature(0.5)
            .with_max_tokens(1024)
    }

    #[test]
    fn test_extract_reply() {
        let data = serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "Use list[::-1]"}}]
        });
        assert_eq!(extract_reply(&data).unwrap(), "Use list[::-1]");

        let data = serde_json::json!({"choices": []});
        assert!(matches!(
            extract_reply(&data),
            Err(CompletionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_debug_redacts_key() {
        let backend = GroqBackend::new(GROQ_API_URL, Some("gsk_secret".to_string())).unwrap();
        let debug = format!("{backend:?}");
        assert!(!debug.contains("gsk_secret"));
        assert!(debug.contains("<redacted>"));
        assert!(backend.has_api_key());
    }

    #[tokio::test]
    async fn test_complete_success() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"Use list[::-1]"}}]}"#,
        )
        .await;
        let backend = GroqBackend::new(url, Some("gsk_test".to_string())).unwrap();

        let reply = backend.complete(&request()).await.unwrap();
        assert_eq!(reply, "Use list[::-1]");

        let raw = server.await.unwrap();
        assert!(raw.starts_with("POST /openai/v1/chat/completions"));
        assert!(raw.to_lowercase().contains("authorization: bearer gsk_test"));
        assert!(raw.contains(r#""stream":false"#));
        assert!(raw.contains(r#""max_tokens":1024"#));
    }

    #[tokio::test]
    async fn test_missing_key_sends_no_authorization() {
        let (url, server) = serve_once("401 Unauthorized", r#"{"error":"invalid api key"}"#).await;
        let backend = GroqBackend::new(url, None).unwrap();

        let err = backend.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Status { status: 401, .. }));
        assert!(err.to_string().contains("invalid api key"));

        let raw = server.await.unwrap();
        assert!(!raw.to_lowercase().contains("authorization:"));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let (url, _server) = serve_once("200 OK", r#"{"unexpected":true}"#).await;
        let backend = GroqBackend::new(url, None).unwrap();

        let err = backend.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_non_json_body() {
        let (url, _server) = serve_once("200 OK", "<html>gateway</html>").await;
        let backend = GroqBackend::new(url, None).unwrap();

        let err = backend.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = GroqBackend::new(format!("http://{addr}/v1/chat/completions"), None).unwrap();
        let err = backend.complete(&request()).await.unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
