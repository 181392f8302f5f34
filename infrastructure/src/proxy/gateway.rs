//! HTTP adapter for the completion proxy

use super::wire::{build_request_body, parse_completion_body};
use async_trait::async_trait;
use cod_application::{CompletionRequest, GatewayError, LlmGateway};
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Connection settings for [`ProxyLlmGateway`]
#[derive(Debug, Clone)]
pub struct ProxySettings {
    pub endpoint: String,
    /// Timeout for a single HTTP attempt
    pub timeout: Duration,
    /// Extra attempts after a 429 or 5xx answer
    pub max_retries: u32,
    /// Delay before the first retry; doubles every attempt
    pub retry_backoff: Duration,
    /// Bearer token sent as `Authorization`, if any
    pub api_key: Option<String>,
    pub max_temperature: f64,
}

/// [`LlmGateway`] that POSTs completions to a JSON proxy endpoint.
pub struct ProxyLlmGateway {
    client: Client,
    settings: ProxySettings,
}

impl ProxyLlmGateway {
    pub fn new(settings: ProxySettings) -> Result<Self, GatewayError> {
        if settings.endpoint.trim().is_empty() {
            return Err(GatewayError::Other("proxy endpoint is not set".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(key) = &settings.api_key {
            let value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| GatewayError::Other("invalid API key format".to_string()))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(settings.timeout)
            .build()
            .map_err(|e| GatewayError::Other(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, settings })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    async fn send_once(&self, body: &super::wire::ProxyRequest) -> Result<String, GatewayError> {
        let response = self
            .client
            .post(&self.settings.endpoint)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_completion_body(&text)
    }
}

#[async_trait]
impl LlmGateway for ProxyLlmGateway {
    async fn generate(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
        let body = build_request_body(request, self.settings.max_temperature);
        if body.temperature != request.params.temperature {
            debug!(
                "Temperature {:.2} clamped to {:.2}",
                request.params.temperature, body.temperature
            );
        }

        let mut attempt = 0u32;
        loop {
            match self.send_once(&body).await {
                Ok(text) => {
                    debug!("Proxy returned {} bytes", text.len());
                    return Ok(text);
                }
                Err(e) if e.is_retryable() && attempt < self.settings.max_retries => {
                    let delay = self.settings.retry_backoff * 2u32.saturating_pow(attempt);
                    attempt += 1;
                    warn!(
                        "Proxy request failed ({}), retry {}/{} in {:?}",
                        e, attempt, self.settings.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

fn map_transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else if e.is_connect() {
        GatewayError::Connection(e.to_string())
    } else if e.is_decode() || e.is_body() {
        GatewayError::MalformedResponse(e.to_string())
    } else {
        GatewayError::Other(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cod_domain::{GenerationParams, Model, Prompt};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Serve one canned HTTP response per accepted connection and forward
    /// each request body to the returned channel.
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);
                let reply = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(reply.as_bytes()).await.unwrap();
                socket.shutdown().await.unwrap();
            }
        });

        (format!("http://{}/complete", addr), rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut data = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            data.extend_from_slice(&buf[..n]);
            let text = String::from_utf8_lossy(&data);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if data.len() >= header_end + 4 + content_length {
                    return String::from_utf8_lossy(&data[header_end + 4..]).into_owned();
                }
            }
        }
        String::new()
    }

    fn settings(endpoint: String) -> ProxySettings {
        ProxySettings {
            endpoint,
            timeout: Duration::from_secs(5),
            max_retries: 2,
            retry_backoff: Duration::from_millis(1),
            api_key: None,
            max_temperature: 1.0,
        }
    }

    fn request() -> CompletionRequest {
        CompletionRequest::new(
            Model::default(),
            Prompt::from_user("2 + 2?"),
            GenerationParams::default().at_temperature(1.05),
        )
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        assert!(ProxyLlmGateway::new(settings(String::new())).is_err());
    }

    #[tokio::test]
    async fn test_generate_posts_clamped_body() {
        let (endpoint, mut requests) =
            serve(vec![(200, r#####"{"content":[{"type":"text","text":"#### 4"}]}"#####)]).await;
        let gateway = ProxyLlmGateway::new(settings(endpoint)).unwrap();

        let text = gateway.generate(&request()).await.unwrap();
        assert_eq!(text, "#### 4");

        let sent: serde_json::Value = serde_json::from_str(&requests.recv().await.unwrap()).unwrap();
        assert_eq!(sent["temperature"], 1.0);
        assert_eq!(sent["messages"][0]["content"], "2 + 2?");
    }

    #[tokio::test]
    async fn test_retries_on_server_error() {
        let (endpoint, mut requests) = serve(vec![
            (503, r#"{"error":"busy"}"#),
            (200, r#####"{"text":"#### 4"}"#####),
        ])
        .await;
        let gateway = ProxyLlmGateway::new(settings(endpoint)).unwrap();

        assert_eq!(gateway.generate(&request()).await.unwrap(), "#### 4");
        assert!(requests.recv().await.is_some());
        assert!(requests.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let (endpoint, _requests) = serve(vec![(400, r#"{"error":"bad request"}"#)]).await;
        let gateway = ProxyLlmGateway::new(settings(endpoint)).unwrap();

        let err = gateway.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_retries_exhausted() {
        let (endpoint, _requests) = serve(vec![
            (429, "slow down"),
            (429, "slow down"),
            (429, "slow down"),
        ])
        .await;
        let gateway = ProxyLlmGateway::new(settings(endpoint)).unwrap();

        let err = gateway.generate(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Status { status: 429, .. }));
    }
}
