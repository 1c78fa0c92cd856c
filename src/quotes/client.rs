//! HTTP quote source
//!
//! A client for the quote endpoint, returning the raw JSON payload.

use crate::quotes::QuoteSource;
use crate::quotes::error::QuoteSourceError;
use crate::quotes::model::QuotesResponse;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("quote-dashboard/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct HttpQuoteSource {
    client: Client,
    endpoint: String,
}

impl HttpQuoteSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(
            endpoint,
            crate::consts::http::request_timeout(),
            crate::consts::http::connect_timeout(),
        )
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Self {
        Self {
            client: ClientBuilder::new()
                .connect_timeout(connect_timeout)
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            endpoint: endpoint.into(),
        }
    }

    async fn handle_response_status(response: Response) -> Result<Response, QuoteSourceError> {
        if !response.status().is_success() {
            return Err(QuoteSourceError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl QuoteSource for HttpQuoteSource {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn fetch_quotes(&self) -> Result<QuotesResponse, QuoteSourceError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::quotes::error::ErrorKind;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    pub(crate) const SERVER_ERROR_RESPONSE: &str = "HTTP/1.1 500 Internal Server Error\r\n\
        Content-Length: 5\r\nConnection: close\r\n\r\nboom!";

    pub(crate) const TRUNCATED_JSON_RESPONSE: &str = "HTTP/1.1 200 OK\r\n\
        Content-Type: application/json\r\nContent-Length: 1\r\nConnection: close\r\n\r\n{";

    /// Serve one canned HTTP response on a local port and return the endpoint URL.
    pub(crate) async fn serve_once(response: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            // Read the request head before answering
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match socket.read(&mut buf).await {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{}/api/stocks", addr)
    }

    #[tokio::test]
    // Nothing listens on the discard port, so the request fails before any response.
    async fn test_unreachable_endpoint_is_transport_error() {
        let source = HttpQuoteSource::with_timeout(
            "http://127.0.0.1:9/api/stocks",
            Duration::from_secs(2),
            Duration::from_secs(2),
        );
        let err = source.fetch_quotes().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_server_error_status_is_protocol_error() {
        let source = HttpQuoteSource::new(serve_once(SERVER_ERROR_RESPONSE).await);
        let err = source.fetch_quotes().await.unwrap_err();
        assert!(matches!(
            &err,
            QuoteSourceError::Http { status: 500, message } if message == "boom!"
        ));
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[tokio::test]
    async fn test_malformed_body_is_protocol_error() {
        let source = HttpQuoteSource::new(serve_once(TRUNCATED_JSON_RESPONSE).await);
        let err = source.fetch_quotes().await.unwrap_err();
        assert!(matches!(err, QuoteSourceError::Decode(_)));
        assert_eq!(err.kind(), ErrorKind::Protocol);
    }

    #[tokio::test]
    async fn test_success_body_decodes() {
        const OK: &str = "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\n\
            Content-Length: 32\r\nConnection: close\r\n\r\n\
            {\"status\":\"success\",\"stocks\":[]}";
        let source = HttpQuoteSource::new(serve_once(OK).await);
        let response = source.fetch_quotes().await.unwrap();
        assert_eq!(response.stocks, Some(vec![]));
    }
}
