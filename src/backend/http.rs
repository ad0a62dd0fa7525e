use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, Response, Url,
    multipart::{Form, Part},
};
use serde_json::json;

use crate::{
    backend::MatchBackend,
    error::MatchError,
    input::FileSelection,
    models::{HealthResponse, MatchResponse, ResultSet},
};

const FILE_FIELD: &str = "file";
pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(strum_macros::Display, Clone, Copy, Debug, PartialEq)]
enum Endpoint {
    #[strum(serialize = "api/upload")]
    Upload,
    #[strum(serialize = "api/url")]
    Url,
    #[strum(serialize = "api/health")]
    Health,
}

/// Talks to the matching service over HTTP. Only the health probe is bounded in
/// time; submissions wait as long as the backend takes.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    health_timeout: Duration,
}

impl HttpBackend {
    pub fn new(base_url: &Url) -> Self {
        let mut base_url = base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Self {
            client: Client::new(),
            base_url,
            health_timeout: DEFAULT_HEALTH_TIMEOUT,
        }
    }

    pub fn with_health_timeout(mut self, timeout: Duration) -> Self {
        self.health_timeout = timeout;
        self
    }

    fn endpoint(&self, endpoint: Endpoint) -> Url {
        // Joining a fixed relative path onto a base ending in '/' cannot fail.
        self.base_url
            .join(&endpoint.to_string())
            .unwrap_or_else(|_| self.base_url.clone())
    }

    async fn read_matches(response: Response, failure: &str) -> Result<ResultSet, MatchError> {
        let status = response.status();
        if !status.is_success() {
            log::error!("Backend answered with {}", status);
            return Err(MatchError::Transport {
                status: status.as_u16(),
            });
        }

        let data: MatchResponse = response.json().await?;
        if !data.success {
            log::warn!("Backend could not match the image");
            return Err(MatchError::Processing {
                message: failure.to_string(),
            });
        }

        log::info!("Backend returned {} products", data.products.len());
        Ok(ResultSet::from(data))
    }
}

#[async_trait]
impl MatchBackend for HttpBackend {
    fn name(&self) -> &str {
        self.base_url.as_str()
    }

    async fn submit_file(&self, file: &FileSelection) -> Result<ResultSet, MatchError> {
        let url = self.endpoint(Endpoint::Upload);
        log::info!("Uploading {} to {}", file.path.display(), url);

        let part = Part::file(&file.path).await?;
        let response = self
            .client
            .post(url)
            .multipart(Form::new().part(FILE_FIELD, part))
            .send()
            .await
            .map_err(|err| {
                log::error!("Failed to upload {}: {}", file.name, err);
                MatchError::from(err)
            })?;

        Self::read_matches(response, &t!("error.process_image")).await
    }

    async fn submit_url(&self, image_url: &Url) -> Result<ResultSet, MatchError> {
        let url = self.endpoint(Endpoint::Url);
        log::info!("Submitting {} to {}", image_url, url);

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(url)
            .json(&json!({ "url": image_url.as_str() }))
            .send()
            .await
            .map_err(|err| {
                log::error!("Failed to submit {}: {}", image_url, err);
                MatchError::from(err)
            })?;

        Self::read_matches(response, &t!("error.process_url")).await
    }

    async fn health(&self) -> Result<HealthResponse, MatchError> {
        let url = self.endpoint(Endpoint::Health);
        log::debug!("Probing {} (timeout {:?})", url, self.health_timeout);

        let request = self.client.get(url).timeout(self.health_timeout);
        Ok(request.send().await?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;

    /// Answers exactly one request and hands back what it received.
    async fn start_single_response_server(
        status: &str,
        body: &'static str,
    ) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/json\r\nConnection: close\r\n\r\n{body}",
            body.len()
        )
        .into_bytes();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let _ = socket.write_all(&response).await;
            let _ = socket.shutdown().await;
            request
        });

        (Url::parse(&format!("http://{addr}")).unwrap(), handle)
    }

    /// Reads headers plus the body, sized by `Content-Length` or chunked framing.
    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
            if request_complete(&String::from_utf8_lossy(&received)) {
                break;
            }
        }
        String::from_utf8_lossy(&received).into_owned()
    }

    fn request_complete(text: &str) -> bool {
        let Some(end) = text.find("\r\n\r\n") else {
            return false;
        };
        let headers = text[..end].to_lowercase();
        if headers.contains("transfer-encoding: chunked") {
            return text.ends_with("0\r\n\r\n");
        }

        let length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        text.len() >= end + 4 + length
    }

    const SHOE: &str = r#"{"success": true, "uploaded_image": "aGVsbG8=", "products": [{"name": "Shoe", "category": "Footwear", "similarity": 0.92, "image_url": "http://x/shoe.jpg"}]}"#;

    #[tokio::test]
    async fn test_submit_url_posts_json() {
        let (base, server) = start_single_response_server("200 OK", SHOE).await;
        let backend = HttpBackend::new(&base);

        let image = Url::parse("https://example.com/a.jpg").unwrap();
        let results = backend.submit_url(&image).await.unwrap();
        assert_eq!(results.products.len(), 1);
        assert_eq!(results.products[0].name, "Shoe");
        assert_eq!(results.preview.bytes, b"hello".to_vec());

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/url HTTP/1.1"));
        assert!(request.to_lowercase().contains("content-type: application/json"));
        assert!(request.contains(r#"{"url":"https://example.com/a.jpg"}"#));
    }

    #[tokio::test]
    async fn test_submit_file_posts_multipart() {
        let (base, server) = start_single_response_server("200 OK", SHOE).await;
        let backend = HttpBackend::new(&base);

        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(b"not really a jpeg").unwrap();
        let selection = FileSelection::new(file.path());

        let results = backend.submit_file(&selection).await.unwrap();
        assert_eq!(results.products[0].category, "Footwear");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /api/upload HTTP/1.1"));
        assert!(request.to_lowercase().contains("multipart/form-data"));
        assert!(request.contains(r#"name="file""#));
        assert!(request.contains("not really a jpeg"));
    }

    #[tokio::test]
    async fn test_server_error_carries_status() {
        let (base, _server) =
            start_single_response_server("500 Internal Server Error", r#"{"detail":"boom"}"#)
                .await;
        let backend = HttpBackend::new(&base);

        let image = Url::parse("https://example.com/a.jpg").unwrap();
        let err = backend.submit_url(&image).await.unwrap_err();
        assert!(matches!(err, MatchError::Transport { status: 500 }));
        assert_eq!(err.user_message(), "Error: Server error: 500");
    }

    #[tokio::test]
    async fn test_unsuccessful_body_is_processing_error() {
        let (base, _server) = start_single_response_server("200 OK", r#"{"success": false}"#).await;
        let backend = HttpBackend::new(&base);

        let image = Url::parse("https://example.com/a.jpg").unwrap();
        let err = backend.submit_url(&image).await.unwrap_err();
        assert!(matches!(err, MatchError::Processing { .. }));
        assert_eq!(err.user_message(), "Failed to process image URL");
    }

    #[tokio::test]
    async fn test_health() {
        let (base, server) = start_single_response_server(
            "200 OK",
            r#"{"status": "healthy", "message": "Server is running"}"#,
        )
        .await;
        let backend = HttpBackend::new(&base);

        let health = backend.health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.message, "Server is running");
        assert!(server.await.unwrap().starts_with("GET /api/health HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let backend = HttpBackend::new(&Url::parse(&format!("http://{addr}")).unwrap());
        let err = backend.health().await.unwrap_err();
        assert!(matches!(err, MatchError::Network(_)));
    }

    #[tokio::test]
    async fn test_health_gives_up_on_silent_backend() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let backend = HttpBackend::new(&Url::parse(&format!("http://{addr}")).unwrap())
            .with_health_timeout(Duration::from_millis(200));
        let result = tokio::time::timeout(Duration::from_secs(3), backend.health()).await;

        let err = result.expect("health check should not hang").unwrap_err();
        assert!(matches!(err, MatchError::Network(ref e) if e.is_timeout()));
        server.abort();
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let backend = HttpBackend::new(&Url::parse("http://host:7860/matcher").unwrap());
        assert_eq!(
            backend.endpoint(Endpoint::Upload).as_str(),
            "http://host:7860/matcher/api/upload"
        );

        let backend = HttpBackend::new(&Url::parse("http://host:7860").unwrap());
        assert_eq!(
            backend.endpoint(Endpoint::Health).as_str(),
            "http://host:7860/api/health"
        );
    }
}
