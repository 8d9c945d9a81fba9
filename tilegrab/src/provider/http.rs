//! HTTP client abstraction for testability

use std::time::Duration;

use thiserror::Error;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User-Agent sent with every tile request.
pub const DEFAULT_USER_AGENT: &str = "tms-downloader";

/// Errors fetching a tile over HTTP.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The HTTP client could not be built
    #[error("Failed to create HTTP client: {0}")]
    Client(String),

    /// The request could not be sent or timed out
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read
    #[error("Failed to read response: {0}")]
    Body(String),
}

impl FetchError {
    /// Whether another attempt could succeed.
    ///
    /// Transport failures, 429 and 5xx are transient; other statuses are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Client(_) => false,
            FetchError::Request(_) | FetchError::Body(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

/// Trait for HTTP client operations.
///
/// This abstraction allows for dependency injection and easier testing
/// by enabling mock HTTP clients in tests.
pub trait HttpClient: Send + Sync {
    /// Performs an HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response body as bytes or an error.
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

impl<C: HttpClient + ?Sized> HttpClient for &C {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        (**self).get(url)
    }
}

/// Real HTTP client implementation using reqwest.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a new ReqwestClient with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(Duration::from_secs(DEFAULT_TIMEOUT_SECS), DEFAULT_USER_AGENT)
    }

    /// Creates a new ReqwestClient with custom timeout and User-Agent.
    pub fn with_options(timeout: Duration, user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        // Check HTTP status
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock HTTP client for testing.
    ///
    /// Returns queued responses in order, then falls back to `default`.
    /// Every requested URL is recorded.
    pub struct MockHttpClient {
        pub default: Result<Vec<u8>, FetchError>,
        queued: Mutex<Vec<Result<Vec<u8>, FetchError>>>,
        requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new(default: Result<Vec<u8>, FetchError>) -> Self {
            Self {
                default,
                queued: Mutex::new(Vec::new()),
                requests: Mutex::new(Vec::new()),
            }
        }

        /// Queues responses returned before the default.
        pub fn with_responses(self, responses: Vec<Result<Vec<u8>, FetchError>>) -> Self {
            let mut reversed = responses;
            reversed.reverse();
            *self.queued.lock().unwrap() = reversed;
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
            self.requests.lock().unwrap().push(url.to_string());
            self.queued
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| self.default.clone())
        }
    }

    #[test]
    fn test_mock_client_success() {
        let mock = MockHttpClient::new(Ok(vec![1, 2, 3, 4]));

        let result = mock.get("http://example.com");
        assert_eq!(result.unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(mock.requests(), vec!["http://example.com".to_string()]);
    }

    #[test]
    fn test_mock_client_error() {
        let mock = MockHttpClient::new(Err(FetchError::Request("Test error".to_string())));

        let result = mock.get("http://example.com");
        assert!(result.is_err());
    }

    #[test]
    fn test_mock_client_queued_responses() {
        let mock = MockHttpClient::new(Ok(vec![9])).with_responses(vec![
            Err(FetchError::Status {
                url: "u".to_string(),
                status: 503,
            }),
            Ok(vec![1]),
        ]);

        assert!(mock.get("a").is_err());
        assert_eq!(mock.get("b").unwrap(), vec![1]);
        assert_eq!(mock.get("c").unwrap(), vec![9]);
    }

    #[test]
    fn test_client_through_reference() {
        fn fetch<C: HttpClient>(client: C) -> Result<Vec<u8>, FetchError> {
            client.get("http://example.com")
        }

        let mock = MockHttpClient::new(Ok(vec![7]));
        assert_eq!(fetch(&mock).unwrap(), vec![7]);
    }

    #[test]
    fn test_status_error_message() {
        let err = FetchError::Status {
            url: "http://h/1/2/3.png".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 from http://h/1/2/3.png");
    }

    #[test]
    fn test_retryable_classification() {
        let status = |status| FetchError::Status {
            url: String::new(),
            status,
        };
        assert!(status(503).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(FetchError::Request("timeout".to_string()).is_retryable());
        assert!(!FetchError::Client("tls".to_string()).is_retryable());
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::new().is_ok());
        assert!(ReqwestClient::with_options(Duration::from_secs(5), "custom-agent").is_ok());
    }
}
