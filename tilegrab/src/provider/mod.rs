//! Tile source abstraction
//!
//! The downloader talks to tile servers through the [`HttpClient`] trait so
//! the client is constructed once by the caller and injected, and tests can
//! substitute a mock.
//!
//! ```ignore
//! use tilegrab::provider::{HttpClient, ReqwestClient};
//!
//! let client = ReqwestClient::new()?;
//! let bytes = client.get("https://tile.openstreetmap.org/0/0/0.png")?;
//! ```

mod http;

pub use http::{FetchError, HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};

#[cfg(test)]
pub use http::tests::MockHttpClient;
