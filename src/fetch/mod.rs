//! Stream fetching subsystem.
//!
//! # Data Flow
//! ```text
//! probe URL + CompressionType
//!     → http.rs (GET over hyper-util, status check, body collection)
//!     → codec.rs (optional gzip decoding)
//!     → FetchedStream (readable bytes) or FetchError
//! ```
//!
//! # Design Decisions
//! - The selector only cares whether `open` succeeds; the payload is opaque
//! - A malformed compressed body is a fetch failure, not a later read failure
//! - `StreamFetcher` is a trait so probes can run without real network I/O

pub mod codec;
pub mod http;

use std::io::{Cursor, Read};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

pub use codec::CompressionType;
pub use http::HttpStreamFetcher;

/// Errors produced while opening a stream.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be turned into a request URI.
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: hyper::http::uri::InvalidUri,
    },

    /// The request could not be built.
    #[error("failed to build request: {0}")]
    Http(#[from] hyper::http::Error),

    /// Connection or transport failure.
    #[error("request failed: {0}")]
    Request(#[from] hyper_util::client::legacy::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {0}")]
    Status(hyper::StatusCode),

    /// The response body could not be read.
    #[error("failed to read body: {0}")]
    Body(#[from] hyper::Error),

    /// The body did not match the requested compression.
    #[error("failed to decode body: {0}")]
    Decode(#[from] std::io::Error),
}

/// Result type for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

/// A fully opened, readable response body.
#[derive(Debug)]
pub struct FetchedStream {
    inner: Cursor<Bytes>,
}

impl FetchedStream {
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            inner: Cursor::new(body.into()),
        }
    }

    /// Number of decoded bytes in the stream.
    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Read for FetchedStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Opens readable streams for URLs.
#[async_trait]
pub trait StreamFetcher: Send + Sync {
    async fn open(&self, url: &str, compression: CompressionType) -> FetchResult<FetchedStream>;
}
