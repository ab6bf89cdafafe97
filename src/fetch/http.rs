//! HTTP stream fetcher.
//!
//! # Responsibilities
//! - Issue a GET against a probe URL
//! - Reject non-success statuses
//! - Collect and decode the body according to the compression hint

use async_trait::async_trait;
use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::header::{ACCEPT_ENCODING, USER_AGENT};
use hyper::{Request, Uri};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

use crate::fetch::{CompressionType, FetchError, FetchResult, FetchedStream, StreamFetcher};

const USER_AGENT_VALUE: &str = "ha-selector-probe";

/// Fetches streams over plain HTTP.
#[derive(Clone)]
pub struct HttpStreamFetcher {
    client: Client<HttpConnector, Empty<Bytes>>,
}

impl HttpStreamFetcher {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        Self { client }
    }
}

impl Default for HttpStreamFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpStreamFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStreamFetcher").finish_non_exhaustive()
    }
}

#[async_trait]
impl StreamFetcher for HttpStreamFetcher {
    async fn open(&self, url: &str, compression: CompressionType) -> FetchResult<FetchedStream> {
        let uri: Uri = url.parse().map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let mut builder = Request::builder()
            .method("GET")
            .uri(uri)
            .header(USER_AGENT, USER_AGENT_VALUE);
        if let Some(encoding) = compression.accept_encoding() {
            builder = builder.header(ACCEPT_ENCODING, encoding);
        }
        let request = builder.body(Empty::<Bytes>::new())?;

        let response = self.client.request(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let raw = response.into_body().collect().await?.to_bytes();
        let body = compression.decode(raw)?;

        tracing::trace!(url = %url, bytes = body.len(), "Stream opened");
        Ok(FetchedStream::new(body))
    }
}
