//! Compression hints and body decoding.

use std::io::Read;

use bytes::Bytes;
use flate2::read::GzDecoder;
use serde::{Deserialize, Serialize};

/// Compression applied to a fetched body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionType {
    #[default]
    None,
    Gzip,
}

impl CompressionType {
    /// Value for the `Accept-Encoding` request header, if any.
    pub fn accept_encoding(self) -> Option<&'static str> {
        match self {
            CompressionType::None => None,
            CompressionType::Gzip => Some("gzip"),
        }
    }

    /// Decode a raw body according to this hint.
    pub fn decode(self, raw: Bytes) -> std::io::Result<Bytes> {
        match self {
            CompressionType::None => Ok(raw),
            CompressionType::Gzip => {
                let mut decoder = GzDecoder::new(&raw[..]);
                let mut decoded = Vec::new();
                decoder.read_to_end(&mut decoded)?;
                Ok(Bytes::from(decoded))
            }
        }
    }
}
