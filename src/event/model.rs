//! Stream event value type.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors raised when projecting event columns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventError {
    #[error("column '{0}' is not defined for this stream")]
    UnknownColumn(String),

    #[error("column '{column}' maps to index {index} but the event has {len} fields")]
    MissingField {
        column: String,
        index: usize,
        len: usize,
    },
}

/// Column layout of a stream.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StreamSchema {
    pub stream_id: String,
    pub columns: Vec<String>,
}

impl StreamSchema {
    pub fn new<I, S>(stream_id: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            stream_id: stream_id.into(),
            columns: columns.into_iter().map(Into::into).collect(),
        }
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }
}

/// One record of a stream: identifier, epoch-millisecond timestamp, ordered fields.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct StreamEvent {
    pub stream_id: String,
    pub timestamp: i64,
    pub data: Vec<Value>,
}

impl StreamEvent {
    pub fn new(stream_id: impl Into<String>, timestamp: i64, data: Vec<Value>) -> Self {
        Self {
            stream_id: stream_id.into(),
            timestamp,
            data,
        }
    }

    pub fn builder() -> StreamEventBuilder {
        StreamEventBuilder::default()
    }

    /// Overwrite every field with those of `other`.
    pub fn copy_from(&mut self, other: &StreamEvent) {
        self.stream_id.clone_from(&other.stream_id);
        self.timestamp = other.timestamp;
        self.data.clone_from(&other.data);
    }

    /// Values of the named columns, in the order requested.
    pub fn values_for(&self, schema: &StreamSchema, columns: &[&str]) -> Result<Vec<Value>, EventError> {
        columns
            .iter()
            .map(|column| {
                let index = schema
                    .column_index(column)
                    .ok_or_else(|| EventError::UnknownColumn(column.to_string()))?;
                self.data.get(index).cloned().ok_or_else(|| EventError::MissingField {
                    column: column.to_string(),
                    index,
                    len: self.data.len(),
                })
            })
            .collect()
    }
}

impl fmt::Display for StreamEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = DateTime::<Utc>::from_timestamp_millis(self.timestamp)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S,%3f").to_string())
            .unwrap_or_else(|| self.timestamp.to_string());
        let data = self
            .data
            .iter()
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(",");

        write!(
            f,
            "StreamEvent[stream={},timestamp={},data=[{}]]",
            self.stream_id.to_uppercase(),
            timestamp,
            data
        )
    }
}

/// Incremental builder for `StreamEvent`.
#[derive(Debug, Clone, Default)]
pub struct StreamEventBuilder {
    event: StreamEvent,
}

impl StreamEventBuilder {
    pub fn stream_id(mut self, stream_id: impl Into<String>) -> Self {
        self.event.stream_id = stream_id.into();
        self
    }

    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.event.timestamp = timestamp;
        self
    }

    pub fn data(mut self, data: Vec<Value>) -> Self {
        self.event.data = data;
        self
    }

    /// Append one field value.
    pub fn field(mut self, value: impl Into<Value>) -> Self {
        self.event.data.push(value.into());
        self
    }

    pub fn build(self) -> StreamEvent {
        self.event
    }
}
