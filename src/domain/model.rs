use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Position marker in an event stream. Partition and offset are opaque
/// identifiers handed out by the streaming service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub partition: String,
    pub offset: String,
}

impl Cursor {
    pub fn new(partition: impl Into<String>, offset: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            offset: offset.into(),
        }
    }
}

/// A downloaded object. The buffer is fully populated before the handle is
/// handed to the caller; the accessors only decode.
#[derive(Debug, Clone)]
pub struct RemoteObject {
    bucket: String,
    key: String,
    buffer: Vec<u8>,
}

impl RemoteObject {
    pub fn new(bucket: impl Into<String>, key: impl Into<String>, buffer: Vec<u8>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
            buffer,
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// The object body decoded as UTF-8 text.
    pub fn text(&self) -> Result<String> {
        Ok(String::from_utf8(self.buffer.clone())?)
    }

    /// The object body parsed as JSON. Parses on every call.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_slice(&self.buffer)?)
    }
}
