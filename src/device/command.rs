use super::Slot;
use crate::constants::{API_BASE, DEFAULT_WRITE_PATH};

use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestType {
    Get,
    Put,
}

/// Operation a control surface can trigger on a [`Device`](super::Device)
///
/// `path` is appended to the streaming config base path and may be empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read the streaming flag
    Read { path: String },
    /// Set the streaming flag
    Write { path: String, enabled: bool },
}

impl Operation {
    pub fn read<S: Into<String>>(path: S) -> Self {
        Self::Read { path: path.into() }
    }

    pub fn write<S: Into<String>>(path: S, enabled: bool) -> Self {
        Self::Write {
            path: path.into(),
            enabled,
        }
    }

    /// Read with the panel's default options
    pub fn default_read() -> Self {
        Self::read("")
    }

    /// Write with the panel's default options
    pub fn default_write() -> Self {
        Self::write(DEFAULT_WRITE_PATH, true)
    }

    /// Get the endpoint of the operation, relative to the device's host
    pub fn endpoint(&self) -> String {
        match self {
            Self::Read { path } => format!("{}{}", API_BASE, path),
            Self::Write { path, enabled } => {
                format!("{}{}/?enabled={}", API_BASE, path, enabled)
            }
        }
    }

    /// Full url of the operation on `host`
    pub fn url(&self, host: &str) -> String {
        format!("http://{}{}", host, self.endpoint())
    }

    pub fn request_type(&self) -> RequestType {
        match self {
            Self::Read { .. } => RequestType::Get,
            Self::Write { .. } => RequestType::Put,
        }
    }

    /// JSON body sent with the request, if any
    pub fn body(&self) -> Option<Value> {
        match self {
            Self::Read { .. } => None,
            Self::Write { enabled, .. } => Some(json!({ "enabled": enabled })),
        }
    }

    /// Variable the response is recorded into
    pub fn slot(&self) -> Slot {
        match self {
            Self::Read { .. } => Slot::GetResponse,
            Self::Write { .. } => Slot::PutResponse,
        }
    }
}
