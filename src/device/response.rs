use super::Slot;
use crate::error::{Error, Result};

use serde::Deserialize;
use serde_json::Value;

use std::fmt::{self, Display};

/// Raw body of a device response, as stored in a variable slot
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Json(Value),
}

impl Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => write!(f, "{}", text),
            Self::Json(value) => write!(f, "{}", value),
        }
    }
}

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    /// Variable the body was recorded into
    pub slot: Slot,
    pub body: Body,
    /// Status fed to the feedback indicator
    pub enabled: bool,
}

#[derive(Deserialize)]
struct WriteResponse {
    alert: Option<String>,
}

/// A read body reports the flag as set when it mentions `true` in any case
pub fn read_succeeded(body: &str) -> bool {
    body.to_lowercase().contains("true")
}

/// A write was accepted only when the device answers `{"alert": "success"}`
pub fn write_succeeded(body: &Value) -> bool {
    serde_json::from_value::<WriteResponse>(body.clone())
        .ok()
        .and_then(|res| res.alert)
        .map_or(false, |alert| alert == "success")
}

pub(super) fn process_read(body: String) -> Outcome {
    let enabled = read_succeeded(&body);
    Outcome {
        slot: Slot::GetResponse,
        body: Body::Text(body),
        enabled,
    }
}

pub(super) fn process_write(body: String) -> Result<Outcome> {
    let value: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => return Err(Error::unexpected_response(body)),
    };

    if !write_succeeded(&value) {
        return Err(Error::unexpected_response(value.to_string()));
    }

    Ok(Outcome {
        slot: Slot::PutResponse,
        body: Body::Json(value),
        enabled: true,
    })
}
