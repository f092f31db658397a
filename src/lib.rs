//! Read and toggle a device's UDP streaming config from a control panel
//!
//! A [`Device`] reads the flag with a GET, sets it with a PUT, and keeps the last response
//! of each kind plus a [`Feedback`] state for the panel to render.

mod config;
mod constants;
mod device;
mod error;
mod transport;

pub use config::Config;
pub use constants::{DEFAULT_PASSWORD, DEFAULT_TIMEOUT, DEFAULT_USERNAME};
pub use device::{
    derive_feedback_color, read_succeeded, write_succeeded, Body, Color, Device, Feedback,
    Operation, Outcome, RequestType, Slot,
};
pub use error::{ConfigError, Error, Result};
pub use transport::{HttpTransport, Request, Response, Transport};
