use std::fmt::{self, Display};

/// Result for operations on a [`Device`](super::Device)
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    /// Connection config cannot be used to build a request
    ConfigInvalid(ConfigError),
    /// Could not reach the device (refused, reset, DNS, ...)
    NetworkFailure(String),
    /// The device did not answer within the request timeout
    Timeout,
    /// The device answered with a non-2xx status
    HttpStatus { status: u16, body: String },
    /// The device answered 2xx but the body was not what a successful call returns
    UnexpectedResponseShape(String),
    /// A write is already in flight on this device
    WriteAlreadyInProgress,
}

impl Error {
    pub fn is_config(&self) -> bool {
        matches!(self, Error::ConfigInvalid(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::NetworkFailure(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout)
    }

    pub fn is_status(&self) -> bool {
        matches!(self, Error::HttpStatus { .. })
    }

    pub fn is_unexpected_response(&self) -> bool {
        matches!(self, Error::UnexpectedResponseShape(_))
    }

    pub fn is_write_in_progress(&self) -> bool {
        matches!(self, Error::WriteAlreadyInProgress)
    }

    pub(crate) fn unexpected_response<S: Into<String>>(body: S) -> Error {
        Error::UnexpectedResponseShape(body.into())
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::ConfigInvalid(e)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::Timeout
        } else {
            Error::NetworkFailure(e.to_string())
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Error {
        Error::UnexpectedResponseShape(e.to_string())
    }
}

impl From<tokio::time::error::Elapsed> for Error {
    fn from(_: tokio::time::error::Elapsed) -> Error {
        Error::Timeout
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigInvalid(e) => write!(f, "Invalid config: {}", e),
            Self::NetworkFailure(e) => write!(f, "Network failure: {}", e),
            Self::Timeout => write!(f, "Request timed out"),
            Self::HttpStatus { status, body } => write!(f, "HTTP {}: {}", status, body),
            Self::UnexpectedResponseShape(body) => write!(f, "Unexpected response: '{}'", body),
            Self::WriteAlreadyInProgress => write!(f, "A write request is already in progress"),
        }
    }
}

impl std::error::Error for Error {}

/// Problems with a [`Config`](super::Config)
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Host is empty
    MissingHost,
    /// Username is empty
    MissingUsername,
    /// Password is empty
    MissingPassword,
    /// Host carries a scheme; requests are always sent over plain http
    HostHasScheme(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHost => write!(f, "host is empty"),
            Self::MissingUsername => write!(f, "username is empty"),
            Self::MissingPassword => write!(f, "password is empty"),
            Self::HostHasScheme(host) => {
                write!(f, "host '{}' must not include a scheme", host)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
