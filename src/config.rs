use super::constants::{DEFAULT_PASSWORD, DEFAULT_USERNAME};
use super::error::{ConfigError, Result};

use serde::{Deserialize, Serialize};

use std::fmt::{self, Debug};

/// Connection parameters for a device
///
/// A `Config` is replaced wholesale through [`Device::set_config()`](crate::Device::set_config),
/// never patched field by field. It deserializes straight from the JSON config a control
/// panel hands over, accepting `hostname` as an alias for `host` and falling back to
/// `root`/`root` for missing credentials.
///
/// # Example
///
/// ```
/// # use stream_toggle::Config;
/// let config: Config = serde_json::from_str(r#"{ "hostname": "192.168.0.20" }"#).unwrap();
/// assert_eq!(config.host, "192.168.0.20");
/// assert_eq!(config.username, "root");
/// ```
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Address of the device, optionally with a port. No scheme.
    #[serde(alias = "hostname", default)]
    pub host: String,
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
}

impl Config {
    pub fn new<S: Into<String>>(host: S, username: S, password: S) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// Check that a request could be built from this config
    pub fn validate(&self) -> Result<()> {
        let host = self.host();
        if host.is_empty() {
            return Err(ConfigError::MissingHost.into());
        }
        if host.contains("://") {
            return Err(ConfigError::HostHasScheme(host.to_string()).into());
        }
        if self.username.is_empty() {
            return Err(ConfigError::MissingUsername.into());
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingPassword.into());
        }
        Ok(())
    }

    pub(crate) fn host(&self) -> &str {
        self.host.trim().trim_end_matches('/')
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: default_username(),
            password: default_password(),
        }
    }
}

// Keep the password out of logs
impl Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}
