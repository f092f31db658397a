use super::config::Config;
use super::constants::DEFAULT_TIMEOUT;
use super::error::{Error, Result};
use super::transport::{HttpTransport, Request, Transport};

mod command;
mod feedback;
mod response;
mod state;

pub use self::command::{Operation, RequestType};
pub use self::feedback::{derive_feedback_color, Color, Feedback};
pub use self::response::{read_succeeded, write_succeeded, Body, Outcome};
pub use self::state::Slot;

use self::state::State;

use tokio::time::timeout;

use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};
use std::time::Duration;

/// A device with a toggleable UDP streaming config
///
/// More specifically, a client for the device's `qstreamcfg` HTTP API which remembers the
/// last response of each kind for a control panel to display. Reads may overlap freely but
/// only one write is allowed in flight at a time; a write issued while another is pending
/// fails immediately with [`Error::WriteAlreadyInProgress`].
///
/// Cloning `Device` is cheap and every clone shares the same config and state.
///
/// # Example
///
/// ```
/// # use stream_toggle::{Config, Device};
/// #
/// # async fn toggle() -> Result<(), stream_toggle::Error> {
/// let dev = Device::new(Config::new("192.168.0.20", "root", "root"))?;
///
/// let current = dev.read_flag("enabled").await?;
/// dev.write_flag("enabled", !current.enabled).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Device {
    inner: Arc<DeviceRef>,
}

impl Device {
    /// Create a device client talking plain http, with the default 5 second timeout
    pub fn new(config: Config) -> Result<Self> {
        Self::with_timeout(config, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a device client talking plain http, with a custom request timeout
    pub fn with_timeout(config: Config, timeout: Duration) -> Result<Self> {
        let transport = HttpTransport::new(timeout)?;
        Ok(Self::build(config, Box::new(transport), timeout))
    }

    /// Create a device client that sends its requests through `transport`
    pub fn with_transport<T: Transport + 'static>(config: Config, transport: T) -> Self {
        Self::with_transport_and_timeout(config, transport, Duration::from_secs(DEFAULT_TIMEOUT))
    }

    /// Create a device client that sends its requests through `transport`, giving up on any
    /// request after `timeout`
    pub fn with_transport_and_timeout<T: Transport + 'static>(
        config: Config,
        transport: T,
        timeout: Duration,
    ) -> Self {
        Self::build(config, Box::new(transport), timeout)
    }

    fn build(config: Config, transport: Box<dyn Transport>, timeout: Duration) -> Self {
        log::debug!("Device initialized with config: {:?}", config);
        Self {
            inner: Arc::new(DeviceRef {
                config: RwLock::new(Arc::new(config)),
                state: Mutex::new(State::default()),
                writing: AtomicBool::new(false),
                timeout,
                transport,
            }),
        }
    }

    /// Get a snapshot of the current config
    pub fn config(&self) -> Arc<Config> {
        self.inner
            .config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the config
    ///
    /// Operations already running keep the config they started with.
    pub fn set_config(&self, config: Config) {
        log::info!("Configuration updated with new config: {:?}", config);
        *self
            .inner
            .config
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Arc::new(config);
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        self.inner.timeout
    }

    /// Check whether a write is in flight
    pub fn is_writing(&self) -> bool {
        self.inner.writing.load(Ordering::Acquire)
    }

    /// Read the streaming flag
    ///
    /// The body is recorded in [`Slot::GetResponse`]. Any 2xx response succeeds; the flag
    /// counts as enabled when the body contains `true` in any case.
    pub async fn read_flag<S: Into<String>>(&self, path: S) -> Result<Outcome> {
        self.execute(Operation::read(path)).await
    }

    /// Set the streaming flag
    ///
    /// The body is recorded in [`Slot::PutResponse`]. Succeeds only if the device answers
    /// `{"alert": "success"}`.
    pub async fn write_flag<S: Into<String>>(&self, path: S, enabled: bool) -> Result<Outcome> {
        self.execute(Operation::write(path, enabled)).await
    }

    /// Run an operation
    ///
    /// On success the response is recorded and the feedback updated. On failure the
    /// recorded state is left as it was.
    pub async fn execute(&self, operation: Operation) -> Result<Outcome> {
        let _guard = match operation.request_type() {
            RequestType::Get => None,
            RequestType::Put => match self.inner.claim_write() {
                Some(guard) => Some(guard),
                None => {
                    log::warn!("PUT request already in progress. Skipping duplicate request.");
                    return Err(Error::WriteAlreadyInProgress);
                }
            },
        };

        let result = self.send_operation(&operation).await;
        match &result {
            Ok(outcome) => self.inner.state().record_outcome(outcome),
            Err(e) => log::error!(
                "Error occurred during {:?} request to '{}': {}",
                operation.request_type(),
                operation.endpoint(),
                e
            ),
        }
        result
    }

    /// Get the last body recorded in `slot`
    pub fn variable(&self, slot: Slot) -> Option<Body> {
        self.inner.state().variable(slot)
    }

    /// Get every recorded variable
    pub fn variables(&self) -> HashMap<Slot, Body> {
        self.inner.state().variables()
    }

    /// Get the feedback derived from the last successful operation
    pub fn feedback(&self) -> Feedback {
        self.inner.state().feedback()
    }

    /// Get the color of the feedback indicator
    pub fn feedback_color(&self) -> Color {
        derive_feedback_color(self.feedback())
    }

    async fn send_operation(&self, operation: &Operation) -> Result<Outcome> {
        let config = self.config();
        config.validate()?;

        let request = Request {
            method: operation.request_type(),
            url: operation.url(config.host()),
            username: config.username.clone(),
            password: config.password.clone(),
            body: operation.body(),
        };
        log::trace!("Starting HTTP {:?} request", request.method);
        log::debug!("Constructed request URL: {}", request.url);

        let res = timeout(self.inner.timeout, self.inner.transport.send(request)).await??;
        log::debug!("Received response: {} '{}'", res.status, res.body);

        if !res.is_success() {
            return Err(Error::HttpStatus {
                status: res.status,
                body: res.body,
            });
        }

        match operation.request_type() {
            RequestType::Get => Ok(response::process_read(res.body)),
            RequestType::Put => response::process_write(res.body),
        }
    }
}

struct DeviceRef {
    config: RwLock<Arc<Config>>,
    state: Mutex<State>,
    writing: AtomicBool,
    timeout: Duration,
    transport: Box<dyn Transport>,
}

impl DeviceRef {
    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn claim_write(&self) -> Option<WriteGuard<'_>> {
        self.writing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| WriteGuard(&self.writing))
    }
}

impl Debug for DeviceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceRef")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("writing", &self.writing)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Clears the in-flight flag however the write ends, including when its future is dropped
struct WriteGuard<'a>(&'a AtomicBool);

impl Drop for WriteGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
