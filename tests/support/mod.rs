#![allow(dead_code)]

mod emulated_device;

pub use emulated_device::{Behaviour, EmulatedDevice};

use stream_toggle::{Config, Device};

use std::time::Duration;

/// Start an emulated device with `root`/`root` credentials
pub async fn emulate(behaviour: Behaviour, enabled: bool) -> EmulatedDevice {
    emulate_with_credentials("root".into(), "root".into(), behaviour, enabled).await
}

/// Start an emulated device with the given credentials
pub async fn emulate_with_credentials(
    username: String,
    password: String,
    behaviour: Behaviour,
    enabled: bool,
) -> EmulatedDevice {
    // Start Logger
    if let Err(e) = pretty_env_logger::try_init() {
        log::warn!(target: "test::emulate", "Logger init() returned '{}'", e);
    }

    let device = EmulatedDevice::build(username, password, behaviour, enabled);
    device.serve();
    device
}

/// Client for an emulated device, using the device's own credentials
pub fn connect_device(emulated: &EmulatedDevice) -> Device {
    Device::new(config_for(emulated)).unwrap()
}

/// Client for an emulated device with a custom request timeout
pub fn connect_device_with_timeout(emulated: &EmulatedDevice, timeout: Duration) -> Device {
    Device::with_timeout(config_for(emulated), timeout).unwrap()
}

pub fn config_for(emulated: &EmulatedDevice) -> Config {
    Config::new(
        emulated.addr().to_string(),
        emulated.username(),
        emulated.password(),
    )
}

/// Random data helpers
pub mod rand_data {
    use rand::{distributions::Alphanumeric, Rng};

    pub fn string(len: usize) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .map(char::from)
            .take(len)
            .collect()
    }
}
