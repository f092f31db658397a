pub const DEFAULT_TIMEOUT: u64 = 5;

pub const DEFAULT_USERNAME: &str = "root";
pub const DEFAULT_PASSWORD: &str = "root";

pub const API_BASE: &str = "/api/streaming/qstreamcfg/udp/";
pub const DEFAULT_WRITE_PATH: &str = "enabled";
