use std::time::Duration;

pub(crate) const DEFAULT_USER_AGENT: &str = concat!("loadprobe/", env!("CARGO_PKG_VERSION"));

pub(crate) const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub(crate) const DEFAULT_REDIRECT_LIMIT: u32 = 10;
