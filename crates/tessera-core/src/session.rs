//! Execution context passed to value conversions.

mod platform;
pub use platform::Platform;

/// The session a key operation runs in.
///
/// Only the conversion platform is consulted by key handling; transaction
/// and connection state live elsewhere.
#[derive(Debug, Default, Clone)]
pub struct Session {
    platform: Platform,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    pub fn with_platform(platform: Platform) -> Session {
        Session { platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }
}
