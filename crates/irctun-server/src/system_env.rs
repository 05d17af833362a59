//! Production [`Environment`] backed by OS entropy and the system clock.

use std::time::{SystemTime, UNIX_EPOCH};

use irctun_app::Environment;

/// Production environment using the system clock and the OS RNG.
///
/// Randomness only seeds nicknames, so an RNG failure degrades to
/// clock-derived bytes instead of aborting the session.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn random_bytes(&self, buffer: &mut [u8]) {
        if let Err(e) = getrandom::fill(buffer) {
            tracing::warn!("OS RNG unavailable, falling back to clock: {e}");
            let nanos = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |d| d.as_nanos())
                .to_le_bytes();
            for (i, byte) in buffer.iter_mut().enumerate() {
                *byte = nanos[i % nanos.len()];
            }
        }
    }

    fn wall_clock_secs(&self) -> u64 {
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
    }
}
