//! Environment abstraction for deterministic testing.
//!
//! Decouples the session state machine from system resources (wall clock,
//! randomness). Production wires in OS entropy and the system clock; tests use
//! a seeded RNG and a fixed clock so nicknames and timestamps are
//! reproducible.

/// Source of randomness and wall-clock time for an [`crate::App`].
pub trait Environment: Clone + Send + Sync + 'static {
    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Seconds since the Unix epoch, used only for display timestamps.
    fn wall_clock_secs(&self) -> u64;

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }
}
