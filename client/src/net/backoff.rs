//! Reconnect delay policy for the frame client.

#[cfg(test)]
#[path = "backoff_test.rs"]
mod backoff_test;

/// Exponential reconnect backoff: start at `initial_ms`, double per failed
/// attempt, never exceed `max_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backoff {
    pub initial_ms: u32,
    pub max_ms: u32,
}

impl Default for Backoff {
    fn default() -> Self {
        Self { initial_ms: 1000, max_ms: 10_000 }
    }
}

impl Backoff {
    /// Delay to use after `current`.
    #[must_use]
    pub fn next(self, current_ms: u32) -> u32 {
        current_ms.saturating_mul(2).min(self.max_ms)
    }
}
