//! Permit list configuration.

/// Configuration for a [`PermitList`](crate::PermitList).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListConfig {
    /// Re-check the structural invariants after every mutation.
    pub verify_invariants: bool,
    /// How many identifiers to draw before giving up on a collision streak.
    pub max_id_attempts: u32,
}

impl ListConfig {
    pub fn with_verify_invariants(mut self, verify: bool) -> Self {
        self.verify_invariants = verify;
        self
    }

    pub fn with_max_id_attempts(mut self, attempts: u32) -> Self {
        self.max_id_attempts = attempts.max(1);
        self
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            verify_invariants: cfg!(debug_assertions),
            max_id_attempts: 16,
        }
    }
}
