//! Tunables for a [`ConfigStore`](super::ConfigStore).

/// Default number of cascading JSON rounds permitted by
/// [`ConfigStore::evaluate`](super::ConfigStore::evaluate).
pub const DEFAULT_RESOLUTION_LIMIT: usize = 64;

/// Options controlling store behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    /// Maximum number of times the `configuration.json` key may be consumed
    /// during one evaluation.
    pub resolution_limit: usize,
}

impl StoreOptions {
    /// Replace the resolution limit.
    #[must_use]
    pub const fn with_resolution_limit(mut self, limit: usize) -> Self {
        self.resolution_limit = limit;
        self
    }
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            resolution_limit: DEFAULT_RESOLUTION_LIMIT,
        }
    }
}
