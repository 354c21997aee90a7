//! Service-level configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Settings shared by the session and document services.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Deadline applied to each public service operation, in seconds.
    #[serde(default = "default_timeout")]
    pub default_timeout_seconds: u64,
}

impl ServiceConfig {
    /// The per-operation deadline as a [`Duration`].
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_seconds)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            default_timeout_seconds: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
