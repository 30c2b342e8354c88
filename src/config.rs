//! Tracer configuration.

use serde::Deserialize;

/// Host-supplied tracer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TracerConfig {
    /// Whether statements without an explicit override are logged in full.
    #[serde(default = "default_true")]
    pub default_print: bool,
}

fn default_true() -> bool {
    true
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self { default_print: true }
    }
}

impl TracerConfig {
    pub fn new(default_print: bool) -> Self {
        Self { default_print }
    }
}
