//! Server configuration from environment variables

use std::env;

/// Default number of decimals shown in text results
pub const DEFAULT_DISPLAY_DECIMALS: usize = 6;
/// Beyond this an f64 has no more significant digits to show
pub const MAX_DISPLAY_DECIMALS: usize = 15;

pub const DISPLAY_DECIMALS_VAR: &str = "CANIVETE_DISPLAY_DECIMALS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Rounding applied to the human-readable text of a conversion.
    /// The numeric `value` field always carries full precision.
    pub display_decimals: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { display_decimals: DEFAULT_DISPLAY_DECIMALS }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Invalid values fall back to
    /// the default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(DISPLAY_DECIMALS_VAR) {
            match raw.trim().parse::<usize>() {
                Ok(decimals) => config.display_decimals = decimals.min(MAX_DISPLAY_DECIMALS),
                Err(e) => tracing::warn!(
                    var = DISPLAY_DECIMALS_VAR,
                    value = %raw,
                    error = %e,
                    "ignoring invalid value, using {}",
                    DEFAULT_DISPLAY_DECIMALS
                ),
            }
        }

        config
    }
}
