//! Calculator Configuration Module
//!
//! Numeric options for survey integration and IPR curve generation, loaded
//! from TOML.
//!
//! ## Loading Order
//!
//! 1. `PETRO_CALC_CONFIG` environment variable (path to TOML file)
//! 2. `petro_calc.toml` in the current working directory
//! 3. Built-in defaults (reference behaviour)
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::get()` anywhere:
//!
//! ```ignore
//! // In main():
//! config::init(CalcConfig::load());
//!
//! // Anywhere in the codebase:
//! let basis = config::get().survey.ratio_factor_basis;
//! ```

mod calc_config;
pub mod defaults;
pub mod validation;

pub use calc_config::*;

use std::sync::OnceLock;

/// Global configuration, set at most once.
static CALC_CONFIG: OnceLock<CalcConfig> = OnceLock::new();

/// Initialize the global configuration.
///
/// Only the first call takes effect; later calls are logged and ignored.
pub fn init(config: CalcConfig) {
    if CALC_CONFIG.set(config).is_err() {
        tracing::warn!("config::init() called more than once, ignoring");
    }
}

/// Get a reference to the global configuration.
///
/// Library callers that never call `init()` get the built-in defaults, which
/// are then fixed for the rest of the process.
pub fn get() -> &'static CalcConfig {
    CALC_CONFIG.get_or_init(CalcConfig::default)
}

