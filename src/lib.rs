//! petro-calc: Wellbore Trajectory & Inflow Performance
//!
//! Deterministic petroleum-engineering calculations.
//!
//! ## Architecture
//!
//! - **Trajectory**: Minimum Curvature integration of directional surveys
//!   into easting / northing / TVD
//! - **IPR**: C-n, linear productivity-index and Vogel inflow models
//! - **Config**: TOML-backed numeric options shared by both
//!
//! The trajectory integrator does not depend on the IPR models.

pub mod config;
pub mod ipr;
pub mod trajectory;

// Re-export configuration
pub use config::CalcConfig;

// Re-export trajectory types
pub use trajectory::{
    integrate, integrate_with, Position, SeedState, SurveyError, SurveyStation, Trajectory,
};

// Re-export IPR models
pub use ipr::{BackPressure, InflowModel, IprError, IprPoint, ProductivityIndex, Vogel};
