//! Cost calculation for the car-versus-public-transport comparison.
//!
//! The engine is pure arithmetic over an already parsed [`CostInput`]; input
//! validation lives in [`crate::validation`].
//!
//! [`CostInput`]: crate::CostInput

pub mod common;
pub mod cost_engine;

pub use cost_engine::{CostEngine, CostEngineError};
