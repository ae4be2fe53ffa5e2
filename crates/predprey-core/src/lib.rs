//! Core types and utilities for the predator-prey reaction-diffusion simulation.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::{Error, Result};
pub use types::*;
