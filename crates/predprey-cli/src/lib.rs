//! Command-line driver for the predator-prey simulation: argument handling,
//! logging setup, the step loop, and PPM/CSV output.

pub mod cli;
pub mod report;
pub mod runner;
pub mod telemetry;
