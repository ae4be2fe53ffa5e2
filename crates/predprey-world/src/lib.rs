//! Predator-prey world simulation.
//!
//! A [`HabitatGrid`] describes where animals can live, each species gets a
//! [`PopulationField`] seeded over it, and a [`Simulation`] advances both
//! densities with a coupled reaction-diffusion update.

pub mod buffer;
pub mod habitat;
pub mod population;
pub mod simulation;

pub use buffer::DoubleBuffer;
pub use habitat::HabitatGrid;
pub use population::PopulationField;
pub use simulation::{PopulationStats, Simulation};
