//! Reaction-diffusion engine advancing prey and predator densities.

use crate::buffer::DoubleBuffer;
use crate::habitat::HabitatGrid;
use crate::population::{average_density, max_density, PopulationField};
use predprey_core::{Error, Rates, ReactionCoefficients, Result, Species};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, trace};

/// Rates and density buffers for one species
#[derive(Debug, Clone)]
struct SpeciesState {
    rates: Rates,
    reaction: ReactionCoefficients,
    buffer: DoubleBuffer,
}

impl SpeciesState {
    fn from_field(field: PopulationField) -> Self {
        let (species, rates, _, population) = field.into_parts();
        Self {
            reaction: species.reaction(&rates),
            rates,
            buffer: DoubleBuffer::new(population),
        }
    }
}

/// Aggregate densities after the most recent step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PopulationStats {
    pub step: u64,
    pub time: f64,
    pub prey_max: f64,
    pub predator_max: f64,
    pub prey_average: f64,
    pub predator_average: f64,
}

/// Coupled prey/predator simulation on a shared habitat.
///
/// Each [`Simulation::step`] reads only the current buffers, writes the next
/// buffers for every habitable cell, then swaps both species at once.
/// Densities are floored at zero and have no upper bound.
#[derive(Debug, Clone)]
pub struct Simulation {
    habitat: Arc<HabitatGrid>,
    prey: SpeciesState,
    predator: SpeciesState,
    dt: f64,
    steps: u64,
}

impl Simulation {
    pub fn new(
        prey: PopulationField,
        predator: PopulationField,
        habitat: Arc<HabitatGrid>,
        dt: f64,
    ) -> Result<Self> {
        check_role(&prey, Species::Prey)?;
        check_role(&predator, Species::Predator)?;
        check_habitat(&prey, &habitat)?;
        check_habitat(&predator, &habitat)?;
        if !dt.is_finite() || dt <= 0.0 {
            return Err(Error::Configuration(format!(
                "time step must be a positive number, got {}",
                dt
            )));
        }

        debug!(
            dt,
            width = habitat.width(),
            height = habitat.height(),
            land_cells = habitat.land_cells(),
            "Created simulation"
        );

        Ok(Self {
            habitat,
            prey: SpeciesState::from_field(prey),
            predator: SpeciesState::from_field(predator),
            dt,
            steps: 0,
        })
    }

    /// Advance both species by one time step
    pub fn step(&mut self) {
        let habitat = Arc::clone(&self.habitat);
        self.compute_next(habitat.land_indices().iter().copied());
        self.prey.buffer.swap();
        self.predator.buffer.swap();
        self.steps += 1;
        trace!(step = self.steps, "Advanced simulation");
    }

    pub fn step_n(&mut self, n: u64) {
        for _ in 0..n {
            self.step();
        }
    }

    /// Fill the next buffers for `cells` from the current snapshot.
    ///
    /// Every index must be a habitable interior cell. Results do not depend
    /// on the order cells are visited in.
    fn compute_next(&mut self, cells: impl IntoIterator<Item = usize>) {
        let cols = self.habitat.cols();
        let neighbours = self.habitat.neighbour_counts();
        let dt = self.dt;

        let prey_rate = self.prey.rates.diffusion;
        let prey_reaction = self.prey.reaction;
        let predator_rate = self.predator.rates.diffusion;
        let predator_reaction = self.predator.reaction;

        let (prey, prey_next) = self.prey.buffer.split_mut();
        let (predator, predator_next) = self.predator.buffer.split_mut();

        for i in cells {
            let n = f64::from(neighbours[i]);
            let (u, v) = (prey[i], predator[i]);

            let du = prey_reaction.apply(u, v) + diffusion(prey, prey_rate, n, cols, i);
            let dv = predator_reaction.apply(v, u) + diffusion(predator, predator_rate, n, cols, i);

            prey_next[i] = (u + dt * du).max(0.0);
            predator_next[i] = (v + dt * dv).max(0.0);
        }
    }

    pub fn habitat(&self) -> &Arc<HabitatGrid> {
        &self.habitat
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of completed steps
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time elapsed
    pub fn time(&self) -> f64 {
        self.steps as f64 * self.dt
    }

    pub fn prey_rates(&self) -> &Rates {
        &self.prey.rates
    }

    pub fn predator_rates(&self) -> &Rates {
        &self.predator.rates
    }

    /// Current prey densities, row-major over the padded grid
    pub fn prey(&self) -> &[f64] {
        self.prey.buffer.current()
    }

    /// Current predator densities, row-major over the padded grid
    pub fn predator(&self) -> &[f64] {
        self.predator.buffer.current()
    }

    pub fn max_prey(&self) -> f64 {
        max_density(self.prey())
    }

    pub fn max_predator(&self) -> f64 {
        max_density(self.predator())
    }

    pub fn average_prey(&self, land_cells: usize) -> f64 {
        average_density(self.prey(), land_cells)
    }

    pub fn average_predator(&self, land_cells: usize) -> f64 {
        average_density(self.predator(), land_cells)
    }

    pub fn stats(&self) -> PopulationStats {
        let land = self.habitat.land_cells();
        PopulationStats {
            step: self.steps,
            time: self.time(),
            prey_max: self.max_prey(),
            predator_max: self.max_predator(),
            prey_average: self.average_prey(land),
            predator_average: self.average_predator(land),
        }
    }
}

/// Discrete Laplacian spread at flat index `i` of a padded grid with `cols`
/// columns, where `n` is the cell's habitable-neighbour count.
#[inline]
pub fn diffusion(field: &[f64], rate: f64, n: f64, cols: usize, i: usize) -> f64 {
    rate * (field[i - cols] + field[i + cols] + field[i - 1] + field[i + 1] - n * field[i])
}

fn check_role(field: &PopulationField, expected: Species) -> Result<()> {
    if field.species() != expected {
        return Err(Error::Role(format!(
            "expected a {} field, got a {} field",
            expected,
            field.species()
        )));
    }
    Ok(())
}

fn check_habitat(field: &PopulationField, habitat: &Arc<HabitatGrid>) -> Result<()> {
    if Arc::ptr_eq(field.habitat(), habitat) || **field.habitat() == **habitat {
        Ok(())
    } else {
        Err(Error::Role(format!(
            "{} field was built against a different habitat grid",
            field.species()
        )))
    }
}
