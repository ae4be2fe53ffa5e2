//! Per-species population density over a habitat grid.

use crate::habitat::HabitatGrid;
use predprey_core::{Error, Rates, Result, Species};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use tracing::debug;

/// Upper (exclusive) bound of the initial per-cell density
pub const MAX_INITIAL_DENSITY: f64 = 5.0;

/// Density of one species on every cell of a habitat grid
#[derive(Debug, Clone)]
pub struct PopulationField {
    species: Species,
    rates: Rates,
    seed: u64,
    habitat: Arc<HabitatGrid>,
    population: Vec<f64>,
}

impl PopulationField {
    /// Validate `rates` and seed the initial density.
    ///
    /// A seed of 0 yields an empty field without touching the generator.
    /// Otherwise every habitable interior cell draws from
    /// `[0, MAX_INITIAL_DENSITY)` in row-major order, so a given seed and map
    /// always produce the same field.
    pub fn new(
        seed: u64,
        rates: Rates,
        habitat: Arc<HabitatGrid>,
        species: Species,
    ) -> Result<Self> {
        rates.validate()?;
        let population = initial_density(seed, &habitat);

        debug!(
            %species,
            seed,
            diffusion = rates.diffusion,
            birth = rates.birth,
            death = rates.death,
            "Initialized population field"
        );

        Ok(Self {
            species,
            rates,
            seed,
            habitat,
            population,
        })
    }

    /// Build a field from explicit densities laid out over the padded grid.
    ///
    /// Values must be finite and non-negative, and zero on every cell that is
    /// not habitable. The seed is reported as 0.
    pub fn with_density(
        density: Vec<f64>,
        rates: Rates,
        habitat: Arc<HabitatGrid>,
        species: Species,
    ) -> Result<Self> {
        rates.validate()?;
        if density.len() != habitat.padded_len() {
            return Err(Error::Configuration(format!(
                "density has {} cells, habitat grid has {}",
                density.len(),
                habitat.padded_len()
            )));
        }
        for (i, &value) in density.iter().enumerate() {
            let (row, col) = habitat.coords(i);
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Configuration(format!(
                    "density at ({}, {}) must be a non-negative number, got {}",
                    row, col, value
                )));
            }
            if value != 0.0 && !habitat.habitability()[i] {
                return Err(Error::Configuration(format!(
                    "density at ({}, {}) must be 0 on uninhabitable cells",
                    row, col
                )));
            }
        }

        Ok(Self {
            species,
            rates,
            seed: 0,
            habitat,
            population: density,
        })
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn rates(&self) -> &Rates {
        &self.rates
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn habitat(&self) -> &Arc<HabitatGrid> {
        &self.habitat
    }

    /// Flat row-major densities over the padded grid
    pub fn population(&self) -> &[f64] {
        &self.population
    }

    /// Largest density on the grid
    pub fn max(&self) -> f64 {
        max_density(&self.population)
    }

    /// Total density divided by `land_cells`, or 0 when there is no land
    pub fn average(&self, land_cells: usize) -> f64 {
        average_density(&self.population, land_cells)
    }

    /// `Ok(true)` if `(row, col)` lies inside the padded grid
    pub fn validate_coordinates(&self, row: usize, col: usize) -> Result<bool> {
        if self.habitat.contains(row, col) {
            Ok(true)
        } else {
            Err(self.habitat.out_of_bounds(row, col))
        }
    }

    pub fn value_at(&self, row: usize, col: usize) -> Result<f64> {
        self.validate_coordinates(row, col)?;
        Ok(self.population[self.habitat.index(row, col)])
    }

    pub(crate) fn into_parts(self) -> (Species, Rates, Arc<HabitatGrid>, Vec<f64>) {
        (self.species, self.rates, self.habitat, self.population)
    }
}

fn initial_density(seed: u64, habitat: &HabitatGrid) -> Vec<f64> {
    let mut population = vec![0.0; habitat.padded_len()];
    if seed == 0 {
        return population;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for row in 1..=habitat.height() {
        for col in 1..=habitat.width() {
            if habitat.is_habitable(row, col) {
                population[habitat.index(row, col)] = rng.gen_range(0.0..MAX_INITIAL_DENSITY);
            }
        }
    }
    population
}

/// Largest value in a density grid (densities are never negative)
pub fn max_density(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Sum of a density grid divided by `land_cells`, or 0 when there is no land
pub fn average_density(values: &[f64], land_cells: usize) -> f64 {
    if land_cells == 0 {
        return 0.0;
    }
    values.iter().sum::<f64>() / land_cells as f64
}
