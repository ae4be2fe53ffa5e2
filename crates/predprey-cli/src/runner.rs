//! Drives a full run: load, seed, step, and report at each log interval.

use crate::report::{self, AveragesLog};
use anyhow::{Context, Result};
use predprey_core::{Error, RunConfig, Species};
use predprey_world::{HabitatGrid, PopulationField, PopulationStats, Simulation};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// What a completed run produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: u64,
    pub land_cells: usize,
    pub maps_written: usize,
    pub averages_file: PathBuf,
    pub final_stats: PopulationStats,
}

/// Build the simulation described by `config` without running it
pub fn build_simulation(config: &RunConfig) -> Result<Simulation> {
    config.validate()?;
    if config.landscape_file.as_os_str().is_empty() {
        return Err(Error::Configuration("no landscape file given".to_string()).into());
    }

    let habitat = Arc::new(HabitatGrid::load(&config.landscape_file)?);
    info!(
        width = habitat.width(),
        height = habitat.height(),
        land_cells = habitat.land_cells(),
        "Habitat loaded"
    );

    let prey = PopulationField::new(
        config.prey.rng_seed(),
        config.prey.rates(),
        habitat.clone(),
        Species::Prey,
    )?;
    let predator = PopulationField::new(
        config.predator.rng_seed(),
        config.predator.rates(),
        habitat.clone(),
        Species::Predator,
    )?;

    Ok(Simulation::new(prey, predator, habitat, config.delta_t)?)
}

/// Run the simulation for `duration / delta_t` steps, writing a map and an
/// averages row before every logging step.
#[instrument(skip(config), fields(landscape = %config.landscape_file.display()))]
pub fn run(config: &RunConfig) -> Result<RunSummary> {
    let mut sim = build_simulation(config)?;
    let total_steps = config.total_steps();
    let land_cells = sim.habitat().land_cells();

    std::fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;
    let mut averages = AveragesLog::create(&config.output_dir)?;

    info!(total_steps, delta_t = config.delta_t, "Starting simulation");

    let mut maps_written = 0;
    for step in 0..total_steps {
        if config.is_log_step(step) {
            let time = step as f64 * config.delta_t;
            let prey_average = sim.average_prey(land_cells);
            let predator_average = sim.average_predator(land_cells);

            averages.record(step, time, prey_average, predator_average)?;
            info!(
                timestep = step,
                time,
                prey_average,
                predator_average,
                "Averages. Timestep: {} Time (s): {:.1} Mice: {:.17} Foxes: {:.17}",
                step,
                time,
                prey_average,
                predator_average
            );

            let path = report::write_map_file(&config.output_dir, step, &sim)?;
            debug!(path = %path.display(), "Wrote population map");
            maps_written += 1;
        }

        sim.step();
    }

    let averages_file = averages.finish()?;
    let final_stats = sim.stats();

    info!(
        event = "run_summary",
        steps = sim.steps(),
        maps_written,
        prey_max = final_stats.prey_max,
        predator_max = final_stats.predator_max,
        prey_average = final_stats.prey_average,
        predator_average = final_stats.predator_average,
        "Simulation complete"
    );

    Ok(RunSummary {
        steps: sim.steps(),
        land_cells,
        maps_written,
        averages_file,
        final_stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_landscape_is_configuration_error() {
        let err = build_simulation(&RunConfig::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_invalid_config_fails_before_loading() {
        let config = RunConfig {
            delta_t: 2.0,
            landscape_file: PathBuf::from("/nonexistent/map.dat"),
            ..Default::default()
        };
        let err = build_simulation(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_unreadable_landscape_is_io_error() {
        let config = RunConfig {
            landscape_file: PathBuf::from("/nonexistent/map.dat"),
            ..Default::default()
        };
        let err = build_simulation(&config).unwrap_err();
        assert!(matches!(err.downcast_ref::<Error>(), Some(Error::Io { .. })));
    }
}
