//! Command-line arguments.

use anyhow::Result;
use clap::Parser;
use predprey_core::RunConfig;
use std::path::PathBuf;

/// Predator-prey simulation. Foxes and mice.
///
/// Any flag left unset falls back to the `--config` file, then to the
/// built-in defaults.
#[derive(Debug, Parser)]
#[command(name = "predprey", version)]
pub struct Cli {
    /// Birth rate of mice [default: 0.1]
    #[arg(short = 'r', long)]
    pub birth_mice: Option<f64>,

    /// Rate at which foxes eat mice [default: 0.05]
    #[arg(short = 'a', long)]
    pub death_mice: Option<f64>,

    /// Diffusion rate of mice [default: 0.2]
    #[arg(short = 'k', long)]
    pub diffusion_mice: Option<f64>,

    /// Birth rate of foxes [default: 0.03]
    #[arg(short = 'b', long)]
    pub birth_foxes: Option<f64>,

    /// Rate at which foxes starve [default: 0.09]
    #[arg(short = 'm', long)]
    pub death_foxes: Option<f64>,

    /// Diffusion rate of foxes [default: 0.2]
    #[arg(short = 'l', long)]
    pub diffusion_foxes: Option<f64>,

    /// Time step size [default: 0.5]
    #[arg(long)]
    pub delta_t: Option<f64>,

    /// Number of time steps at which to output files [default: 10]
    #[arg(short = 't', long, allow_negative_numbers = true)]
    pub time_step: Option<i64>,

    /// Time to run the simulation [default: 500]
    #[arg(short = 'd', long, allow_negative_numbers = true)]
    pub duration: Option<i64>,

    /// Input landscape file
    #[arg(short = 'f', long)]
    pub landscape_file: Option<PathBuf>,

    /// Random seed for initialising mouse densities [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub mouse_seed: Option<i64>,

    /// Random seed for initialising fox densities [default: 1]
    #[arg(long, allow_negative_numbers = true)]
    pub fox_seed: Option<i64>,

    /// Directory for maps and the averages log [default: .]
    #[arg(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// JSON run configuration to start from
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Write a JSON run summary to this path
    #[arg(long)]
    pub summary: Option<PathBuf>,
}

impl Cli {
    /// Resolve the effective run configuration
    pub fn to_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };

        override_with(&mut config.prey.birth_rate, self.birth_mice);
        override_with(&mut config.prey.death_rate, self.death_mice);
        override_with(&mut config.prey.diffusion_rate, self.diffusion_mice);
        override_with(&mut config.prey.seed, self.mouse_seed);
        override_with(&mut config.predator.birth_rate, self.birth_foxes);
        override_with(&mut config.predator.death_rate, self.death_foxes);
        override_with(&mut config.predator.diffusion_rate, self.diffusion_foxes);
        override_with(&mut config.predator.seed, self.fox_seed);
        override_with(&mut config.delta_t, self.delta_t);
        override_with(&mut config.log_interval, self.time_step);
        override_with(&mut config.duration, self.duration);
        override_with(&mut config.landscape_file, self.landscape_file.clone());
        override_with(&mut config.output_dir, self.output_dir.clone());

        Ok(config)
    }
}

fn override_with<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}
