//! PPM population maps and the CSV averages log.

use anyhow::{Context, Result};
use predprey_world::{HabitatGrid, Simulation};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// RGB used for cells nothing can live on
pub const WATER: (u8, u8, u8) = (0, 200, 255);

pub const AVERAGES_FILE: &str = "averages.csv";
pub const AVERAGES_HEADER: &str = "Timestep,Time,Mice,Foxes\n";

/// Scale `value` against `max` onto `0..=255`; a zero max maps to 0
pub fn colour(value: f64, max: f64) -> u8 {
    if max == 0.0 {
        return 0;
    }
    (value / max * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Write an ASCII PPM of the interior: red is predators, green is prey
pub fn write_population_map<W: Write>(
    out: &mut W,
    habitat: &HabitatGrid,
    prey: &[f64],
    predator: &[f64],
    prey_max: f64,
    predator_max: f64,
) -> io::Result<()> {
    write!(out, "P3\n{} {}\n255\n", habitat.width(), habitat.height())?;
    for row in 1..=habitat.height() {
        for col in 1..=habitat.width() {
            let i = habitat.index(row, col);
            if habitat.is_habitable(row, col) {
                writeln!(
                    out,
                    "{} {} 0",
                    colour(predator[i], predator_max),
                    colour(prey[i], prey_max)
                )?;
            } else {
                writeln!(out, "{} {} {}", WATER.0, WATER.1, WATER.2)?;
            }
        }
    }
    Ok(())
}

pub fn map_path(dir: &Path, step: u64) -> PathBuf {
    dir.join(format!("map_{:04}.ppm", step))
}

/// Write `map_<step>.ppm` for the simulation's current state
pub fn write_map_file(dir: &Path, step: u64, sim: &Simulation) -> Result<PathBuf> {
    let path = map_path(dir, step);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    write_population_map(
        &mut out,
        sim.habitat(),
        sim.prey(),
        sim.predator(),
        sim.max_prey(),
        sim.max_predator(),
    )
    .and_then(|_| out.flush())
    .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

/// One averages-log row
pub fn averages_row(step: u64, time: f64, prey: f64, predator: f64) -> String {
    format!("{},{:.1},{:.17},{:.17}\n", step, time, prey, predator)
}

/// Per-run averages CSV, truncated and headed on creation
pub struct AveragesLog {
    path: PathBuf,
    out: BufWriter<File>,
}

impl AveragesLog {
    pub fn create(dir: &Path) -> Result<Self> {
        let path = dir.join(AVERAGES_FILE);
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        let mut out = BufWriter::new(file);
        out.write_all(AVERAGES_HEADER.as_bytes())
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(Self { path, out })
    }

    pub fn record(&mut self, step: u64, time: f64, prey: f64, predator: f64) -> Result<()> {
        self.out
            .write_all(averages_row(step, time, prey, predator).as_bytes())
            .with_context(|| format!("writing {}", self.path.display()))
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.out
            .flush()
            .with_context(|| format!("flushing {}", self.path.display()))?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour() {
        assert_eq!(colour(5.0, 0.0), 0);
        assert_eq!(colour(0.0, 4.0), 0);
        assert_eq!(colour(4.0, 4.0), 255);
        assert_eq!(colour(2.0, 4.0), 128);
        assert_eq!(colour(1.0, 3.0), 85);
    }

    #[test]
    fn test_population_map() {
        let habitat = HabitatGrid::parse("2 1\n1 0\n").unwrap();
        // Padded 3x4 grid, interior cells at flat indices 5 and 6
        let mut prey = vec![0.0; 12];
        let mut predator = vec![0.0; 12];
        prey[5] = 2.0;
        predator[5] = 1.0;

        let mut out = Vec::new();
        write_population_map(&mut out, &habitat, &prey, &predator, 4.0, 1.0).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 1\n255\n255 128 0\n0 200 255\n"
        );
    }

    #[test]
    fn test_population_map_with_empty_world() {
        let habitat = HabitatGrid::parse("1 2\n1\n1\n").unwrap();
        let zeros = vec![0.0; habitat.padded_len()];
        let mut out = Vec::new();
        write_population_map(&mut out, &habitat, &zeros, &zeros, 0.0, 0.0).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "P3\n1 2\n255\n0 0 0\n0 0 0\n");
    }

    #[test]
    fn test_averages_row() {
        assert_eq!(
            averages_row(10, 5.0, 0.5, 0.25),
            "10,5.0,0.50000000000000000,0.25000000000000000\n"
        );
        assert_eq!(map_path(Path::new("out"), 7), Path::new("out/map_0007.ppm"));
    }
}
