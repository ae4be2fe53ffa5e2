use predprey_cli::report::AVERAGES_HEADER;
use predprey_cli::runner;
use predprey_core::{RunConfig, SpeciesConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAP: &str = "4 3\n1 1 0 1\n1 1 1 1\n0 1 1 0\n";

fn scratch_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn config_for(dir: &Path) -> RunConfig {
    let landscape = dir.join("map.dat");
    fs::write(&landscape, MAP).unwrap();
    RunConfig {
        delta_t: 0.5,
        duration: 5,
        log_interval: 2,
        landscape_file: landscape,
        output_dir: dir.join("out"),
        prey: SpeciesConfig { seed: 4, ..SpeciesConfig::prey() },
        predator: SpeciesConfig { seed: 9, ..SpeciesConfig::predator() },
    }
}

#[test]
fn test_run_writes_maps_and_averages() {
    let dir = scratch_dir();
    let config = config_for(dir.path());

    let summary = runner::run(&config).unwrap();
    assert_eq!(summary.steps, 10);
    assert_eq!(summary.land_cells, 9);
    assert_eq!(summary.maps_written, 5);

    let csv = fs::read_to_string(&summary.averages_file).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(format!("{}\n", lines[0]), AVERAGES_HEADER);
    assert_eq!(lines.len(), 6);
    assert!(lines[1].starts_with("0,0.0,"));
    assert!(lines[5].starts_with("8,4.0,"));
    for row in &lines[1..] {
        let cols: Vec<&str> = row.split(',').collect();
        assert_eq!(cols.len(), 4);
        assert_eq!(cols[2].split('.').nth(1).unwrap().len(), 17);
        assert!(cols[3].parse::<f64>().unwrap() >= 0.0);
    }

    for step in [0, 2, 4, 6, 8] {
        let path = config.output_dir.join(format!("map_{:04}.ppm", step));
        let ppm = fs::read_to_string(path).unwrap();
        let mut lines = ppm.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("4 3"));
        assert_eq!(lines.next(), Some("255"));
        let pixels: Vec<&str> = lines.collect();
        assert_eq!(pixels.len(), 12);
        // Row-major interior: (1,3), (3,1) and (3,4) are water
        assert_eq!(pixels[2], "0 200 255");
        assert_eq!(pixels[8], "0 200 255");
        assert_eq!(pixels[11], "0 200 255");
        assert!(pixels[0].ends_with(" 0"));
    }
    assert!(!config.output_dir.join("map_0001.ppm").exists());
    assert!(!config.output_dir.join("map_0010.ppm").exists());
}

#[test]
fn test_runs_are_reproducible() {
    let first_dir = scratch_dir();
    let second_dir = scratch_dir();
    let first = runner::run(&config_for(first_dir.path())).unwrap();
    let second = runner::run(&config_for(second_dir.path())).unwrap();

    assert_eq!(first.final_stats, second.final_stats);
    assert_eq!(
        fs::read_to_string(&first.averages_file).unwrap(),
        fs::read_to_string(&second.averages_file).unwrap()
    );
}

#[test]
fn test_negative_seed_matches_magnitude() {
    let negative_dir = scratch_dir();
    let positive_dir = scratch_dir();
    let mut negative = config_for(negative_dir.path());
    negative.prey.seed = -4;
    negative.predator.seed = -9;

    let first = runner::run(&negative).unwrap();
    let second = runner::run(&config_for(positive_dir.path())).unwrap();
    assert_eq!(first.final_stats, second.final_stats);
}

#[test]
fn test_empty_world_stays_empty() {
    let dir = scratch_dir();
    let mut config = config_for(dir.path());
    config.prey.seed = 0;
    config.predator.seed = 0;

    let summary = runner::run(&config).unwrap();
    assert_eq!(summary.final_stats.prey_max, 0.0);
    assert_eq!(summary.final_stats.predator_average, 0.0);

    let csv = fs::read_to_string(&summary.averages_file).unwrap();
    assert_eq!(
        csv.lines().nth(1),
        Some("0,0.0,0.00000000000000000,0.00000000000000000")
    );
    let ppm = fs::read_to_string(config.output_dir.join("map_0000.ppm")).unwrap();
    assert_eq!(ppm.lines().nth(3), Some("0 0 0"));
}

#[test]
fn test_bad_habitat_aborts_before_output() {
    let dir = scratch_dir();
    let mut config = config_for(dir.path());
    fs::write(&config.landscape_file, "4 3\n1 1 0 1\n1 1 1\n0 1 1 0\n").unwrap();
    config.output_dir = dir.path().join("never");

    assert!(runner::run(&config).is_err());
    assert!(!config.output_dir.exists());
}

#[test]
fn test_run_output_removed_when_test_panics() {
    let dir = scratch_dir();
    let root = dir.path().to_path_buf();

    let outcome = std::panic::catch_unwind(move || {
        let config = config_for(dir.path());
        runner::run(&config).unwrap();
        assert!(config.output_dir.join("map_0000.ppm").exists());
        panic!("assertion failed after a run");
    });

    assert!(outcome.is_err());
    assert!(!root.exists());
}
