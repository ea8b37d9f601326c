//! A headless foraging world, in which creatures steered by
//! evolving networks seek out food and breed in real time.
//!
//! Usage: `forage [CONFIG]`, where `CONFIG` is a RON file
//! in the format of the bundled `forage.ron`, which is
//! used when no file is given.
//!
//! Diagnostics go to stderr, filtered by `RUST_LOG`
//! (`info` by default; `debug` adds deaths and
//! species events).
mod creature;
mod world;

use creature::{ACTUATOR_COUNT, SENSOR_COUNT};
use strata::{ConfigError, Organism, PopulationConfig};
use strata_nn::genomics::GeneticConfig;
use world::{World, WorldConfig};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use std::{env, fs, io, process};

const DEFAULT_CONFIG: &str = include_str!("../forage.ron");

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Config {
    population: PopulationConfig,
    genetic: GeneticConfig,
    world: WorldConfig,
}

#[derive(Debug, Error)]
enum SetupError {
    #[error("could not read configuration: {0}")]
    Io(#[from] io::Error),
    #[error("could not parse configuration: {0}")]
    Parse(#[from] ron::Error),
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ConfigError),
    #[error("creatures need {expected} {name}, but the configuration has {found}")]
    Mismatch {
        name: &'static str,
        expected: usize,
        found: usize,
    },
}

impl SetupError {
    fn check_count(name: &'static str, expected: usize, found: usize) -> Result<(), SetupError> {
        if found == expected {
            Ok(())
        } else {
            Err(SetupError::Mismatch {
                name,
                expected,
                found,
            })
        }
    }
}

fn load_config(path: Option<&str>) -> Result<Config, SetupError> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_CONFIG.to_string(),
    };
    let config: Config = ron::from_str(&text)?;
    config.population.validate()?;
    config.genetic.validate()?;
    config.world.validate()?;
    SetupError::check_count("sensors", SENSOR_COUNT, config.genetic.input_count.get())?;
    SetupError::check_count("actuators", ACTUATOR_COUNT, config.genetic.output_count.get())?;
    Ok(config)
}

fn main() {
    // Records from the `log` facade are forwarded to the subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .init();

    let path = env::args().nth(1);
    let config = match load_config(path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let rng = StdRng::seed_from_u64(config.world.seed);
    let mut world = World::new(config.population, config.genetic, config.world, rng);
    let ticks = world.run();

    for log in world.logger().iter() {
        println!("{}", log);
    }
    println!(
        "Ran {} ticks: {} creatures alive in {} species, {} species in total",
        ticks,
        world.creatures().len(),
        world.population().living_species().count(),
        world.population().historical_species_count(),
    );
    if let Some(best) = world
        .creatures()
        .iter()
        .max_by(|a, b| a.adjusted_fitness().total_cmp(&b.adjusted_fitness()))
    {
        println!(
            "Fittest creature: {:?}, {} food eaten\n{}",
            best.id(),
            best.food_count,
            best.genome()
        );
    }
}
