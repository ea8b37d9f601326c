use crate::creature::{displacement, Creature, Vector};

use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use strata::logging::{PopulationLogger, ReportingLevel};
use strata::{ConfigError, Organism, OrganismID, Population, PopulationConfig};
use strata_nn::genomics::{GeneticConfig, History, LayeredGenome};

use std::num::NonZeroUsize;

/// Statistics recorded for every living creature at each snapshot.
pub const STAT_NAMES: [&str; 3] = ["adjusted fitness", "enabled genes", "hidden nodes"];

/// Configuration of the foraging world.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Seed of the world's random number generator.
    pub seed: u64,
    /// Number of ticks to simulate.
    pub ticks: usize,
    /// Simulated seconds per tick.
    pub dt: f32,
    pub width: f32,
    pub height: f32,
    /// Distance beyond which creatures cannot see food.
    pub sensor_range: f32,
    pub initial_population: usize,
    pub max_population: usize,
    pub initial_food: usize,
    /// Energy not held by creatures or food. Creatures and
    /// food are only created while it can pay for them, and
    /// energy spent by creatures flows back into it.
    pub energy_reserve: f32,
    /// Energy of a newborn creature.
    pub creature_energy: f32,
    /// Energy held by each piece of food.
    pub food_energy: f32,
    /// Ticks between food spawns.
    pub food_interval: NonZeroUsize,
    /// Ticks between reproduction rounds.
    pub reproduction_interval: NonZeroUsize,
    /// Ticks between population snapshots.
    pub log_interval: NonZeroUsize,
    /// Distance within which food is eaten.
    pub eat_radius: f32,
    pub max_thrust: f32,
    pub drag: f32,
    /// Degrees per second at full turn.
    pub turn_rate: f32,
    /// Energy spent per second at rest.
    pub metabolism: f32,
    /// Energy spent per second per unit of thrust.
    pub thrust_cost: f32,
}

impl WorldConfig {
    /// Checks that all values are usable.
    ///
    /// # Errors
    /// Returns the first offending value found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("dt", self.dt),
            ("width", self.width),
            ("height", self.height),
            ("sensor_range", self.sensor_range),
            ("creature_energy", self.creature_energy),
            ("food_energy", self.food_energy),
            ("eat_radius", self.eat_radius),
        ] {
            ConfigError::check_positive(name, value)?;
        }
        for (name, value) in [
            ("energy_reserve", self.energy_reserve),
            ("max_thrust", self.max_thrust),
            ("drag", self.drag),
            ("turn_rate", self.turn_rate),
            ("metabolism", self.metabolism),
            ("thrust_cost", self.thrust_cost),
        ] {
            ConfigError::check_non_negative(name, value)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn test() -> WorldConfig {
        WorldConfig {
            seed: 0,
            ticks: 200,
            dt: 0.1,
            width: 100.0,
            height: 100.0,
            sensor_range: 50.0,
            initial_population: 10,
            max_population: 20,
            initial_food: 30,
            energy_reserve: 500.0,
            creature_energy: 5.0,
            food_energy: 3.0,
            food_interval: NonZeroUsize::new(2).unwrap(),
            reproduction_interval: NonZeroUsize::new(5).unwrap(),
            log_interval: NonZeroUsize::new(50).unwrap(),
            eat_radius: 4.0,
            max_thrust: 100.0,
            drag: 0.05,
            turn_rate: 180.0,
            metabolism: 1.0,
            thrust_cost: 0.001,
        }
    }
}

/// A toroidal world in which creatures seek out food,
/// and breed while the energy reserve allows.
pub struct World<R: Rng> {
    config: WorldConfig,
    population: Population<GeneticConfig, History, LayeredGenome>,
    logger: PopulationLogger<LayeredGenome>,
    creatures: Vec<Creature>,
    food: Vec<Vector>,
    energy_reserve: f32,
    next_id: usize,
    tick: usize,
    rng: R,
}

impl<R: Rng> World<R> {
    /// Creates a world with its initial food and creatures.
    pub fn new(
        population_config: PopulationConfig,
        genetic_config: GeneticConfig,
        config: WorldConfig,
        mut rng: R,
    ) -> World<R> {
        let population = Population::new(population_config, genetic_config, &mut rng);
        let mut world = World {
            energy_reserve: config.energy_reserve,
            config,
            population,
            logger: PopulationLogger::new(ReportingLevel::NoGenomes),
            creatures: vec![],
            food: vec![],
            next_id: 0,
            tick: 0,
            rng,
        };

        for _ in 0..world.config.initial_food {
            if !world.spawn_food() {
                break;
            }
        }
        for _ in 0..world.config.initial_population {
            let genome = world.population.create_genome(&mut world.rng);
            let position = world.random_position();
            if !world.spawn_creature(genome, position) {
                break;
            }
        }
        world
    }

    /// Runs the configured number of ticks, or until every
    /// creature has died. Returns the number of ticks run.
    pub fn run(&mut self) -> usize {
        while self.tick < self.config.ticks && !self.creatures.is_empty() {
            self.step();
        }
        if self.creatures.is_empty() {
            info!("every creature died by tick {}", self.tick);
        }
        self.tick
    }

    /// Advances the world by one tick.
    pub fn step(&mut self) {
        for creature in &mut self.creatures {
            let nearest = creature.sense(&self.food, &self.config);
            creature.think(&self.config);
            self.energy_reserve += creature.step(&self.config);

            if let Some(i) = nearest {
                let d = displacement(creature.position, self.food[i], &self.config);
                if d[0].hypot(d[1]) <= self.config.eat_radius {
                    creature.eat(self.config.food_energy);
                    self.food.swap_remove(i);
                }
            }
        }

        self.bury_dead();
        self.tick += 1;
        if self.tick % self.config.reproduction_interval.get() == 0 {
            self.reproduce();
        }
        if self.tick % self.config.food_interval.get() == 0 {
            self.spawn_food();
        }
        if self.tick % self.config.log_interval.get() == 0 {
            self.log();
        }
    }

    fn bury_dead(&mut self) {
        let population = &mut self.population;
        self.creatures.retain(|c| {
            if c.is_dead() {
                population.kill(c);
                debug!("{:?} starved", c.id());
                false
            } else {
                true
            }
        });
    }

    /// Breeds two creatures drawn by adjusted fitness, and
    /// places up to two children next to the first parent.
    fn reproduce(&mut self) {
        if self.creatures.len() < 2 || self.creatures.len() >= self.config.max_population {
            return;
        }
        for creature in &mut self.creatures {
            // Every living creature belongs to a species.
            if let Err(e) = self.population.calculate_fitness(creature) {
                debug!("{}", e);
            }
        }
        let (p1, p2) = match self.population.breeding_pair(&self.creatures, &mut self.rng) {
            Some(pair) => pair,
            None => return,
        };

        for _ in 0..2 {
            let child = match self.population.crossover(
                &self.creatures[p1],
                &self.creatures[p2],
                &mut self.rng,
            ) {
                Ok(child) => child,
                Err(e) => {
                    debug!("{}", e);
                    return;
                }
            };
            let [x, y] = self.creatures[p1].position;
            let position = [
                (x + self.rng.gen_range(-10.0..10.0)).rem_euclid(self.config.width),
                (y + self.rng.gen_range(-10.0..10.0)).rem_euclid(self.config.height),
            ];
            if !self.spawn_creature(child, position) {
                return;
            }
        }
    }

    /// Creates a creature if the energy reserve can pay for it.
    fn spawn_creature(&mut self, genome: LayeredGenome, position: Vector) -> bool {
        if self.energy_reserve < self.config.creature_energy {
            return false;
        }
        self.energy_reserve -= self.config.creature_energy;
        let heading = self.rng.gen_range(-180.0..180.0);
        let mut creature = Creature::new(
            OrganismID(self.next_id),
            genome,
            position,
            heading,
            &self.config,
        );
        self.next_id += 1;
        self.population.determine_species(&mut creature);
        self.creatures.push(creature);
        true
    }

    /// Places food at a random position if the
    /// energy reserve can pay for it.
    fn spawn_food(&mut self) -> bool {
        if self.energy_reserve < self.config.food_energy {
            return false;
        }
        self.energy_reserve -= self.config.food_energy;
        let position = self.random_position();
        self.food.push(position);
        true
    }

    fn random_position(&mut self) -> Vector {
        [
            self.rng.gen_range(0.0..self.config.width),
            self.rng.gen_range(0.0..self.config.height),
        ]
    }

    fn log(&mut self) {
        self.logger.log(
            self.tick,
            &self.population,
            &|m| {
                [
                    m.adjusted_fitness(),
                    m.genome().genes().filter(|g| g.enabled()).count() as f32,
                    m.genome().hidden_count() as f32,
                ]
            },
            STAT_NAMES,
        );
    }

    pub fn logger(&self) -> &PopulationLogger<LayeredGenome> {
        &self.logger
    }

    pub fn population(&self) -> &Population<GeneticConfig, History, LayeredGenome> {
        &self.population
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    /// Returns the total energy in the world, which
    /// stays constant while the world runs.
    pub fn total_energy(&self) -> f32 {
        self.energy_reserve
            + self.creatures.iter().map(|c| c.energy).sum::<f32>()
            + self.food.len() as f32 * self.config.food_energy
    }
}
