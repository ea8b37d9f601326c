use crate::world::WorldConfig;

use strata::{Organism, OrganismID, SpeciesID};
use strata_nn::{genomics::LayeredGenome, networks::Network};

/// A point in the world, or a displacement between two.
pub type Vector = [f32; 2];

/// Network inputs: distance and angle to the nearest food.
pub const SENSOR_COUNT: usize = 2;
/// Network outputs: accelerate, brake, turn left, turn right.
pub const ACTUATOR_COUNT: usize = 4;

/// What a creature perceives of the food nearest to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    /// Distance to the food, capped at the sensor range.
    pub distance: f32,
    /// Angle from the creature's heading to the
    /// food, in degrees within (-180, 180].
    pub angle: f32,
}

/// A foraging agent driven by the network compiled from its genome.
#[derive(Clone, Debug)]
pub struct Creature {
    id: OrganismID,
    genome: LayeredGenome,
    network: Network,
    pub position: Vector,
    /// Heading in degrees.
    pub heading: f32,
    pub speed: f32,
    pub energy: f32,
    pub food_count: usize,
    pub target: Target,
    sensor_range: f32,
    force: f32,
    rotation: f32,
    adjusted_fitness: f32,
    species: Option<SpeciesID>,
}

impl Creature {
    pub fn new(
        id: OrganismID,
        genome: LayeredGenome,
        position: Vector,
        heading: f32,
        config: &WorldConfig,
    ) -> Creature {
        Creature {
            id,
            network: Network::new(&genome),
            genome,
            position,
            heading,
            speed: 0.0,
            energy: config.creature_energy,
            food_count: 0,
            target: Target {
                distance: config.sensor_range,
                angle: 0.0,
            },
            sensor_range: config.sensor_range,
            force: 0.0,
            rotation: 0.0,
            adjusted_fitness: 0.0,
            species: None,
        }
    }

    /// Finds the nearest food within sensor range.
    /// Returns its index, if any.
    pub fn sense(&mut self, food: &[Vector], config: &WorldConfig) -> Option<usize> {
        let mut nearest = None;
        let mut target = Target {
            distance: config.sensor_range,
            angle: 0.0,
        };
        for (i, &f) in food.iter().enumerate() {
            let d = displacement(self.position, f, config);
            let distance = d[0].hypot(d[1]);
            if distance < target.distance {
                target = Target {
                    distance,
                    angle: wrap_angle(d[1].atan2(d[0]).to_degrees() - self.heading),
                };
                nearest = Some(i);
            }
        }
        self.target = target;
        nearest
    }

    /// Feeds the current target to the network, and
    /// sets thrust and rotation from its outputs.
    ///
    /// Outputs 0 and 1 pull against each other to accelerate
    /// or brake, and outputs 2 and 3 to turn either way.
    pub fn think(&mut self, config: &WorldConfig) {
        let outputs = self.network.evaluate(&[
            self.target.distance / config.sensor_range,
            self.target.angle / 180.0,
        ]);
        self.force = if outputs[0] > 0.5 && outputs[1] < 0.5 {
            config.max_thrust * (outputs[0] - 0.5) * 2.0
        } else if outputs[0] < 0.5 && outputs[1] > 0.5 && self.speed > 0.0 {
            -0.5 * config.max_thrust
        } else {
            0.0
        };
        self.rotation = if outputs[2] > 0.5 && outputs[3] < 0.5 {
            -config.turn_rate * outputs[2]
        } else if outputs[2] < 0.5 && outputs[3] > 0.5 {
            config.turn_rate * outputs[3]
        } else {
            0.0
        };
    }

    /// Advances the creature by one tick, wrapping around the
    /// world's edges. Returns the energy spent, which is never
    /// more than the creature had.
    pub fn step(&mut self, config: &WorldConfig) -> f32 {
        let dt = config.dt;
        self.heading = wrap_angle(self.heading + self.rotation * dt);
        let drag = config.drag * self.speed * self.speed;
        self.speed = (self.speed + (self.force - drag) * dt).max(0.0);

        let (sin, cos) = self.heading.to_radians().sin_cos();
        self.position = [
            (self.position[0] + cos * self.speed * dt).rem_euclid(config.width),
            (self.position[1] + sin * self.speed * dt).rem_euclid(config.height),
        ];

        let cost = (config.metabolism + config.thrust_cost * self.force.abs()) * dt;
        let spent = cost.min(self.energy);
        self.energy -= spent;
        spent
    }

    pub fn eat(&mut self, energy: f32) {
        self.energy += energy;
        self.food_count += 1;
    }

    pub fn is_dead(&self) -> bool {
        self.energy <= 0.0
    }
}

impl Organism for Creature {
    type Genome = LayeredGenome;

    fn id(&self) -> OrganismID {
        self.id
    }

    fn genome(&self) -> &LayeredGenome {
        &self.genome
    }

    /// Rewards food eaten, and closeness to the next meal.
    fn raw_fitness(&mut self) -> f32 {
        (self.food_count as f32).sqrt() + (1.0 - self.target.distance / self.sensor_range).powi(2)
    }

    fn adjusted_fitness(&self) -> f32 {
        self.adjusted_fitness
    }

    fn set_adjusted_fitness(&mut self, fitness: f32) {
        self.adjusted_fitness = fitness;
    }

    fn species(&self) -> Option<SpeciesID> {
        self.species
    }

    fn set_species(&mut self, species: SpeciesID) {
        self.species = Some(species);
    }
}

/// Returns the shortest displacement from `from` to `to`
/// on the wrapping world.
pub fn displacement(from: Vector, to: Vector, config: &WorldConfig) -> Vector {
    let wrap = |d: f32, size: f32| {
        if d > size / 2.0 {
            d - size
        } else if d < -size / 2.0 {
            d + size
        } else {
            d
        }
    };
    [
        wrap(to[0] - from[0], config.width),
        wrap(to[1] - from[1], config.height),
    ]
}

/// Maps an angle in degrees into (-180, 180].
pub fn wrap_angle(angle: f32) -> f32 {
    let angle = angle.rem_euclid(360.0);
    if angle > 180.0 {
        angle - 360.0
    } else {
        angle
    }
}
