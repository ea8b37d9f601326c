use super::{Member, Population, SpeciesID};

use crate::genome::{Genome, InnovationHistory};

use std::fmt;

/// Defines different possible reporting levels for logging.
#[derive(Clone, Copy, Debug)]
pub enum ReportingLevel {
    /// Clones the genomes of every living organism.
    AllGenomes,
    /// Clones the representatives of living species.
    SpeciesRepresentatives,
    /// Clones no genomes.
    NoGenomes,
}

/// A snapshot of a population.
#[derive(Clone, Debug)]
pub struct Log<G> {
    pub tick: usize,
    pub species_count: usize,
    pub organism_count: usize,
    pub sample: PopulationSample<G>,
    pub member_stats: Vec<(String, Stats)>,
}

impl<G> fmt::Display for Log<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Log {{\n\
            \ttick: {:?}\n\
            \tspecies_count: {:?}\n\
            \torganism_count: {:?}\n\
            {}\
            }}",
            &self.tick,
            &self.species_count,
            &self.organism_count,
            self.member_stats
                .iter()
                .map(|(name, stats)| format!("\t{}: {:?}\n", name, stats))
                .collect::<Vec<_>>()
                .join("")
        )
    }
}

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq)]
pub struct Stats {
    pub maximum: f32,
    pub minimum: f32,
    pub mean: f32,
    pub median: f32,
}

impl Stats {
    /// Returns statistics about numbers in a sequence.
    /// All statistics of an empty sequence are 0.
    ///
    /// # Examples
    /// ```
    /// use strata::logging::Stats;
    ///
    /// let stats = Stats::from([-2.0, -1.0, 0.5, 1.0, 1.5].iter().copied());
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn from(data: impl Iterator<Item = f32>) -> Stats {
        let mut data: Vec<f32> = data.collect();
        if data.is_empty() {
            return Stats {
                maximum: 0.0,
                minimum: 0.0,
                mean: 0.0,
                median: 0.0,
            };
        }

        data.sort_by(f32::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Stats {
            maximum: data[data.len() - 1],
            minimum: data[0],
            mean: data.iter().sum::<f32>() / data.len() as f32,
            median,
        }
    }
}

/// A reporting-level dependant store
/// of genomes from a population.
#[derive(Clone, Debug)]
pub enum PopulationSample<G> {
    /// Living species' IDs and member genomes.
    Species(Vec<(SpeciesID, Vec<G>)>),
    /// Only living species' IDs and representatives.
    SpeciesRepresentatives(Vec<(SpeciesID, G)>),
    /// Empty.
    None,
}

/// A log of the evolution of a population over time.
#[derive(Clone, Debug)]
pub struct PopulationLogger<G> {
    reporting_level: ReportingLevel,
    logs: Vec<Log<G>>,
}

impl<G: Clone> PopulationLogger<G> {
    /// Returns a logger with the appropiate reporting level.
    ///
    /// # Examples
    /// ```
    /// # use strata_nn::genomics::LayeredGenome as G;
    /// use strata::logging::{PopulationLogger, ReportingLevel};
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let logger = PopulationLogger::<G>::new(ReportingLevel::NoGenomes);
    /// assert_eq!(logger.iter().count(), 0);
    /// ```
    pub fn new(reporting_level: ReportingLevel) -> PopulationLogger<G> {
        PopulationLogger {
            reporting_level,
            logs: vec![],
        }
    }

    /// Store a snapshot of a population, taken at the given tick.
    ///
    /// The `member_stat_extractor` provides a way of
    /// obtaining arbitrary statistics on the population's
    /// members, where each statistic is named by `stat_names`.
    ///
    /// # Examples
    /// ```
    /// # use strata_nn::genomics::{GeneticConfig, LayeredGenome as G};
    /// use strata::{Population, PopulationConfig};
    /// use strata::logging::{PopulationLogger, ReportingLevel};
    /// # use rand::SeedableRng;
    /// # let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0);
    ///
    /// // With `G` a suitable type implementing `Genome`...
    /// let mut logger = PopulationLogger::<G>::new(ReportingLevel::NoGenomes);
    /// # let genetic_config = GeneticConfig::zero();
    /// let population =
    ///     Population::<_, _, G>::new(PopulationConfig::zero(), genetic_config, &mut rng);
    ///
    /// // Let the simulation run for a while...
    /// // Then log a snapshot.
    /// logger.log(0, &population, &|m| [m.adjusted_fitness()], ["fitness"]);
    /// assert_eq!(logger.iter().next().unwrap().organism_count, 0);
    /// ```
    pub fn log<C, H, MSE, const N: usize>(
        &mut self,
        tick: usize,
        population: &Population<C, H, G>,
        member_stat_extractor: &MSE,
        stat_names: [&str; N],
    ) where
        H: InnovationHistory<Config = C>,
        G: Genome<InnovationHistory = H, Config = C>,
        MSE: Fn(&Member<G>) -> [f32; N],
    {
        let stats: Vec<[f32; N]> = population
            .living_species()
            .flat_map(|s| s.members())
            .map(member_stat_extractor)
            .collect();
        let member_stats = stat_names
            .iter()
            .map(|name| name.to_string())
            .zip(unzip_n_vecs(stats.into_iter()))
            .map(|(name, data)| (name, Stats::from(data.into_iter())))
            .collect();
        self.logs.push(Log {
            tick,
            species_count: population.living_species().count(),
            organism_count: population.organism_count(),
            sample: match self.reporting_level {
                ReportingLevel::AllGenomes => PopulationSample::Species(
                    population
                        .living_species()
                        .map(|s| (s.id(), s.members().map(|m| m.genome().clone()).collect()))
                        .collect(),
                ),
                ReportingLevel::SpeciesRepresentatives => PopulationSample::SpeciesRepresentatives(
                    population
                        .living_species()
                        .map(|s| (s.id(), s.representative().clone()))
                        .collect(),
                ),
                ReportingLevel::NoGenomes => PopulationSample::None,
            },
            member_stats,
        })
    }

    /// Returns the most recent snapshot.
    pub fn latest(&self) -> Option<&Log<G>> {
        self.logs.last()
    }

    /// Iterate over all logged snapshots.
    pub fn iter(&self) -> impl Iterator<Item = &Log<G>> {
        self.logs.iter()
    }
}

fn unzip_n_vecs<T: Clone, const N: usize>(iter: impl Iterator<Item = [T; N]>) -> Vec<Vec<T>> {
    let mut vecs = vec![Vec::default(); N];
    for items in iter {
        for (vec, item) in vecs.iter_mut().zip(items) {
            vec.push(item);
        }
    }
    vecs
}
