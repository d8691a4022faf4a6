//! Configuration types for the methuselah search.

use serde::{Deserialize, Serialize};

/// Top-level configuration for one search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Bounding box confining the initial pattern.
    pub bounding_box: BoundingBox,
    /// Population size, generation caps, and elitism.
    pub population: PopulationConfig,
    /// Selection and variation settings.
    #[serde(default)]
    pub genetic: GeneticConfig,
    /// Fitness weights combining longevity and growth.
    #[serde(default)]
    pub fitness: FitnessWeights,
    /// Board growth margin and hard size limits.
    #[serde(default)]
    pub board: BoardLimits,
    /// Steps each candidate board is evolved during evaluation.
    #[serde(default = "default_step_budget")]
    pub step_budget: u64,
    /// Random seed for reproducibility. Entropy-seeded when absent.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            bounding_box: BoundingBox::default(),
            population: PopulationConfig::default(),
            genetic: GeneticConfig::default(),
            fitness: FitnessWeights::default(),
            board: BoardLimits::default(),
            step_budget: default_step_budget(),
            random_seed: None,
        }
    }
}

fn default_step_budget() -> u64 {
    100
}

/// Fixed rectangle confining the initial pattern - the search-space dimension.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Box width in cells (chromosome columns).
    pub width: usize,
    /// Box height in cells (chromosome rows).
    pub height: usize,
    /// Probability that a gene of a random chromosome is live.
    #[serde(default = "default_live_probability")]
    pub live_probability: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            width: 6,
            height: 6,
            live_probability: default_live_probability(),
        }
    }
}

fn default_live_probability() -> f64 {
    0.2
}

impl BoundingBox {
    /// Chromosome length encoding this box (width * height).
    #[inline]
    pub fn gene_count(&self) -> usize {
        self.width * self.height
    }
}

/// Population size and termination settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of chromosomes per generation.
    pub size: usize,
    /// Hard cap on the number of generations.
    #[serde(default = "default_max_generations")]
    pub max_generations: usize,
    /// Stop after this many consecutive generations without a new best.
    #[serde(default = "default_stagnation_limit")]
    pub stagnation_limit: usize,
    /// Number of best individuals carried over unchanged each generation.
    #[serde(default = "default_elitism")]
    pub elitism: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 10,
            max_generations: default_max_generations(),
            stagnation_limit: default_stagnation_limit(),
            elitism: default_elitism(),
        }
    }
}

fn default_max_generations() -> usize {
    30
}
fn default_stagnation_limit() -> usize {
    4
}
fn default_elitism() -> usize {
    1
}

/// Selection and variation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Parent selection method.
    #[serde(default)]
    pub selection: SelectionMethod,
    /// Probability that a child has one bit flipped after crossover.
    #[serde(default = "default_mutation_probability")]
    pub mutation_probability: f64,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            selection: SelectionMethod::default(),
            mutation_probability: default_mutation_probability(),
        }
    }
}

fn default_mutation_probability() -> f64 {
    0.8
}

/// Parent selection method.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method")]
pub enum SelectionMethod {
    /// Fitness-proportionate (roulette wheel) selection.
    #[default]
    RouletteWheel,
    /// Rank-based selection. Less aggressive towards top performers
    /// when the fitness distribution is heavily skewed.
    RankBased,
}

/// Weights combining lifespan, growth, and final size into one fitness scalar.
///
/// `fitness = lifespan * lifespan_w + (final_live - initial_live) * growth_w
///          + final_live * size_w`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight of the number of steps survived.
    pub lifespan: f64,
    /// Weight of the live-cell delta between final and initial state.
    pub growth: f64,
    /// Weight of the final live-cell count.
    pub size: f64,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self {
            lifespan: 1.0,
            growth: 2.0,
            size: 1.0,
        }
    }
}

/// Dynamic board growth parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoardLimits {
    /// Padding added on every side when a live cell reaches the boundary.
    pub margin: usize,
    /// Growth stops once the width reaches this value.
    pub max_width: usize,
    /// Growth stops once the height reaches this value.
    pub max_height: usize,
}

impl Default for BoardLimits {
    fn default() -> Self {
        Self {
            margin: 2,
            max_width: 100,
            max_height: 100,
        }
    }
}

impl SearchConfig {
    /// Validate configuration parameters before any generation runs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bounding_box.width == 0 || self.bounding_box.height == 0 {
            return Err(ConfigError::InvalidBoundingBox);
        }
        if self.population.size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.population.max_generations == 0 {
            return Err(ConfigError::InvalidGenerationCap);
        }
        if self.population.stagnation_limit == 0 {
            return Err(ConfigError::InvalidStagnationLimit);
        }
        if self.population.elitism >= self.population.size {
            return Err(ConfigError::InvalidElitism {
                elitism: self.population.elitism,
                population: self.population.size,
            });
        }
        if !(0.0..=1.0).contains(&self.bounding_box.live_probability) {
            return Err(ConfigError::InvalidProbability {
                name: "live_probability",
                value: self.bounding_box.live_probability,
            });
        }
        if !(0.0..=1.0).contains(&self.genetic.mutation_probability) {
            return Err(ConfigError::InvalidProbability {
                name: "mutation_probability",
                value: self.genetic.mutation_probability,
            });
        }
        if self.fitness.lifespan <= 0.0 || self.fitness.growth <= 0.0 || self.fitness.size <= 0.0 {
            return Err(ConfigError::InvalidFitnessWeights);
        }
        if self.step_budget == 0 {
            return Err(ConfigError::InvalidStepBudget);
        }
        if self.board.max_width < self.bounding_box.width + 2 * self.board.margin
            || self.board.max_height < self.bounding_box.height + 2 * self.board.margin
        {
            return Err(ConfigError::BoxExceedsBoardLimit);
        }
        Ok(())
    }
}

/// Configuration validation errors. All are fatal at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Bounding box dimensions must be non-zero")]
    InvalidBoundingBox,
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Generation cap must be non-zero")]
    InvalidGenerationCap,
    #[error("Stagnation limit must be non-zero")]
    InvalidStagnationLimit,
    #[error("Elitism count {elitism} must be smaller than the population size {population}")]
    InvalidElitism { elitism: usize, population: usize },
    #[error("{name} = {value} is outside [0, 1]")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("Fitness weights must be positive")]
    InvalidFitnessWeights,
    #[error("Step budget must be non-zero")]
    InvalidStepBudget,
    #[error("Padded bounding box does not fit within the maximum board size")]
    BoxExceedsBoardLimit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_empty_population() {
        let mut config = SearchConfig::default();
        config.population.size = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyPopulation)
        ));
    }

    #[test]
    fn rejects_out_of_range_mutation_probability() {
        let mut config = SearchConfig::default();
        config.genetic.mutation_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { .. })
        ));
    }

    #[test]
    fn rejects_elitism_covering_whole_population() {
        let mut config = SearchConfig::default();
        config.population.elitism = config.population.size;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidElitism { .. })
        ));
    }

    #[test]
    fn rejects_board_limit_smaller_than_padded_box() {
        let mut config = SearchConfig::default();
        config.board.max_width = config.bounding_box.width + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoxExceedsBoardLimit)
        ));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = SearchConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.population.size, config.population.size);
        assert_eq!(parsed.step_budget, config.step_budget);
    }
}
