//! Fitness evaluation for candidate chromosomes.
//!
//! Builds a board from a chromosome, evolves it to the step budget, and
//! scores it by longevity and growth. Evaluation draws no randomness: a
//! chromosome always maps to the same board and the same fitness.

use crate::compute::{Board, BoardError};
use crate::schema::{BoardLimits, Chromosome, FitnessWeights, SearchConfig};

/// One evaluated chromosome: the chromosome, its fitness, and the board it
/// produced. Produced once per chromosome per generation.
#[derive(Debug, Clone)]
pub struct FitnessRecord {
    /// The evaluated chromosome.
    pub chromosome: Chromosome,
    /// Scalar fitness.
    pub fitness: f64,
    /// The board after evolution, retained for reporting.
    pub board: Board,
}

/// A fully evaluated generation: records ascending by fitness plus their sum.
#[derive(Debug, Clone)]
pub struct RankedPopulation {
    /// Records sorted ascending by fitness, stable on ties.
    pub records: Vec<FitnessRecord>,
    /// Sum of all fitness values.
    pub fitness_sum: f64,
}

impl RankedPopulation {
    /// The fittest record (last in ascending order).
    ///
    /// Populations are never empty; the engine validates the size upfront.
    pub fn fittest(&self) -> &FitnessRecord {
        self.records.last().expect("population is never empty")
    }
}

/// Evaluates chromosomes against the configured step budget and weights.
pub struct FitnessEvaluator {
    weights: FitnessWeights,
    limits: BoardLimits,
    columns: usize,
    step_budget: u64,
}

impl FitnessEvaluator {
    /// Create an evaluator from the run configuration.
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            weights: config.fitness,
            limits: config.board,
            columns: config.bounding_box.width,
            step_budget: config.step_budget,
        }
    }

    /// Evaluate a single chromosome.
    ///
    /// Fails only when the chromosome does not reshape into the configured
    /// column count.
    pub fn evaluate(&self, chromosome: &Chromosome) -> Result<FitnessRecord, BoardError> {
        let mut board = Board::new(chromosome, self.columns, self.limits)?;
        board.evolve(self.step_budget);

        let lifespan = board.lifespan() as f64;
        let final_live = board.live_cells() as f64;
        let growth = final_live - board.initial_live_cells() as f64;
        let fitness = lifespan * self.weights.lifespan
            + growth * self.weights.growth
            + final_live * self.weights.size;

        Ok(FitnessRecord {
            chromosome: chromosome.clone(),
            fitness,
            board,
        })
    }

    /// Evaluate a whole population.
    ///
    /// Returns the records ascending by fitness (stable on ties, preserving
    /// the original order) together with the fitness sum.
    pub fn evaluate_population(
        &self,
        population: &[Chromosome],
    ) -> Result<RankedPopulation, BoardError> {
        let mut records = Vec::with_capacity(population.len());
        let mut fitness_sum = 0.0;
        for chromosome in population {
            let record = self.evaluate(chromosome)?;
            fitness_sum += record.fitness;
            records.push(record);
        }
        records.sort_by(|a, b| a.fitness.total_cmp(&b.fitness));
        Ok(RankedPopulation {
            records,
            fitness_sum,
        })
    }
}
