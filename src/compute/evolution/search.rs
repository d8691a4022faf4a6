//! Generation loop driving the methuselah search.

use log::{debug, info};

use crate::compute::{Board, BoardError};
use crate::schema::{
    Chromosome, ConfigError, SearchConfig, SearchHistory, SearchProgress, SearchStats,
    SelectionMethod, StopReason,
};

use super::fitness::{FitnessEvaluator, RankedPopulation};
use super::genome::SearchRng;

/// Best-ever candidate, copied out of the population that produced it.
///
/// Populations are discarded every generation; this snapshot never aliases
/// one.
#[derive(Debug, Clone)]
pub struct BestCandidate {
    /// The winning chromosome.
    pub chromosome: Chromosome,
    /// Its fitness.
    pub fitness: f64,
    /// The board it produced during evaluation.
    pub board: Board,
}

/// Final result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best candidate across all generations.
    pub best: BestCandidate,
    /// Run statistics.
    pub stats: SearchStats,
    /// Per-generation aggregate fitness.
    pub history: SearchHistory,
}

/// Search engine owning the population for the duration of one run.
///
/// The loop is INIT -> (EVALUATE -> CHECK_IMPROVEMENT -> STOP or
/// REPRODUCE)* -> DONE, single-threaded and strictly sequential.
pub struct SearchEngine {
    config: SearchConfig,
    rng: SearchRng,
    evaluator: FitnessEvaluator,
    population: Vec<Chromosome>,
    best: Option<BestCandidate>,
    history: SearchHistory,
    generation: usize,
    stagnation_count: usize,
}

impl SearchEngine {
    /// Create an engine, validating the configuration upfront.
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let rng = SearchRng::new(seed);
        let evaluator = FitnessEvaluator::new(&config);

        Ok(Self {
            config,
            rng,
            evaluator,
            population: Vec::new(),
            best: None,
            history: SearchHistory::default(),
            generation: 0,
            stagnation_count: 0,
        })
    }

    /// Generate the initial random population.
    fn initialize(&mut self) {
        let genes = self.config.bounding_box.gene_count();
        let live_probability = self.config.bounding_box.live_probability;
        self.population = (0..self.config.population.size)
            .map(|_| self.rng.random_chromosome(genes, live_probability))
            .collect();
        self.best = None;
        self.history = SearchHistory::default();
        self.generation = 0;
        self.stagnation_count = 0;
    }

    /// Record per-generation aggregates.
    fn record_generation(&mut self, ranked: &RankedPopulation) {
        let max = ranked.fittest().fitness;
        let min = ranked.records[0].fitness;
        let avg = ranked.fitness_sum / ranked.records.len() as f64;
        self.history.max_fitness.push(max);
        self.history.min_fitness.push(min);
        self.history.avg_fitness.push(avg);
        debug!(
            "generation {}: max={max:.1} min={min:.1} avg={avg:.1}",
            self.generation
        );
    }

    /// Record a new best-ever when this generation improved on it.
    ///
    /// Resets the stagnation counter to 1 on improvement, increments it
    /// otherwise.
    fn track_best(&mut self, ranked: &RankedPopulation) {
        let fittest = ranked.fittest();
        let improved = self
            .best
            .as_ref()
            .is_none_or(|best| fittest.fitness > best.fitness);
        if improved {
            self.best = Some(BestCandidate {
                chromosome: fittest.chromosome.clone(),
                fitness: fittest.fitness,
                board: fittest.board.clone(),
            });
            self.stagnation_count = 1;
        } else {
            self.stagnation_count += 1;
        }
    }

    /// Pick one parent from the ranked population.
    fn select_parent<'a>(&mut self, ranked: &'a RankedPopulation) -> &'a Chromosome {
        match self.config.genetic.selection {
            SelectionMethod::RouletteWheel => {
                if ranked.fitness_sum > 0.0 {
                    let mut target = self.rng.uniform(ranked.fitness_sum);
                    for record in &ranked.records {
                        if target < record.fitness {
                            return &record.chromosome;
                        }
                        target -= record.fitness;
                    }
                }
                // Zero total fitness: the walk can never succeed, so fall
                // back to the fittest record.
                &ranked.fittest().chromosome
            }
            SelectionMethod::RankBased => {
                let n = ranked.records.len();
                let rank_sum = (n * (n + 1) / 2) as f64;
                let mut target = self.rng.uniform(rank_sum);
                for (i, record) in ranked.records.iter().enumerate() {
                    let rank = (i + 1) as f64;
                    if target < rank {
                        return &record.chromosome;
                    }
                    target -= rank;
                }
                &ranked.fittest().chromosome
            }
        }
    }

    /// Build the next population: elitism, then selection -> crossover ->
    /// mutation in parent pairs. An odd final slot keeps only one child.
    fn reproduce(&mut self, ranked: &RankedPopulation) -> Vec<Chromosome> {
        let size = self.config.population.size;
        let mutation_probability = self.config.genetic.mutation_probability;
        let mut next = Vec::with_capacity(size);

        for record in ranked
            .records
            .iter()
            .rev()
            .take(self.config.population.elitism)
        {
            next.push(record.chromosome.clone());
        }

        while next.len() < size {
            let parent1 = self.select_parent(ranked);
            let parent2 = self.select_parent(ranked);
            let (mut child1, mut child2) = self.rng.crossover(parent1, parent2);

            self.rng.mutate(&mut child1, mutation_probability);
            next.push(child1);
            if next.len() == size {
                break;
            }
            self.rng.mutate(&mut child2, mutation_probability);
            next.push(child2);
        }

        next
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> SearchProgress {
        SearchProgress {
            generation: self.generation,
            total_generations: self.config.population.max_generations,
            best_fitness: self.best.as_ref().map_or(0.0, |b| b.fitness),
            generation_best: self.history.max_fitness.last().copied().unwrap_or(0.0),
            generation_min: self.history.min_fitness.last().copied().unwrap_or(0.0),
            avg_fitness: self.history.avg_fitness.last().copied().unwrap_or(0.0),
            stagnation_count: self.stagnation_count,
        }
    }

    /// Run the search, reporting progress once per evaluated generation.
    pub fn run_with_callback<F>(&mut self, callback: F) -> Result<SearchResult, BoardError>
    where
        F: Fn(&SearchProgress),
    {
        self.initialize();

        let stop_reason = loop {
            let ranked = self.evaluator.evaluate_population(&self.population)?;
            self.generation += 1;
            self.record_generation(&ranked);
            self.track_best(&ranked);
            callback(&self.progress());

            if self.stagnation_count >= self.config.population.stagnation_limit {
                break StopReason::Stagnation;
            }
            if self.generation >= self.config.population.max_generations {
                break StopReason::MaxGenerations;
            }

            self.population = self.reproduce(&ranked);
        };

        let best = self
            .best
            .take()
            .expect("at least one generation was evaluated");
        info!(
            "search stopped after {} generations ({stop_reason:?}), best fitness {:.1}",
            self.generation, best.fitness
        );

        Ok(SearchResult {
            stats: SearchStats {
                generations: self.generation,
                total_evaluations: (self.generation * self.config.population.size) as u64,
                best_fitness: best.fitness,
                stop_reason,
            },
            best,
            history: self.history.clone(),
        })
    }

    /// Run the search without progress reporting.
    pub fn run(&mut self) -> Result<SearchResult, BoardError> {
        self.run_with_callback(|_| {})
    }
}
