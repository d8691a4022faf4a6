//! Genetic search over Game of Life seed patterns.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Fitness evaluation** (`fitness`): boards built from chromosomes,
//!   evolved to a step budget, and scored by longevity and growth
//! - **Variation operators** (`genome`): random chromosomes, single-point
//!   crossover, and single-bit mutation behind one seeded random source
//! - **Generation loop** (`search`): elitism, parent selection, and
//!   stagnation-based termination
//!
//! # Example
//!
//! ```rust,no_run
//! use methuselah::compute::evolution::SearchEngine;
//! use methuselah::schema::SearchConfig;
//!
//! let config = SearchConfig::default();
//! let mut engine = SearchEngine::new(config).unwrap();
//! let result = engine
//!     .run_with_callback(|progress| {
//!         println!(
//!             "Generation {}: best fitness = {:.1}",
//!             progress.generation, progress.best_fitness
//!         );
//!     })
//!     .unwrap();
//!
//! println!("Best pattern lifespan: {}", result.best.board.lifespan());
//! ```

mod fitness;
mod genome;
mod search;

pub use fitness::{FitnessEvaluator, FitnessRecord, RankedPopulation};
pub use genome::SearchRng;
pub use search::{BestCandidate, SearchEngine, SearchResult};
