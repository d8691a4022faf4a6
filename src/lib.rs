//! Methuselah - Genetic search for long-lived Game of Life seeds.
//!
//! This crate searches for "methuselah" patterns: small seeds confined to a
//! fixed bounding box that live unusually long before dying, stabilizing,
//! or cycling. Candidates are encoded as binary chromosomes and bred with a
//! genetic algorithm; each one is scored by evolving a dynamically growing
//! Game of Life board.
//!
//! # Architecture
//!
//! The crate is split into two main modules:
//!
//! - `schema`: Configuration, chromosome, and report types
//! - `compute`: The board automaton and the genetic search engine
//!
//! # Example
//!
//! ```rust,no_run
//! use methuselah::{
//!     compute::evolution::SearchEngine,
//!     schema::SearchConfig,
//! };
//!
//! let config = SearchConfig::default();
//! let mut engine = SearchEngine::new(config).expect("valid configuration");
//! let result = engine.run().expect("search run");
//!
//! println!(
//!     "Best fitness {:.1}, lifespan {}",
//!     result.best.fitness,
//!     result.best.board.lifespan()
//! );
//! ```

pub mod compute;
pub mod schema;

// Re-export commonly used types
pub use compute::evolution::{SearchEngine, SearchResult};
pub use compute::{Board, BoardError, BoardStatus};
pub use schema::{Chromosome, SearchConfig};
