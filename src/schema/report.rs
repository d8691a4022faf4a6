//! Progress and result reporting types for the search.

use serde::{Deserialize, Serialize};

/// Progress update reported once per generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchProgress {
    /// Current generation number (1-based).
    pub generation: usize,
    /// Hard cap on the number of generations.
    pub total_generations: usize,
    /// Best fitness seen so far across all generations.
    pub best_fitness: f64,
    /// Best fitness of the current generation.
    pub generation_best: f64,
    /// Worst fitness of the current generation.
    pub generation_min: f64,
    /// Average fitness of the current generation.
    pub avg_fitness: f64,
    /// Consecutive generations without a new best.
    pub stagnation_count: usize,
}

/// Per-generation aggregate fitness, one entry per generation.
///
/// Exposed as plain numeric sequences so the driver can persist or plot them.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchHistory {
    /// Maximum fitness per generation.
    pub max_fitness: Vec<f64>,
    /// Minimum fitness per generation.
    pub min_fitness: Vec<f64>,
    /// Average fitness per generation.
    pub avg_fitness: Vec<f64>,
}

/// Statistics from a completed search run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStats {
    /// Total generations evaluated.
    pub generations: usize,
    /// Total board evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness achieved.
    pub best_fitness: f64,
    /// Reason the search stopped.
    pub stop_reason: StopReason,
}

/// Reason the search stopped. Both are normal terminal states.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// Reached maximum generations.
    MaxGenerations,
    /// Stagnation limit hit.
    Stagnation,
}
