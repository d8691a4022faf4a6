//! Chromosome generation and variation operators.
//!
//! All randomness of the search flows through [`SearchRng`], so a run is
//! reproducible from a single seed.

use rand::prelude::*;

use crate::schema::Chromosome;

/// Seeded random source for population generation, selection draws,
/// crossover cut points, and mutation.
pub struct SearchRng {
    rng: StdRng,
}

impl SearchRng {
    /// Create from an explicit seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Random chromosome of `len` genes, each independently live with
    /// probability `live_probability`.
    pub fn random_chromosome(&mut self, len: usize, live_probability: f64) -> Chromosome {
        Chromosome::from_genes((0..len).map(|_| u8::from(self.rng.gen_bool(live_probability))))
    }

    /// Single-point crossover: one uniform cut in `[0, len)`, offspring are
    /// the two complementary prefix/suffix combinations.
    pub fn crossover(
        &mut self,
        parent1: &Chromosome,
        parent2: &Chromosome,
    ) -> (Chromosome, Chromosome) {
        let cut = self.rng.gen_range(0..parent1.len());
        crossover_at(parent1, parent2, cut)
    }

    /// With probability `probability`, flip exactly one uniformly chosen
    /// bit; otherwise leave the chromosome unchanged.
    pub fn mutate(&mut self, chromosome: &mut Chromosome, probability: f64) {
        if !chromosome.is_empty() && self.rng.gen_bool(probability) {
            let index = self.rng.gen_range(0..chromosome.len());
            chromosome.flip(index);
        }
    }

    /// Uniform draw in `[0, bound)`.
    pub fn uniform(&mut self, bound: f64) -> f64 {
        self.rng.gen_range(0.0..bound)
    }
}

/// Crossover at a fixed cut point.
fn crossover_at(
    parent1: &Chromosome,
    parent2: &Chromosome,
    cut: usize,
) -> (Chromosome, Chromosome) {
    (parent1.splice(parent2, cut), parent2.splice(parent1, cut))
}
