//! Chromosome type encoding candidate seed patterns.

use serde::{Deserialize, Serialize};

/// Binary vector encoding a candidate seed pattern.
///
/// The length is `width * height` of the bounding box; genes are reshaped
/// row-major into a rectangle when a board is built from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chromosome {
    genes: Vec<u8>,
}

impl Chromosome {
    /// Build a chromosome from raw genes. Any non-zero value counts as live.
    pub fn from_genes(genes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            genes: genes.into_iter().map(|g| u8::from(g != 0)).collect(),
        }
    }

    /// Number of genes.
    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    /// Whether the chromosome has no genes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Raw gene slice (0 = dead, 1 = live).
    #[inline]
    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    /// Number of live genes.
    pub fn live_count(&self) -> usize {
        self.genes.iter().map(|&g| g as usize).sum()
    }

    /// Flip the gene at `index`.
    pub fn flip(&mut self, index: usize) {
        self.genes[index] ^= 1;
    }

    /// Splice a prefix of `self` with a suffix of `other` at `cut`.
    ///
    /// Both chromosomes must have the same length; the offspring keeps it.
    pub(crate) fn splice(&self, other: &Chromosome, cut: usize) -> Chromosome {
        debug_assert_eq!(self.len(), other.len());
        let mut genes = Vec::with_capacity(self.len());
        genes.extend_from_slice(&self.genes[..cut]);
        genes.extend_from_slice(&other.genes[cut..]);
        Chromosome { genes }
    }

    /// Render the chromosome as an ASCII rectangle, `columns` genes per row.
    ///
    /// Intended for logging and CLI output; `#` is live, `.` is dead.
    pub fn render(&self, columns: usize) -> String {
        let mut out = String::with_capacity(self.genes.len() + self.genes.len() / columns.max(1));
        for (i, &gene) in self.genes.iter().enumerate() {
            out.push(if gene == 1 { '#' } else { '.' });
            if (i + 1) % columns == 0 {
                out.push('\n');
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_genes_normalizes_to_bits() {
        let c = Chromosome::from_genes([0, 1, 2, 255, 0]);
        assert_eq!(c.genes(), &[0, 1, 1, 1, 0]);
        assert_eq!(c.live_count(), 3);
    }

    #[test]
    fn flip_toggles_a_single_gene() {
        let mut c = Chromosome::from_genes([0, 0, 1]);
        c.flip(0);
        c.flip(2);
        assert_eq!(c.genes(), &[1, 0, 0]);
    }

    #[test]
    fn splice_keeps_length_and_halves() {
        let a = Chromosome::from_genes([1, 1, 1, 1]);
        let b = Chromosome::from_genes([0, 0, 0, 0]);
        let child = a.splice(&b, 2);
        assert_eq!(child.genes(), &[1, 1, 0, 0]);
    }

    #[test]
    fn render_reshapes_row_major() {
        let c = Chromosome::from_genes([1, 0, 0, 1]);
        assert_eq!(c.render(2), "#.\n.#\n");
    }
}
