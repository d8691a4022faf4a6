//! Cellular automaton board - grid state, step rule, growth, cycle detection.
//!
//! The board owns a flat row-major bit grid. It is built from a chromosome
//! reshaped into the bounding box, padded by a margin, and advanced with the
//! standard B3/S23 rule until it dies out, cycles, or hits a step budget.

use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::schema::{BoardLimits, Chromosome};

/// Number of recent state fingerprints kept for cycle detection.
const CYCLE_HISTORY: usize = 3;

/// Terminal condition of a board. Terminal states are sticky: once a board
/// leaves `Active`, further `step` calls are no-ops and the grid is frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardStatus {
    /// Still evolving.
    Active,
    /// Every cell died.
    Extinct,
    /// The grid revisited one of its recent states.
    Cycled,
    /// The step budget ran out while cells were still live.
    Exhausted {
        /// Budget that was exhausted.
        steps: u64,
    },
}

/// Board construction errors.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("Chromosome length {length} is not divisible by {columns} columns")]
    InvalidChromosomeShape { length: usize, columns: usize },
}

/// Game of Life board seeded from a chromosome.
#[derive(Debug, Clone)]
pub struct Board {
    /// Row-major cells, stride = `width`. 0 = dead, 1 = live.
    cells: Vec<u8>,
    width: usize,
    height: usize,
    limits: BoardLimits,
    /// Steps performed so far. Frozen once a terminal state is reached.
    lifespan: u64,
    initial_live: usize,
    current_live: usize,
    max_live: usize,
    /// Fingerprints of the most recent distinct states, newest last.
    history: Vec<u64>,
    status: BoardStatus,
}

impl Board {
    /// Build a board from a chromosome reshaped row-major into `columns`
    /// columns, then pad it by the configured margin on every side.
    ///
    /// Fails when the chromosome length is not divisible by `columns`.
    pub fn new(
        chromosome: &Chromosome,
        columns: usize,
        limits: BoardLimits,
    ) -> Result<Self, BoardError> {
        if columns == 0 || chromosome.len() % columns != 0 {
            return Err(BoardError::InvalidChromosomeShape {
                length: chromosome.len(),
                columns,
            });
        }

        let live = chromosome.live_count();
        let mut board = Self {
            cells: chromosome.genes().to_vec(),
            width: columns,
            height: chromosome.len() / columns,
            limits,
            lifespan: 0,
            initial_live: live,
            current_live: live,
            max_live: live,
            history: Vec::with_capacity(CYCLE_HISTORY),
            status: BoardStatus::Active,
        };
        board.grow();
        Ok(board)
    }

    /// Perform one step of the automaton.
    ///
    /// The next grid is computed entirely from the previous one. A no-op
    /// once the board is in a terminal state.
    pub fn step(&mut self) {
        if self.status != BoardStatus::Active {
            return;
        }

        let (w, h) = (self.width, self.height);
        let mut next = vec![0u8; w * h];
        let mut touches_boundary = false;

        for y in 0..h {
            for x in 0..w {
                let neighbors = self.live_neighbors(x, y);
                let live = self.cells[y * w + x] == 1;
                if neighbors == 3 || (live && neighbors == 2) {
                    next[y * w + x] = 1;
                    if x == 0 || x == w - 1 || y == 0 || y == h - 1 {
                        touches_boundary = true;
                    }
                }
            }
        }

        self.cells = next;
        self.lifespan += 1;
        self.current_live = self.cells.iter().map(|&c| c as usize).sum();
        if self.current_live > self.max_live {
            self.max_live = self.current_live;
        }

        if self.current_live == 0 {
            self.status = BoardStatus::Extinct;
            return;
        }

        let fingerprint = self.fingerprint();
        if self.history.contains(&fingerprint) {
            self.status = BoardStatus::Cycled;
            return;
        }
        self.history.push(fingerprint);
        if self.history.len() > CYCLE_HISTORY {
            let excess = self.history.len() - CYCLE_HISTORY;
            self.history.drain(..excess);
        }

        if touches_boundary {
            self.grow();
        }
    }

    /// Advance until extinction, a cycle, or `max_steps` performed steps.
    pub fn evolve(&mut self, max_steps: u64) {
        loop {
            match self.status {
                BoardStatus::Active if self.current_live == 0 => {
                    self.status = BoardStatus::Extinct;
                    return;
                }
                BoardStatus::Active if self.lifespan >= max_steps => {
                    self.status = BoardStatus::Exhausted { steps: max_steps };
                    return;
                }
                BoardStatus::Active => self.step(),
                _ => return,
            }
        }
    }

    /// Count the live 8-neighborhood of `(x, y)`. Off-grid neighbors are dead.
    fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        if y > 0 {
            count += self.cells[(y - 1) * self.width + x];
            if x > 0 {
                count += self.cells[(y - 1) * self.width + x - 1];
            }
            if x < self.width - 1 {
                count += self.cells[(y - 1) * self.width + x + 1];
            }
        }
        if y < self.height - 1 {
            count += self.cells[(y + 1) * self.width + x];
            if x > 0 {
                count += self.cells[(y + 1) * self.width + x - 1];
            }
            if x < self.width - 1 {
                count += self.cells[(y + 1) * self.width + x + 1];
            }
        }
        if x > 0 {
            count += self.cells[y * self.width + x - 1];
        }
        if x < self.width - 1 {
            count += self.cells[y * self.width + x + 1];
        }
        count
    }

    /// Pad the grid by the configured margin on every side, centered.
    ///
    /// Suppressed once either dimension has reached its configured maximum;
    /// the pattern is clipped at the boundary from then on.
    fn grow(&mut self) {
        if self.width >= self.limits.max_width || self.height >= self.limits.max_height {
            return;
        }
        let margin = self.limits.margin;
        let new_width = self.width + 2 * margin;
        let new_height = self.height + 2 * margin;
        let mut cells = vec![0u8; new_width * new_height];
        for y in 0..self.height {
            let src = y * self.width;
            let dst = (y + margin) * new_width + margin;
            cells[dst..dst + self.width].copy_from_slice(&self.cells[src..src + self.width]);
        }
        self.cells = cells;
        self.width = new_width;
        self.height = new_height;
    }

    /// Fingerprint of the current grid contents, tagged with dimensions so
    /// that equal byte content at different shapes never collides.
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.width.hash(&mut hasher);
        self.height.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }

    /// Current status.
    #[inline]
    pub fn status(&self) -> BoardStatus {
        self.status
    }

    /// Whether a cycle has been detected.
    #[inline]
    pub fn is_cycle(&self) -> bool {
        self.status == BoardStatus::Cycled
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Steps performed so far.
    #[inline]
    pub fn lifespan(&self) -> u64 {
        self.lifespan
    }

    /// Live cells in the current grid.
    #[inline]
    pub fn live_cells(&self) -> usize {
        self.current_live
    }

    /// Largest live-cell count ever observed.
    #[inline]
    pub fn max_live_cells(&self) -> usize {
        self.max_live
    }

    /// Live cells in the initial (unpadded) pattern.
    #[inline]
    pub fn initial_live_cells(&self) -> usize {
        self.initial_live
    }

    /// Row-major snapshot of the grid, stride = `width()`.
    #[inline]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Whether the cell at `(x, y)` is live.
    #[inline]
    pub fn is_live(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x] == 1
    }

    /// ASCII rendering of the grid: `#` live, `.` dead, one row per line.
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(if self.cells[y * self.width + x] == 1 {
                    '#'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> BoardLimits {
        BoardLimits::default()
    }

    fn blinker() -> Chromosome {
        Chromosome::from_genes([1, 1, 1])
    }

    #[test]
    fn rejects_indivisible_chromosome() {
        let c = Chromosome::from_genes([1, 0, 1, 0, 1]);
        assert!(matches!(
            Board::new(&c, 3, limits()),
            Err(BoardError::InvalidChromosomeShape {
                length: 5,
                columns: 3
            })
        ));
    }

    #[test]
    fn construction_pads_by_margin() {
        let board = Board::new(&blinker(), 3, limits()).unwrap();
        assert_eq!(board.width(), 3 + 2 * limits().margin);
        assert_eq!(board.height(), 1 + 2 * limits().margin);
        assert_eq!(board.live_cells(), 3);
        assert_eq!(board.initial_live_cells(), 3);
        assert_eq!(board.lifespan(), 0);
        assert_eq!(board.status(), BoardStatus::Active);
    }

    #[test]
    fn live_count_is_recomputed_from_the_grid() {
        // R-pentomino: live count changes every early step.
        let c = Chromosome::from_genes([0, 1, 1, 1, 1, 0, 0, 1, 0]);
        let mut board = Board::new(&c, 3, limits()).unwrap();
        for _ in 0..10 {
            board.step();
            let counted: usize = board.cells().iter().map(|&c| c as usize).sum();
            assert_eq!(board.live_cells(), counted);
        }
    }

    #[test]
    fn lifespan_increments_once_per_step_and_freezes() {
        let mut board = Board::new(&blinker(), 3, limits()).unwrap();
        let mut previous = board.lifespan();
        while board.status() == BoardStatus::Active {
            board.step();
            assert_eq!(board.lifespan(), previous + 1);
            previous = board.lifespan();
        }
        let frozen = board.lifespan();
        board.step();
        board.step();
        assert_eq!(board.lifespan(), frozen);
    }

    #[test]
    fn blinker_is_detected_as_a_cycle() {
        let mut board = Board::new(&blinker(), 3, limits()).unwrap();
        board.evolve(10);
        assert_eq!(board.status(), BoardStatus::Cycled);
        assert!(board.is_cycle());
        // Horizontal, vertical, horizontal again: the repeat lands on step 3.
        assert_eq!(board.lifespan(), 3);
    }

    #[test]
    fn interior_block_is_a_cycle_with_zero_growth() {
        let c = Chromosome::from_genes([1, 1, 1, 1]);
        let mut board = Board::new(&c, 2, limits()).unwrap();
        board.evolve(50);
        assert_eq!(board.status(), BoardStatus::Cycled);
        assert_eq!(board.live_cells(), 4);
        assert_eq!(board.live_cells(), board.initial_live_cells());
        // Wholly interior still life: no boundary contact, no growth.
        assert_eq!(board.width(), 2 + 2 * limits().margin);
    }

    #[test]
    fn all_zero_chromosome_goes_extinct_without_stepping() {
        let c = Chromosome::from_genes([0; 16]);
        let mut board = Board::new(&c, 4, limits()).unwrap();
        assert_eq!(board.live_cells(), 0);
        board.evolve(100);
        assert_eq!(board.status(), BoardStatus::Extinct);
        assert_eq!(board.lifespan(), 0);
    }

    #[test]
    fn grid_dimensions_never_shrink() {
        let c = Chromosome::from_genes([0, 1, 1, 1, 1, 0, 0, 1, 0]);
        let mut board = Board::new(&c, 3, limits()).unwrap();
        let (mut w, mut h) = (board.width(), board.height());
        for _ in 0..60 {
            board.step();
            assert!(board.width() >= w);
            assert!(board.height() >= h);
            w = board.width();
            h = board.height();
        }
    }

    #[test]
    fn growth_is_suppressed_at_the_maximum_dimension() {
        let small = BoardLimits {
            margin: 2,
            max_width: 10,
            max_height: 10,
        };
        // A glider keeps pushing into the boundary.
        let c = Chromosome::from_genes([0, 1, 0, 0, 0, 1, 1, 1, 1]);
        let mut board = Board::new(&c, 3, small).unwrap();
        let mut max_seen = board.width().max(board.height());
        for _ in 0..200 {
            board.step();
            let dim = board.width().max(board.height());
            assert!(dim >= max_seen);
            max_seen = dim;
            if board.width() >= small.max_width {
                break;
            }
        }
        // Once at or past the cap, the dimensions stay put.
        let (w, h) = (board.width(), board.height());
        assert!(w >= small.max_width || h >= small.max_height);
        let mut board2 = board.clone();
        for _ in 0..50 {
            board2.step();
            assert_eq!(board2.width(), w);
            assert_eq!(board2.height(), h);
        }
    }

    #[test]
    fn exhausted_boards_report_the_budget() {
        let c = Chromosome::from_genes([1, 1, 1, 1, 0, 1, 0, 0, 1]);
        let mut board = Board::new(&c, 3, limits()).unwrap();
        board.evolve(10);
        assert_eq!(board.status(), BoardStatus::Exhausted { steps: 10 });
        assert_eq!(board.lifespan(), 10);
    }

    #[test]
    fn reference_seed_survives_the_full_budget() {
        // Regression baseline: this 3x3 seed runs 100 steps with no cycle
        // and never reaches the maximum grid size.
        let c = Chromosome::from_genes([1, 1, 1, 1, 0, 1, 0, 0, 1]);
        let mut board = Board::new(&c, 3, limits()).unwrap();
        board.evolve(100);
        assert_eq!(board.status(), BoardStatus::Exhausted { steps: 100 });
        assert_eq!(board.lifespan(), 100);
        assert_eq!(board.live_cells(), 124);
        assert_eq!(board.width(), 75);
        assert_eq!(board.height(), 75);
        assert!(board.width() < limits().max_width);
    }

    #[test]
    fn render_round_trips_live_cells() {
        let c = Chromosome::from_genes([1, 0, 0, 1]);
        let board = Board::new(&c, 2, limits()).unwrap();
        let rendered = board.render();
        let live = rendered.chars().filter(|&ch| ch == '#').count();
        assert_eq!(live, board.live_cells());
        assert_eq!(rendered.lines().count(), board.height());
    }
}
