//! Kruskal maze construction with an animated reveal

use super::disjoint::DisjointSet;
use super::edges::{self, ShuffleStrategy};
use super::Grid;
use rand::Rng;
use std::io;
use std::time::Duration;

/// Where the builder sends its progress.
///
/// `cancelled` is polled before every redraw and every pause; returning true
/// abandons the pass.
pub trait MazeCanvas {
    fn cancelled(&mut self) -> bool;

    /// Redraw the whole grid
    fn draw(&mut self, grid: &Grid) -> io::Result<()>;

    /// Pace the animation between accepted edges
    fn wait(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Largest grid `generate` accepts
pub const MAX_CELLS: usize = 1 << 20;

/// Outcome of one generation pass
#[derive(Debug)]
pub enum Generation {
    Complete(Grid),
    /// Interrupted after `accepted` walls were knocked down; the partial grid is dropped
    Cancelled { accepted: usize },
}

#[derive(Clone, Copy, Debug)]
pub struct MazeBuilder {
    pub width: usize,
    pub height: usize,
    pub delay: Duration,
    pub shuffle: ShuffleStrategy,
}

impl MazeBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            delay: Duration::ZERO,
            shuffle: ShuffleStrategy::default(),
        }
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn shuffle(mut self, strategy: ShuffleStrategy) -> Self {
        self.shuffle = strategy;
        self
    }

    /// Build one maze, redrawing on `canvas` after each accepted edge.
    ///
    /// Fails with `InvalidInput` when the grid has more than [`MAX_CELLS`] cells.
    pub fn generate<R, C>(&self, rng: &mut R, canvas: &mut C) -> io::Result<Generation>
    where
        R: Rng,
        C: MazeCanvas,
    {
        let cells = self
            .width
            .checked_mul(self.height)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("maze of {}x{} cells is too large", self.width, self.height),
                )
            })?;
        let mut grid = Grid::new(self.width, self.height);
        let mut sets = DisjointSet::new(cells);
        let edges = edges::shuffle(edges::build(self.width, self.height), self.shuffle, rng);
        let mut accepted = 0;

        tracing::debug!(
            width = self.width,
            height = self.height,
            edges = edges.len(),
            strategy = ?self.shuffle,
            "generating maze"
        );

        for edge in edges {
            let Some((nx, ny)) = edge.dir.step(edge.x, edge.y, self.width, self.height) else {
                continue;
            };
            let here = grid.index(edge.x, edge.y);
            let there = grid.index(nx, ny);

            if sets.is_connected(here, there) {
                continue;
            }

            if canvas.cancelled() {
                return Ok(Generation::Cancelled { accepted });
            }
            canvas.draw(&grid)?;

            if canvas.cancelled() {
                return Ok(Generation::Cancelled { accepted });
            }
            canvas.wait(self.delay);

            sets.connect(here, there);
            grid.carve(edge.x, edge.y, edge.dir);
            accepted += 1;
        }

        canvas.draw(&grid)?;
        tracing::debug!(accepted, "maze complete");
        Ok(Generation::Complete(grid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Direction;
    use rand::prelude::*;
    use rstest::rstest;
    use std::collections::VecDeque;

    /// Records redraws and optionally cancels once `cancel_after` edges went through
    #[derive(Default)]
    struct Recorder {
        draws: usize,
        waits: usize,
        snapshots: Vec<usize>,
        cancel_after: Option<usize>,
    }

    impl MazeCanvas for Recorder {
        fn cancelled(&mut self) -> bool {
            self.cancel_after.is_some_and(|n| self.waits >= n)
        }

        fn draw(&mut self, grid: &Grid) -> io::Result<()> {
            self.draws += 1;
            self.snapshots.push(grid.passages());
            Ok(())
        }

        fn wait(&mut self, _delay: Duration) {
            self.waits += 1;
        }
    }

    fn reachable(grid: &Grid) -> usize {
        let (w, h) = (grid.width(), grid.height());
        let mut seen = vec![false; w * h];
        let mut queue = VecDeque::from([(0, 0)]);
        seen[0] = true;
        let mut count = 0;
        while let Some((x, y)) = queue.pop_front() {
            count += 1;
            for dir in [Direction::North, Direction::South, Direction::East, Direction::West] {
                if !grid.is_open(x, y, dir) {
                    continue;
                }
                if let Some((nx, ny)) = dir.step(x, y, w, h) {
                    let i = grid.index(nx, ny);
                    if !seen[i] {
                        seen[i] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
        count
    }

    fn complete(result: Generation) -> Grid {
        match result {
            Generation::Complete(grid) => grid,
            Generation::Cancelled { accepted } => panic!("cancelled after {accepted} edges"),
        }
    }

    #[rstest]
    fn maze_is_a_spanning_tree(
        #[values(ShuffleStrategy::KeyedSort, ShuffleStrategy::Swap)] strategy: ShuffleStrategy,
        #[values((2, 2), (3, 5), (16, 9), (40, 20))] size: (usize, usize),
        #[values(1, 99)] seed: u64,
    ) {
        let (w, h) = size;
        let mut rng = StdRng::seed_from_u64(seed);
        let mut canvas = Recorder::default();
        let grid = complete(
            MazeBuilder::new(w, h)
                .shuffle(strategy)
                .generate(&mut rng, &mut canvas)
                .unwrap(),
        );

        assert_eq!(grid.passages(), w * h - 1);
        assert_eq!(reachable(&grid), w * h);
    }

    #[test]
    fn redraws_once_per_accepted_edge_plus_final() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut canvas = Recorder::default();
        complete(MazeBuilder::new(6, 4).generate(&mut rng, &mut canvas).unwrap());

        assert_eq!(canvas.draws, 6 * 4);
        // Each redraw happens before its edge is carved
        let expected: Vec<usize> = (0..6 * 4).collect();
        assert_eq!(canvas.snapshots, expected);
    }

    #[test]
    fn single_cell_has_nothing_to_carve() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut canvas = Recorder::default();
        let grid = complete(MazeBuilder::new(1, 1).generate(&mut rng, &mut canvas).unwrap());
        assert_eq!(grid.get(0, 0), 0);
        assert_eq!(canvas.draws, 1);
    }

    #[test]
    fn single_row_becomes_a_corridor() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut canvas = Recorder::default();
        let grid = complete(MazeBuilder::new(3, 1).generate(&mut rng, &mut canvas).unwrap());

        let east = Direction::East.bit();
        let west = Direction::West.bit();
        assert_eq!(grid.get(0, 0), east);
        assert_eq!(grid.get(1, 0), east | west);
        assert_eq!(grid.get(2, 0), west);
    }

    #[test]
    fn cancellation_stops_mid_pass() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut canvas = Recorder {
            cancel_after: Some(4),
            ..Recorder::default()
        };
        let result = MazeBuilder::new(10, 10).generate(&mut rng, &mut canvas).unwrap();

        assert!(matches!(result, Generation::Cancelled { accepted: 4 }));
        assert_eq!(canvas.draws, 4);
        assert_eq!(canvas.snapshots.last(), Some(&3));
    }

    #[test]
    fn cancelled_before_start_carves_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut canvas = Recorder {
            cancel_after: Some(0),
            ..Recorder::default()
        };
        let result = MazeBuilder::new(4, 4).generate(&mut rng, &mut canvas).unwrap();

        assert!(matches!(result, Generation::Cancelled { accepted: 0 }));
        assert_eq!(canvas.draws, 0);
    }

    #[rstest]
    #[case(usize::MAX, 2)]
    #[case(2, usize::MAX)]
    #[case(MAX_CELLS + 1, 1)]
    fn oversized_grid_is_rejected(#[case] width: usize, #[case] height: usize) {
        let mut rng = StdRng::seed_from_u64(0);
        let mut canvas = Recorder::default();
        let err = MazeBuilder::new(width, height)
            .generate(&mut rng, &mut canvas)
            .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(canvas.draws, 0);
    }

    #[test]
    fn same_seed_same_maze() {
        let build = || {
            let mut rng = StdRng::seed_from_u64(1234);
            complete(
                MazeBuilder::new(12, 8)
                    .generate(&mut rng, &mut Recorder::default())
                    .unwrap(),
            )
        };
        assert_eq!(build(), build());
    }
}
