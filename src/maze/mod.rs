//! Maze generation
//!
//! Randomized Kruskal: every wall between two neighbouring cells is an edge,
//! edges are shuffled, and each edge whose cells are not yet joined gets its
//! wall knocked down. The result is a spanning tree over the grid.

pub mod builder;
pub mod disjoint;
pub mod edges;
pub mod render;

pub use builder::{Generation, MazeBuilder, MazeCanvas};
pub use edges::ShuffleStrategy;

/// One of the four sides of a cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

// Lookup tables indexed by `Direction as usize`
const BITS: [u8; 4] = [1, 2, 4, 8];
const OPPOSITE: [Direction; 4] = [
    Direction::South,
    Direction::North,
    Direction::West,
    Direction::East,
];
const DELTAS: [(isize, isize); 4] = [(0, -1), (0, 1), (1, 0), (-1, 0)];

impl Direction {
    /// Bit set in a cell's mask when this side is open
    #[inline]
    pub const fn bit(self) -> u8 {
        BITS[self as usize]
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        OPPOSITE[self as usize]
    }

    /// Column/row offset to the neighbour on this side
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        DELTAS[self as usize]
    }

    /// Coordinates of the neighbouring cell, or None when it would fall off the grid
    pub fn step(self, x: usize, y: usize, width: usize, height: usize) -> Option<(usize, usize)> {
        let (dx, dy) = self.delta();
        let nx = x.checked_add_signed(dx)?;
        let ny = y.checked_add_signed(dy)?;
        (nx < width && ny < height).then_some((nx, ny))
    }
}

/// Candidate wall between `(x, y)` and its neighbour in `dir`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub x: usize,
    pub y: usize,
    pub dir: Direction,
}

/// Cell bitmasks, row-major. A set bit means that side is open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// All walls up
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Mask of the cell at `(x, y)`; out-of-range reads as fully walled
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.cells[self.index(x, y)]
        } else {
            0
        }
    }

    #[inline]
    pub fn is_open(&self, x: usize, y: usize, dir: Direction) -> bool {
        self.get(x, y) & dir.bit() != 0
    }

    /// Knock down the wall on side `dir` of `(x, y)`, opening both faces.
    /// Returns the neighbour's coordinates, or None if `dir` leads off the grid.
    pub fn carve(&mut self, x: usize, y: usize, dir: Direction) -> Option<(usize, usize)> {
        let (nx, ny) = dir.step(x, y, self.width, self.height)?;
        let here = self.index(x, y);
        let there = self.index(nx, ny);
        self.cells[here] |= dir.bit();
        self.cells[there] |= dir.opposite().bit();
        Some((nx, ny))
    }

    /// Number of open passages between cells
    pub fn passages(&self) -> usize {
        let faces: u32 = self.cells.iter().map(|c| c.count_ones()).sum();
        faces as usize / 2
    }
}
