//! Candidate walls and their shuffling

use super::{Direction, Edge};
use rand::prelude::*;
use serde::Deserialize;

/// How the edge list gets randomized. Both give a uniform permutation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ShuffleStrategy {
    /// Tag every edge with a random key and sort on it
    #[default]
    KeyedSort,
    /// In-place Fisher-Yates
    Swap,
}

/// Every interior wall exactly once: the North wall of each cell below the
/// top row and the West wall of each cell right of the first column.
pub fn build(width: usize, height: usize) -> Vec<Edge> {
    let mut edges = Vec::with_capacity(edge_count(width, height).unwrap_or(0));

    for y in 0..height {
        for x in 0..width {
            if y > 0 {
                edges.push(Edge { x, y, dir: Direction::North });
            }
            if x > 0 {
                edges.push(Edge { x, y, dir: Direction::West });
            }
        }
    }

    edges
}

/// Interior walls of a `width` x `height` grid, or None if that overflows
pub fn edge_count(width: usize, height: usize) -> Option<usize> {
    let vertical = width.checked_mul(height.saturating_sub(1))?;
    let horizontal = width.saturating_sub(1).checked_mul(height)?;
    vertical.checked_add(horizontal)
}

pub fn shuffle<R: Rng>(mut edges: Vec<Edge>, strategy: ShuffleStrategy, rng: &mut R) -> Vec<Edge> {
    match strategy {
        ShuffleStrategy::KeyedSort => {
            let mut keyed: Vec<(u64, Edge)> = edges.into_iter().map(|e| (rng.gen(), e)).collect();
            keyed.sort_unstable_by_key(|&(key, _)| key);
            keyed.into_iter().map(|(_, e)| e).collect()
        }
        ShuffleStrategy::Swap => {
            edges.shuffle(rng);
            edges
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, 0)]
    #[case(3, 1, 2)]
    #[case(1, 4, 3)]
    #[case(2, 2, 4)]
    #[case(10, 7, 123)]
    fn edge_count_matches_formula(#[case] w: usize, #[case] h: usize, #[case] expected: usize) {
        assert_eq!(build(w, h).len(), expected);
        assert_eq!(expected, w * (h - 1) + (w - 1) * h);
    }

    #[test]
    fn edge_count_overflow_is_none() {
        assert_eq!(edge_count(usize::MAX, 2), None);
        assert_eq!(edge_count(2, usize::MAX), None);
        assert_eq!(edge_count(0, usize::MAX), Some(0));
        assert_eq!(edge_count(4, 3), Some(17));
    }

    #[test]
    fn only_north_and_west_are_enumerated() {
        let edges = build(5, 5);
        assert!(edges
            .iter()
            .all(|e| matches!(e.dir, Direction::North | Direction::West)));
        assert!(edges.iter().all(|e| match e.dir {
            Direction::North => e.y > 0,
            _ => e.x > 0,
        }));
    }

    #[test]
    fn single_row_is_all_west() {
        let edges = build(3, 1);
        assert_eq!(
            edges,
            vec![
                Edge { x: 1, y: 0, dir: Direction::West },
                Edge { x: 2, y: 0, dir: Direction::West },
            ]
        );
    }

    #[test]
    fn empty_grid_has_no_edges() {
        assert!(build(0, 0).is_empty());
        assert!(build(0, 5).is_empty());
    }

    #[rstest]
    fn shuffle_is_a_permutation(
        #[values(ShuffleStrategy::KeyedSort, ShuffleStrategy::Swap)] strategy: ShuffleStrategy,
        #[values((0, 0), (1, 1), (2, 1), (8, 6))] size: (usize, usize),
    ) {
        let mut rng = StdRng::seed_from_u64(7);
        let original = build(size.0, size.1);
        let mut shuffled = shuffle(original.clone(), strategy, &mut rng);
        assert_eq!(shuffled.len(), original.len());

        let mut expected = original;
        expected.sort();
        shuffled.sort();
        assert_eq!(shuffled, expected);
    }

    #[test]
    fn shuffle_actually_reorders() {
        let mut rng = StdRng::seed_from_u64(42);
        let original = build(12, 12);
        for strategy in [ShuffleStrategy::KeyedSort, ShuffleStrategy::Swap] {
            let shuffled = shuffle(original.clone(), strategy, &mut rng);
            assert_ne!(shuffled, original, "{strategy:?} left 264 edges in order");
        }
    }
}
