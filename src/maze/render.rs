//! Text rendering of a maze grid
//!
//! Each cell takes two columns: its floor (`_` or space) and the edge it
//! shares with the cell to its right (`|`, `_` or space). With the leading
//! wall and the top border that makes a `(2w + 1) x (h + 1)` block.

use super::{Direction, Grid};

/// One character of the rendered block
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph {
    pub ch: char,
    /// Belongs to a cell no passage has reached yet
    pub uncovered: bool,
}

impl Glyph {
    const fn plain(ch: char) -> Self {
        Self { ch, uncovered: false }
    }
}

pub fn render(grid: &Grid) -> Vec<Vec<Glyph>> {
    let (width, height) = (grid.width(), grid.height());
    if width == 0 || height == 0 {
        return Vec::new();
    }

    let south = Direction::South.bit();
    let mut rows = Vec::with_capacity(height + 1);

    let mut top = Vec::with_capacity(2 * width + 1);
    top.push(Glyph::plain(' '));
    top.extend(std::iter::repeat(Glyph::plain('_')).take(2 * width - 1));
    top.push(Glyph::plain(' '));
    rows.push(top);

    for y in 0..height {
        let mut row = Vec::with_capacity(2 * width + 1);
        row.push(Glyph::plain('|'));

        for x in 0..width {
            let cell = grid.get(x, y);
            let uncovered = cell == 0;

            let floor = if cell & south != 0 { ' ' } else { '_' };
            row.push(Glyph { ch: floor, uncovered });

            let side = if grid.is_open(x, y, Direction::East) {
                // Keep the corner in line with the floors on either side
                if (cell | grid.get(x + 1, y)) & south != 0 {
                    ' '
                } else {
                    '_'
                }
            } else {
                '|'
            };
            row.push(Glyph { ch: side, uncovered });
        }

        rows.push(row);
    }

    rows
}

/// Plain text lines, styling dropped
pub fn render_lines(grid: &Grid) -> Vec<String> {
    render(grid)
        .into_iter()
        .map(|row| row.into_iter().map(|g| g.ch).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::MazeBuilder;
    use crate::maze::builder::{Generation, MazeCanvas};
    use rand::prelude::*;
    use std::io;

    struct Quiet;

    impl MazeCanvas for Quiet {
        fn cancelled(&mut self) -> bool {
            false
        }

        fn draw(&mut self, _grid: &Grid) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn single_cell_is_a_closed_box() {
        let grid = Grid::new(1, 1);
        assert_eq!(render_lines(&grid), vec![" _ ", "|_|"]);
    }

    #[test]
    fn corridor_has_no_inner_walls() {
        let mut grid = Grid::new(3, 1);
        grid.carve(1, 0, Direction::West);
        grid.carve(2, 0, Direction::West);
        assert_eq!(render_lines(&grid), vec![" _____ ", "|_____|"]);
    }

    #[test]
    fn fresh_grid_is_all_walls() {
        let grid = Grid::new(2, 2);
        assert_eq!(render_lines(&grid), vec![" ___ ", "|_|_|", "|_|_|"]);
    }

    #[test]
    fn open_south_clears_the_floor() {
        let mut grid = Grid::new(2, 2);
        grid.carve(0, 0, Direction::South);
        grid.carve(0, 0, Direction::East);
        assert_eq!(render_lines(&grid), vec![" ___ ", "|  _|", "|_|_|"]);
    }

    #[test]
    fn block_dimensions() {
        let mut rng = StdRng::seed_from_u64(8);
        let outcome = MazeBuilder::new(7, 4).generate(&mut rng, &mut Quiet).unwrap();
        let Generation::Complete(grid) = outcome else {
            panic!("generation cancelled");
        };
        let lines = render_lines(&grid);
        assert_eq!(lines.len(), 5);
        assert!(lines.iter().all(|l| l.chars().count() == 15));
    }

    #[test]
    fn rendering_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(21);
        let outcome = MazeBuilder::new(9, 9).generate(&mut rng, &mut Quiet).unwrap();
        let Generation::Complete(grid) = outcome else {
            panic!("generation cancelled");
        };
        assert_eq!(render(&grid), render(&grid.clone()));
    }

    #[test]
    fn untouched_cells_are_flagged() {
        let mut grid = Grid::new(2, 1);
        assert!(render(&grid)[1][1].uncovered);
        grid.carve(1, 0, Direction::West);
        let rows = render(&grid);
        assert!(rows[1].iter().all(|g| !g.uncovered));
        assert!(rows[0].iter().all(|g| !g.uncovered));
    }

    #[test]
    fn empty_grid_renders_nothing() {
        assert!(render(&Grid::new(0, 3)).is_empty());
    }
}
