//! Maze screensaver: a Kruskal maze revealed one knocked-down wall at a time

use super::{idle, respond, scheme_color, SaverState, Screensaver};
use crate::maze::render::render;
use crate::maze::{Generation, Grid, MazeBuilder, MazeCanvas, ShuffleStrategy};
use crate::settings::MazerSettings;
use crate::terminal::{Interrupt, Terminal};
use crossterm::style::Color;
use rand::rngs::StdRng;
use std::io;
use std::time::Duration;

pub struct Mazer {
    generation_speed_ms: u64,
    new_maze_delay_ms: u64,
    shuffle: ShuffleStrategy,
    highlight: Option<Color>,
}

impl Mazer {
    pub fn new(settings: &MazerSettings) -> Self {
        Self {
            generation_speed_ms: settings.generation_speed_ms,
            new_maze_delay_ms: settings.new_maze_delay_ms,
            shuffle: settings.shuffle,
            highlight: settings
                .highlight_uncovered
                .then_some(Color::AnsiValue(settings.highlight_color)),
        }
    }
}

/// Largest maze whose `(2w + 1) x (h + 1)` block fits in the window
fn maze_dimensions(cols: u16, rows: u16) -> (usize, usize) {
    let width = (cols as usize).saturating_sub(1) / 2;
    let height = (rows as usize).saturating_sub(1);
    (width, height)
}

/// Draws builder progress straight onto the terminal, answers the controls
/// between edges and turns a resize or quit into cancellation.
struct TerminalCanvas<'a> {
    term: &'a mut Terminal,
    state: &'a mut SaverState,
    origin: (i32, i32),
    highlight: Option<Color>,
    interrupt: Option<Interrupt>,
    error: Option<io::Error>,
}

impl TerminalCanvas<'_> {
    fn note(&mut self, polled: io::Result<Option<Interrupt>>) {
        match polled {
            Ok(Some(interrupt)) => self.interrupt = Some(interrupt),
            Ok(None) => {}
            Err(err) => self.error = Some(err),
        }
    }
}

impl MazeCanvas for TerminalCanvas<'_> {
    fn cancelled(&mut self) -> bool {
        if self.interrupt.is_none() && self.error.is_none() {
            let polled = match self.term.poll_interrupt() {
                Ok(Some(Interrupt::Input)) => respond(self.term, self.state),
                other => other,
            };
            self.note(polled);
        }
        self.interrupt.is_some() || self.error.is_some()
    }

    fn draw(&mut self, grid: &Grid) -> io::Result<()> {
        let (wall_color, bold) = scheme_color(self.state.color_scheme, 2, false);
        let (ox, oy) = self.origin;

        self.term.clear();
        for (y, row) in render(grid).iter().enumerate() {
            for (x, glyph) in row.iter().enumerate() {
                let color = match self.highlight {
                    Some(color) if glyph.uncovered => color,
                    _ => wall_color,
                };
                self.term
                    .set(ox + x as i32, oy + y as i32, glyph.ch, Some(color), bold);
            }
        }
        self.term.present()
    }

    fn wait(&mut self, delay: Duration) {
        if self.interrupt.is_none() && self.error.is_none() {
            let polled = idle(self.term, self.state, delay);
            self.note(polled);
        }
    }
}

impl Screensaver for Mazer {
    fn name(&self) -> &'static str {
        "mazer"
    }

    fn preparation(&mut self, term: &mut Terminal, _rng: &mut StdRng) -> io::Result<()> {
        term.clear();
        term.clear_screen()
    }

    fn logic(
        &mut self,
        term: &mut Terminal,
        rng: &mut StdRng,
        state: &mut SaverState,
    ) -> io::Result<()> {
        let (cols, rows) = term.size();
        let (width, height) = maze_dimensions(cols, rows);
        if width == 0 || height == 0 {
            // Too small to hold a single cell; wait for a resize
            term.nap(Duration::from_millis(250))?;
            return Ok(());
        }

        let block_w = (2 * width + 1) as i32;
        let block_h = (height + 1) as i32;
        let origin = ((cols as i32 - block_w) / 2, (rows as i32 - block_h) / 2);

        let builder = MazeBuilder::new(width, height)
            .delay(Duration::from_millis(self.generation_speed_ms))
            .shuffle(self.shuffle);

        let mut canvas = TerminalCanvas {
            term: &mut *term,
            state: &mut *state,
            origin,
            highlight: self.highlight,
            interrupt: None,
            error: None,
        };
        let outcome = builder.generate(rng, &mut canvas)?;
        let TerminalCanvas { interrupt, error, .. } = canvas;
        if let Some(err) = error {
            return Err(err);
        }

        match outcome {
            Generation::Complete(grid) => {
                tracing::info!(width, height, passages = grid.passages(), "maze finished");
                let hold = Duration::from_millis(self.new_maze_delay_ms);
                if let Some(interrupt) = idle(term, state, hold)? {
                    tracing::debug!(?interrupt, "new maze delay cut short");
                }
            }
            Generation::Cancelled { accepted } => {
                tracing::debug!(accepted, ?interrupt, "maze pass abandoned");
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_fit_the_block() {
        assert_eq!(maze_dimensions(80, 24), (39, 23));
        assert_eq!(maze_dimensions(81, 24), (40, 23));
        let (w, h) = maze_dimensions(80, 24);
        assert!(2 * w + 1 <= 80);
        assert!(h + 1 <= 24);
    }

    #[test]
    fn tiny_windows_give_empty_mazes() {
        assert_eq!(maze_dimensions(2, 10), (0, 9));
        assert_eq!(maze_dimensions(0, 0), (0, 0));
        assert_eq!(maze_dimensions(3, 1), (1, 0));
    }

    #[test]
    fn highlight_follows_settings() {
        let mut settings = MazerSettings::default();
        assert!(Mazer::new(&settings).highlight.is_none());
        settings.highlight_uncovered = true;
        settings.highlight_color = 12;
        assert_eq!(Mazer::new(&settings).highlight, Some(Color::AnsiValue(12)));
    }
}
