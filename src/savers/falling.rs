//! Falling text: lines of random glyphs dropping down the screen, at most one
//! line per column at a time

use super::{idle, scheme_color, SaverState, Screensaver};
use crate::settings::FallingSettings;
use crate::terminal::Terminal;
use rand::prelude::*;
use std::io;
use std::time::Duration;

const GLYPHS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789@#$%&*+=<>?";

struct Line {
    column: usize,
    head: i32,
    glyphs: Vec<char>,
}

impl Line {
    /// Fully below the bottom row
    fn gone(&self, height: i32) -> bool {
        self.head - self.glyphs.len() as i32 >= height
    }
}

pub struct FallingText {
    frame_delay_ms: u64,
    spawn_chance: f64,
    min_length: usize,
    max_length: usize,
    lines: Vec<Line>,
    reserved: Vec<bool>,  // Columns that currently have a line in them
}

impl FallingText {
    pub fn new(settings: &FallingSettings) -> Self {
        Self {
            frame_delay_ms: settings.frame_delay_ms,
            spawn_chance: settings.spawn_chance,
            min_length: settings.min_length,
            max_length: settings.max_length,
            lines: Vec::new(),
            reserved: Vec::new(),
        }
    }

    fn reset(&mut self, width: usize) {
        self.lines.clear();
        self.reserved = vec![false; width];
    }

    /// Start a line in a random free column. Returns false when every column is taken.
    fn spawn(&mut self, rng: &mut StdRng) -> bool {
        let free: Vec<usize> = self
            .reserved
            .iter()
            .enumerate()
            .filter(|(_, &taken)| !taken)
            .map(|(x, _)| x)
            .collect();
        let Some(&column) = free.choose(rng) else {
            return false;
        };

        let length = rng.gen_range(self.min_length..=self.max_length);
        let glyphs = (0..length)
            .map(|_| GLYPHS[rng.gen_range(0..GLYPHS.len())] as char)
            .collect();

        self.reserved[column] = true;
        self.lines.push(Line { column, head: 0, glyphs });
        true
    }

    /// Move every line down a row and release the columns of lines that left the screen
    fn advance(&mut self, height: i32) {
        for line in &mut self.lines {
            line.head += 1;
        }

        let reserved = &mut self.reserved;
        self.lines.retain(|line| {
            if line.gone(height) {
                if let Some(slot) = reserved.get_mut(line.column) {
                    *slot = false;
                }
                false
            } else {
                true
            }
        });
    }

    fn draw(&self, term: &mut Terminal, scheme: u8) {
        term.clear();
        for line in &self.lines {
            let len = line.glyphs.len();
            for (i, &ch) in line.glyphs.iter().enumerate() {
                let y = line.head - i as i32;
                if y < 0 {
                    continue;
                }
                let (color, bold) = scheme_color(scheme, intensity(i, len), i == 0);
                term.set(line.column as i32, y, ch, Some(color), bold);
            }
        }
    }
}

/// Brightness of glyph `i` in a line of `len`: bright head, fading thirds
fn intensity(i: usize, len: usize) -> u8 {
    match i {
        0 => 3,
        _ if i < len / 3 => 2,
        _ if i < 2 * len / 3 => 1,
        _ => 0,
    }
}

impl Screensaver for FallingText {
    fn name(&self) -> &'static str {
        "falling"
    }

    fn preparation(&mut self, term: &mut Terminal, _rng: &mut StdRng) -> io::Result<()> {
        let (w, _) = term.size();
        self.reset(w as usize);
        term.clear();
        term.clear_screen()
    }

    fn logic(
        &mut self,
        term: &mut Terminal,
        rng: &mut StdRng,
        state: &mut SaverState,
    ) -> io::Result<()> {
        let (_, h) = term.size();

        if rng.gen_bool(self.spawn_chance) {
            self.spawn(rng);
        }

        self.draw(term, state.color_scheme);
        term.present()?;
        self.advance(h as i32);

        idle(term, state, Duration::from_millis(self.frame_delay_ms))?;
        Ok(())
    }
}
