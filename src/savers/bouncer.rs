//! Bouncing label: text drifting diagonally and changing color on every bounce

use super::{idle, scheme_color, SaverState, Screensaver};
use crate::settings::BouncerSettings;
use crate::terminal::Terminal;
use crossterm::style::Color;
use rand::prelude::*;
use std::io;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

impl Horizontal {
    fn delta(self) -> i32 {
        match self {
            Horizontal::Left => -1,
            Horizontal::Right => 1,
        }
    }

    fn flip(self) -> Self {
        match self {
            Horizontal::Left => Horizontal::Right,
            Horizontal::Right => Horizontal::Left,
        }
    }
}

impl Vertical {
    fn delta(self) -> i32 {
        match self {
            Vertical::Up => -1,
            Vertical::Down => 1,
        }
    }

    fn flip(self) -> Self {
        match self {
            Vertical::Up => Vertical::Down,
            Vertical::Down => Vertical::Up,
        }
    }
}

/// Move `pos` by `delta` within `0..=max`. Returns true when it hit an edge
/// and reflected instead.
fn advance(pos: &mut i32, delta: i32, max: i32) -> bool {
    if max <= 0 {
        *pos = 0;
        return false;
    }
    let next = *pos + delta;
    if (0..=max).contains(&next) {
        *pos = next;
        false
    } else {
        *pos = (*pos - delta).clamp(0, max);
        true
    }
}

pub struct Bouncer {
    text: String,
    frame_delay_ms: u64,
    x: i32,
    y: i32,
    horizontal: Horizontal,
    vertical: Vertical,
    color: Option<Color>,
}

impl Bouncer {
    pub fn new(settings: &BouncerSettings) -> Self {
        Self {
            text: settings.text.clone(),
            frame_delay_ms: settings.frame_delay_ms,
            x: 0,
            y: 0,
            horizontal: Horizontal::Right,
            vertical: Vertical::Down,
            color: None,
        }
    }

    fn text_width(&self) -> i32 {
        self.text.chars().count() as i32
    }

    /// Advance one frame inside a `w x h` window; true if anything bounced
    fn step(&mut self, w: i32, h: i32) -> bool {
        let max_x = w - self.text_width();
        let max_y = h - 1;
        let mut bounced = false;

        if advance(&mut self.x, self.horizontal.delta(), max_x) {
            self.horizontal = self.horizontal.flip();
            bounced = true;
        }
        if advance(&mut self.y, self.vertical.delta(), max_y) {
            self.vertical = self.vertical.flip();
            bounced = true;
        }
        bounced
    }
}

fn random_color(rng: &mut StdRng, scheme: u8) -> Color {
    scheme_color(scheme, rng.gen_range(1..4), false).0
}

impl Screensaver for Bouncer {
    fn name(&self) -> &'static str {
        "bouncer"
    }

    fn preparation(&mut self, term: &mut Terminal, rng: &mut StdRng) -> io::Result<()> {
        let (w, h) = term.size();
        let max_x = (w as i32 - self.text_width()).max(0);
        let max_y = (h as i32 - 1).max(0);
        self.x = rng.gen_range(0..=max_x);
        self.y = rng.gen_range(0..=max_y);
        self.horizontal = if rng.gen_bool(0.5) { Horizontal::Left } else { Horizontal::Right };
        self.vertical = if rng.gen_bool(0.5) { Vertical::Up } else { Vertical::Down };
        self.color = None;

        term.clear();
        term.clear_screen()
    }

    fn logic(
        &mut self,
        term: &mut Terminal,
        rng: &mut StdRng,
        state: &mut SaverState,
    ) -> io::Result<()> {
        let (w, h) = term.size();

        if self.step(w as i32, h as i32) || self.color.is_none() {
            self.color = Some(random_color(rng, state.color_scheme));
        }

        term.clear();
        term.set_str(self.x, self.y, &self.text, self.color, true);
        term.present()?;

        idle(term, state, Duration::from_millis(self.frame_delay_ms))?;
        Ok(())
    }
}
