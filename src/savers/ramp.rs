//! Color ramp: a gradient between two random colors swept across the screen

use super::{idle, SaverState, Screensaver};
use crate::settings::RampSettings;
use crate::terminal::{rgb, Cell, Terminal};
use rand::prelude::*;
use std::io;
use std::time::Duration;

type Rgb = (u8, u8, u8);

pub struct ColorRamp {
    step_delay_ms: u64,
    hold_delay_ms: u64,
}

impl ColorRamp {
    pub fn new(settings: &RampSettings) -> Self {
        Self {
            step_delay_ms: settings.step_delay_ms,
            hold_delay_ms: settings.hold_delay_ms,
        }
    }
}

#[inline]
fn lerp(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}

/// One color per column, `from` at the left edge and `to` at the right
fn ramp(from: Rgb, to: Rgb, width: usize) -> Vec<Rgb> {
    (0..width)
        .map(|x| {
            let t = if width > 1 { x as f64 / (width - 1) as f64 } else { 0.0 };
            (lerp(from.0, to.0, t), lerp(from.1, to.1, t), lerp(from.2, to.2, t))
        })
        .collect()
}

impl Screensaver for ColorRamp {
    fn name(&self) -> &'static str {
        "ramp"
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
        let (w, h) = term.size();
        let from: Rgb = rng.gen();
        let to: Rgb = rng.gen();
        tracing::debug!(?from, ?to, "new ramp");

        term.clear();
        for (x, (r, g, b)) in ramp(from, to, w as usize).into_iter().enumerate() {
            let cell = Cell {
                bg: Some(rgb(r, g, b)),
                ..Cell::default()
            };
            for y in 0..h {
                term.put(x as i32, y as i32, cell);
            }
            term.present()?;

            if idle(term, state, Duration::from_millis(self.step_delay_ms))?.is_some() {
                return Ok(());
            }
        }

        idle(term, state, Duration::from_millis(self.hold_delay_ms))?;
        Ok(())
    }
}
