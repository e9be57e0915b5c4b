//! Screensaver modules
//!
//! Each screensaver implements [`Screensaver`]; the host drives the lifecycle.

pub mod bouncer;
pub mod falling;
pub mod mazer;
pub mod ramp;

use crate::config::SaverKind;
use crate::help::show_help_modal;
use crate::settings::Settings;
use crate::terminal::{Interrupt, Terminal};
use crossterm::event::{KeyCode, KeyModifiers};
use crossterm::style::Color;
use rand::rngs::StdRng;
use std::io;
use std::time::{Duration, Instant};

const HELP: &str = "\
VTSAVER
─────────────────
q/Esc  Quit
Space  Pause
1-9,0  Speed (1 fastest)
!-)    Color scheme
?      Close help";

/// How often a paused screensaver looks for input
const PAUSE_SLICE: Duration = Duration::from_millis(100);

/// Lifecycle the host calls into.
///
/// `preparation` runs on activation and again after every resize, `logic`
/// runs repeatedly until the user quits, `outro` runs once on the way out.
/// Long-running `logic` implementations wait through [`idle`] so controls
/// keep working, and return early on a resize or quit.
pub trait Screensaver {
    fn name(&self) -> &'static str;

    fn preparation(&mut self, term: &mut Terminal, rng: &mut StdRng) -> io::Result<()>;

    fn logic(
        &mut self,
        term: &mut Terminal,
        rng: &mut StdRng,
        state: &mut SaverState,
    ) -> io::Result<()>;

    fn outro(&mut self, _term: &mut Terminal) -> io::Result<()> {
        Ok(())
    }
}

/// Build the screensaver for `kind` from its settings section
pub fn create(kind: SaverKind, settings: &Settings) -> Box<dyn Screensaver> {
    match kind {
        SaverKind::Mazer => Box::new(mazer::Mazer::new(&settings.mazer)),
        SaverKind::Ramp => Box::new(ramp::ColorRamp::new(&settings.ramp)),
        SaverKind::Bouncer => Box::new(bouncer::Bouncer::new(&settings.bouncer)),
        SaverKind::Falling => Box::new(falling::FallingText::new(&settings.falling)),
    }
}

/// Runtime state for interactive controls (shared by all screensavers)
pub struct SaverState {
    pub speed: f32,        // Multiplier applied to every configured delay
    pub color_scheme: u8,  // Current color scheme (0-9)
    pub paused: bool,
}

impl SaverState {
    pub fn new() -> Self {
        Self {
            speed: 1.0,
            color_scheme: 0,
            paused: false,
        }
    }

    /// Scale a configured delay by the current speed
    pub fn scale(&self, delay: Duration) -> Duration {
        Duration::from_millis((delay.as_millis() as f64 * f64::from(self.speed)).round() as u64)
    }

    /// Handle keypress, returns true if should quit
    pub fn handle_key(&mut self, code: KeyCode, _modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char(' ') => self.paused = !self.paused,
            // Number keys: change speed (1=fastest, 9=slowest, 0=very slow)
            KeyCode::Char(c) if c.is_ascii_digit() => {
                self.speed = match c {
                    '0' => 8.0,
                    '1' => 0.1,
                    '2' => 0.25,
                    '3' => 0.5,
                    '4' => 0.75,
                    '5' => 1.0,
                    '6' => 1.5,
                    '7' => 2.0,
                    '8' => 3.0,
                    _ => 4.0,
                };
            }
            KeyCode::Char(c) => {
                if let Some(scheme) = SCHEME_KEYS.iter().position(|&k| k == c) {
                    self.color_scheme = scheme as u8;
                }
            }
            _ => {}
        }
        false
    }
}

/// Apply every queued key: `?` opens help, the rest go to
/// [`SaverState::handle_key`]. Returns true (and latches quit) when asked to quit.
pub fn answer_keys(term: &mut Terminal, state: &mut SaverState) -> io::Result<bool> {
    while let Some((code, mods)) = term.check_key()? {
        let quit = if code == KeyCode::Char('?') {
            show_help_modal(term, HELP)?
        } else {
            state.handle_key(code, mods)
        };
        if quit {
            term.request_quit();
            return Ok(true);
        }
    }
    Ok(false)
}

/// Answer queued keys, then hold here for as long as the user keeps the
/// screensaver paused. Returns the resize or quit that ended the hold, if any.
pub fn respond(term: &mut Terminal, state: &mut SaverState) -> io::Result<Option<Interrupt>> {
    if answer_keys(term, state)? {
        return Ok(Some(Interrupt::Quit));
    }
    while state.paused {
        match term.nap(PAUSE_SLICE)? {
            Some(Interrupt::Input) => {
                if answer_keys(term, state)? {
                    return Ok(Some(Interrupt::Quit));
                }
            }
            Some(interrupt) => return Ok(Some(interrupt)),
            None => {}
        }
    }
    Ok(None)
}

/// Wait out `delay` (scaled by the current speed) while keeping the controls
/// live. Time spent paused does not count against the delay.
pub fn idle(
    term: &mut Terminal,
    state: &mut SaverState,
    delay: Duration,
) -> io::Result<Option<Interrupt>> {
    let mut remaining = state.scale(delay);
    loop {
        let started = Instant::now();
        match term.nap(remaining)? {
            None => return Ok(None),
            Some(Interrupt::Input) => {
                remaining = remaining.saturating_sub(started.elapsed());
                if let Some(interrupt) = respond(term, state)? {
                    return Ok(Some(interrupt));
                }
            }
            Some(interrupt) => return Ok(Some(interrupt)),
        }
    }
}

/// Dim-to-bright ramp per color scheme, indexed by intensity
const SCHEMES: [[Color; 4]; 10] = [
    [Color::DarkGreen, Color::Green, Color::Green, Color::White],
    [Color::DarkRed, Color::Red, Color::DarkYellow, Color::Yellow],       // fire
    [Color::DarkBlue, Color::Blue, Color::DarkCyan, Color::Cyan],         // ice
    [Color::DarkMagenta, Color::Magenta, Color::Red, Color::White],       // pink
    [Color::DarkYellow, Color::Yellow, Color::White, Color::White],       // gold
    [Color::DarkCyan, Color::Cyan, Color::White, Color::White],           // electric
    [Color::DarkRed, Color::Red, Color::Magenta, Color::White],           // lava
    [Color::DarkGrey, Color::Grey, Color::White, Color::White],           // mono
    [Color::Red, Color::Yellow, Color::Green, Color::Cyan],               // rainbow
    [Color::DarkBlue, Color::Blue, Color::Magenta, Color::White],         // neon
];

/// Shift+digit symbols in scheme order (Shift+0 is the default)
const SCHEME_KEYS: [char; 10] = [')', '!', '@', '#', '$', '%', '^', '&', '*', '('];

/// Color for `intensity` (0 dimmest, 3 brightest) in `scheme`. The brightest
/// level is always bold, the two dimmest never.
pub fn scheme_color(scheme: u8, intensity: u8, bold: bool) -> (Color, bool) {
    let palette = SCHEMES.get(scheme as usize).unwrap_or(&SCHEMES[0]);
    let level = intensity.min(3);
    let bold = match level {
        0 | 1 => false,
        2 => bold,
        _ => true,
    };
    (palette[level as usize], bold)
}
