//! Screensaver host: owns the terminal and drives a screensaver's lifecycle

use crate::config::HostConfig;
use crate::savers::{self, SaverState, Screensaver};
use crate::settings::Settings;
use crate::terminal::{Interrupt, Terminal};
use rand::prelude::*;
use std::io;

/// Seed from the config, or from the clock when none was given
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0) // Fallback seed for misconfigured system clocks
    })
}

/// Run the configured screensaver until the user quits
pub fn run(config: &HostConfig, settings: &Settings) -> io::Result<()> {
    let seed = resolve_seed(config.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut saver = savers::create(config.saver, settings);

    tracing::info!(saver = saver.name(), seed, "starting screensaver");

    let mut term = Terminal::new(true)?;
    let result = drive(saver.as_mut(), &mut term, &mut rng);

    // Always give the screensaver its outro, but report the first failure
    let outro = saver.outro(&mut term);
    tracing::info!(saver = saver.name(), "screensaver stopped");
    result.and(outro)
}

fn drive(saver: &mut dyn Screensaver, term: &mut Terminal, rng: &mut StdRng) -> io::Result<()> {
    let mut state = SaverState::new();
    saver.preparation(term, rng)?;

    loop {
        if term.quit_requested() {
            break;
        }

        if term.was_resized() {
            let (w, h) = crossterm::terminal::size()?;
            tracing::debug!(w, h, "terminal resized");
            term.resize(w, h);
            term.clear_screen()?;
            saver.preparation(term, rng)?;
        }

        // Keys that arrived between steps; a pause holds here
        match savers::respond(term, &mut state)? {
            Some(Interrupt::Quit) => break,
            Some(_) => continue,
            None => {}
        }

        saver.logic(term, rng, &mut state)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::resolve_seed;

    #[test]
    fn explicit_seed_wins() {
        assert_eq!(resolve_seed(Some(42)), 42);
    }

    #[test]
    fn clock_seed_is_used_otherwise() {
        assert!(resolve_seed(None) > 0);
    }
}
