use clap::ValueEnum;

/// Screensavers available to the host
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SaverKind {
    Mazer,    // Animated Kruskal maze
    Ramp,     // Color gradient sweeps
    Bouncer,  // Text bouncing off the edges
    Falling,  // Lines of glyphs falling down free columns
}

impl SaverKind {
    pub const ALL: [SaverKind; 4] = [
        SaverKind::Mazer,
        SaverKind::Ramp,
        SaverKind::Bouncer,
        SaverKind::Falling,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SaverKind::Mazer => "mazer",
            SaverKind::Ramp => "ramp",
            SaverKind::Bouncer => "bouncer",
            SaverKind::Falling => "falling",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SaverKind::Mazer => "Builds random mazes wall by wall",
            SaverKind::Ramp => "Sweeps gradients between random colors",
            SaverKind::Bouncer => "Bounces a label around the screen",
            SaverKind::Falling => "Drops lines of random glyphs",
        }
    }
}

/// Configuration for one host session
#[derive(Clone)]
pub struct HostConfig {
    pub saver: SaverKind,
    pub seed: Option<u64>,
}
