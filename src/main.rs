mod config;
mod help;
mod host;
mod maze;
mod savers;
mod settings;
mod terminal;

use clap::{Parser, Subcommand};
use config::{HostConfig, SaverKind};
use maze::{Generation, Grid, MazeBuilder, MazeCanvas, ShuffleStrategy};
use rand::prelude::*;
use settings::Settings;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vtsaver")]
#[command(author = "Terminal Art Generator")]
#[command(version)]
#[command(
    about = "Terminal screensavers: mazes, color ramps, bouncing and falling text",
    long_about = None
)]
struct Cli {
    /// Write diagnostics to this file (the screen belongs to the screensaver)
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Log debug detail instead of info
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Settings file (defaults to <config dir>/vtsaver/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a screensaver until q/Esc
    Run {
        /// Which screensaver to run
        #[arg(value_enum, default_value = "mazer")]
        saver: SaverKind,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List available screensavers
    List,

    /// Print one finished maze to stdout (no animation)
    Maze {
        /// Maze width in cells
        #[arg(short = 'W', long, default_value = "20", value_parser = maze_side())]
        width: u16,

        /// Maze height in cells
        #[arg(short = 'H', long, default_value = "10", value_parser = maze_side())]
        height: u16,

        /// Random seed for reproducibility
        #[arg(short, long)]
        seed: Option<u64>,

        /// Edge shuffle strategy (defaults to the settings file)
        #[arg(long, value_enum)]
        shuffle: Option<ShuffleStrategy>,
    },
}

/// Print mode accepts 1..=1000 cells per side
fn maze_side() -> clap::builder::RangedI64ValueParser<u16> {
    clap::value_parser!(u16).range(1..=1000)
}

fn init_logging(path: &Path, verbose: bool) -> io::Result<()> {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let file = File::create(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    tracing::info!("vtsaver {} starting", env!("CARGO_PKG_VERSION"));
    Ok(())
}

/// Canvas for print mode: nothing to animate, never interrupted
struct Silent;

impl MazeCanvas for Silent {
    fn cancelled(&mut self) -> bool {
        false
    }

    fn draw(&mut self, _grid: &Grid) -> io::Result<()> {
        Ok(())
    }
}

fn print_maze(
    width: usize,
    height: usize,
    seed: Option<u64>,
    shuffle: ShuffleStrategy,
) -> io::Result<()> {
    let mut rng = StdRng::seed_from_u64(host::resolve_seed(seed));
    let builder = MazeBuilder::new(width, height).shuffle(shuffle);

    if let Generation::Complete(grid) = builder.generate(&mut rng, &mut Silent)? {
        for line in maze::render::render_lines(&grid) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log {
        init_logging(path, cli.verbose)?;
    }

    let settings = Settings::load(cli.config.as_deref());

    match cli.command {
        Commands::Run { saver, seed } => {
            let config = HostConfig { saver, seed };
            host::run(&config, &settings)?;
        }
        Commands::List => {
            for kind in SaverKind::ALL {
                println!("{:<10}{}", kind.name(), kind.description());
            }
        }
        Commands::Maze {
            width,
            height,
            seed,
            shuffle,
        } => {
            let shuffle = shuffle.unwrap_or(settings.mazer.shuffle);
            print_maze(usize::from(width), usize::from(height), seed, shuffle)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maze_size_defaults() {
        let cli = Cli::try_parse_from(["vtsaver", "maze"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Maze {
                width: 20,
                height: 10,
                ..
            }
        ));
    }

    #[test]
    fn maze_size_is_bounded() {
        for args in [
            ["vtsaver", "maze", "--width", "1001"],
            ["vtsaver", "maze", "--width", "0"],
            ["vtsaver", "maze", "--height", "99999999999999999999"],
        ] {
            assert!(Cli::try_parse_from(args).is_err(), "{args:?} should be rejected");
        }

        let cli = Cli::try_parse_from(["vtsaver", "maze", "-W", "1000", "-H", "1000"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Maze {
                width: 1000,
                height: 1000,
                ..
            }
        ));
    }
}
