mod app;
mod artwork;
mod audio;
mod command;
mod config;
mod consts;
mod game;
mod input;
mod menu;
mod options;
mod tracks;
mod util;
mod warning;
use crate::app::{App, Globals};
use crate::config::Config;
use crate::tracks::{Period, TrackFile, TrackProvider};
use anyhow::Context;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
};
use lexopt::{Arg, Parser, ValueExt};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const USAGE: &str = "\
Usage: musicsnake [<options>]

Options:
  --config <FILE>     Read configuration from <FILE>
  --tracks <FILE>     Read tracks from <FILE>
  --log-file <FILE>   Write log messages to <FILE>
  --period <PERIOD>   Draw tracks from <PERIOD> (7day, 1month, 3month,
                      6month, 12month, or overall)
  -h, --help          Show this help message and exit
  -V, --version       Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Long("config") => args.config = Some(PathBuf::from(parser.value()?)),
                Arg::Long("tracks") => args.tracks_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Long("period") => args.period = Some(parser.value()?.parse()?),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

/// Command-line settings, each overriding its counterpart in the
/// configuration file
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    tracks_file: Option<PathBuf>,
    log_file: Option<PathBuf>,
    period: Option<Period>,
}

impl Arguments {
    fn load_config(&self) -> anyhow::Result<Config> {
        let (path, allow_missing) = match self.config {
            Some(ref p) => (p.clone(), false),
            None => (Config::default_path()?, true),
        };
        let mut config = Config::load(&path, allow_missing)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
        if let Some(ref p) = self.tracks_file {
            config.files.tracks_file = Some(p.clone());
        }
        if let Some(ref p) = self.log_file {
            config.files.log_file = Some(p.clone());
        }
        if let Some(period) = self.period {
            config.options.period = period;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env()) {
        Ok(Command::Run(args)) => match run(&args) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("musicsnake: {e:?}");
                ExitCode::from(2)
            }
        },
        Ok(Command::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Command::Version) => {
            println!("musicsnake {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("musicsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

fn run(args: &Arguments) -> anyhow::Result<()> {
    let config = args.load_config()?;
    if let Some(ref path) = config.files.log_file {
        init_logging(path)?;
    }
    let tracks = TrackFile::new(config.tracks_file()?);
    info!(
        tracks_file = %tracks.path().display(),
        period = %config.options.period,
        "Starting musicsnake"
    );
    let provider: Rc<dyn TrackProvider> = Rc::new(tracks);
    let globals = Globals::new(Rc::new(config), provider);
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture)
        .and_then(|()| App::new(globals).run(terminal));
    // Restore the terminal even if the game failed
    let _ = execute!(io::stdout(), DisableMouseCapture);
    ratatui::restore();
    io_exit(r)
}

fn io_exit(r: io::Result<()>) -> anyhow::Result<()> {
    match r {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        r => r.context("terminal I/O failed"),
    }
}

/// Send log messages at or above the level selected by `RUST_LOG` (default:
/// `info` for this program) to `path`.  The terminal belongs to the game, so
/// nothing is logged when no log file is configured.
fn init_logging(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("musicsnake=info")),
        )
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::ffi::OsString;

    fn parse(args: &[&str]) -> Result<Command, lexopt::Error> {
        Command::from_parser(Parser::from_iter(
            std::iter::once("musicsnake")
                .chain(args.iter().copied())
                .map(OsString::from),
        ))
    }

    #[test]
    fn no_args() {
        assert_eq!(parse(&[]).unwrap(), Command::Run(Arguments::default()));
    }

    #[test]
    fn all_args() {
        assert_eq!(
            parse(&[
                "--config",
                "snake.toml",
                "--tracks=tops.json",
                "--log-file",
                "snake.log",
                "--period",
                "3month",
            ])
            .unwrap(),
            Command::Run(Arguments {
                config: Some(PathBuf::from("snake.toml")),
                tracks_file: Some(PathBuf::from("tops.json")),
                log_file: Some(PathBuf::from("snake.log")),
                period: Some(Period::Quarter),
            })
        );
    }

    #[test]
    fn help_wins() {
        assert_eq!(parse(&["--period", "7day", "-h"]).unwrap(), Command::Help);
        assert_eq!(parse(&["--version"]).unwrap(), Command::Version);
    }

    #[test]
    fn bad_args() {
        assert!(parse(&["--period", "fortnight"]).is_err());
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["stray"]).is_err());
    }

    #[test]
    fn arguments_override_config() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfgpath = tmpdir.path().join("config.toml");
        fs_err::write(
            &cfgpath,
            "[options]\nperiod = \"overall\"\nbounce = false\n\n[files]\ntracks-file = \"a.json\"\n",
        )
        .unwrap();
        let args = Arguments {
            config: Some(cfgpath),
            tracks_file: Some(PathBuf::from("b.json")),
            log_file: None,
            period: Some(Period::Week),
        };
        let config = args.load_config().unwrap();
        assert_eq!(config.files.tracks_file, Some(PathBuf::from("b.json")));
        assert_eq!(config.options.period, Period::Week);
        assert!(!config.options.bounce);
    }

    #[test]
    fn missing_explicit_config() {
        let tmpdir = tempfile::tempdir().unwrap();
        let args = Arguments {
            config: Some(tmpdir.path().join("nope.toml")),
            ..Arguments::default()
        };
        assert!(args.load_config().is_err());
    }
}
