mod app;
mod command;
mod config;
mod consts;
mod game;
mod util;
mod warning;
use crate::app::App;
use crate::config::{Config, GameConfig};
use crate::game::LevelSet;
use anyhow::Context;
use lexopt::{Arg, Parser};
use log::info;
use simplelog::WriteLogger;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
Usage: levelsnake [-c|--config <FILE>] [--no-config] [-l|--log-file <FILE>] [<LEVEL-FILE> ...]

Play Snake through a series of levels read from text files.  If no level
files are given on the command line or in the configuration file, the
built-in levels are played.  Level maps may be at most 78 cells wide and 19
cells tall.

Options:
  -c, --config <FILE>    Read configuration from the given file
      --no-config        Do not read any configuration file
  -l, --log-file <FILE>  Append log messages to the given file
  -h, --help             Show this help message and exit
  -V, --version          Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
enum Invocation {
    Run(Arguments),
    Help,
    Version,
}

impl Invocation {
    fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("no-config") => args.no_config = true,
                Arg::Short('l') | Arg::Long("log-file") => {
                    args.log_file = Some(PathBuf::from(parser.value()?));
                }
                Arg::Value(value) => args.level_files.push(PathBuf::from(value)),
                _ => return Err(arg.unexpected()),
            }
        }
        if args.no_config && args.config.is_some() {
            return Err(lexopt::Error::from(
                "--config and --no-config are mutually exclusive",
            ));
        }
        Ok(Invocation::Run(args))
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct Arguments {
    config: Option<PathBuf>,
    no_config: bool,
    log_file: Option<PathBuf>,
    level_files: Vec<PathBuf>,
}

impl Arguments {
    fn run(self) -> ExitCode {
        let (levels, settings) = match self.prepare() {
            Ok(r) => r,
            Err(e) => {
                eprintln!("levelsnake: {e:?}");
                return ExitCode::FAILURE;
            }
        };
        let terminal = ratatui::init();
        let r = App::new(levels, settings).run(terminal);
        ratatui::restore();
        io_exit(r)
    }

    /// Load the configuration, set up logging, and work out which levels to
    /// play
    fn prepare(self) -> anyhow::Result<(LevelSet, GameConfig)> {
        let config = self.load_config()?;
        if let Some(path) = self.log_file.or(config.logging.file) {
            let file = fs_err::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .context("failed to open log file")?;
            WriteLogger::init(config.logging.level, simplelog::Config::default(), file)
                .context("failed to initialize logging")?;
        }
        info!("Starting levelsnake {}", env!("CARGO_PKG_VERSION"));
        let files = if self.level_files.is_empty() {
            config.levels.files
        } else {
            self.level_files
        };
        let levels = LevelSet::from_paths(files);
        info!("Playing {} level(s)", levels.len());
        Ok((levels, config.game))
    }

    fn load_config(&self) -> anyhow::Result<Config> {
        if self.no_config {
            Ok(Config::default())
        } else if let Some(ref path) = self.config {
            Config::load(path, false)
                .with_context(|| format!("failed to load configuration from {}", path.display()))
        } else {
            let path = Config::default_path()?;
            Config::load(&path, true)
                .with_context(|| format!("failed to load configuration from {}", path.display()))
        }
    }
}

fn main() -> ExitCode {
    match Invocation::from_parser(Parser::from_env()) {
        Ok(Invocation::Run(args)) => args.run(),
        Ok(Invocation::Help) => {
            print!("{USAGE}");
            ExitCode::SUCCESS
        }
        Ok(Invocation::Version) => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("levelsnake: {e}");
            eprintln!("Run `levelsnake --help` for usage.");
            ExitCode::from(2)
        }
    }
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("levelsnake: {e}");
            ExitCode::from(2)
        }
    }
}
