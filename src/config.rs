use crate::consts;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Which levels to play
    #[serde(default)]
    pub(crate) levels: LevelsConfig,

    /// Where and how much to log
    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("levelsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// Relative paths in the file are resolved against the directory
    /// containing it.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        let mut config = toml::from_str::<Config>(&content)?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for p in &mut self.levels.files {
            *p = base.join(&*p);
        }
        if let Some(ref mut p) = self.logging.file {
            *p = base.join(&*p);
        }
    }
}

/// Settings governing how each level is played
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// Time between movements of the snake at the start of a level
    pub(crate) initial_delay: Duration,

    /// The time between movements never shrinks below this
    pub(crate) min_delay: Duration,

    /// Whether to stay on a level after the snake dies until the user presses
    /// a key, rather than moving straight to the next level
    pub(crate) pause_on_death: bool,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            initial_delay: consts::INITIAL_DELAY,
            min_delay: consts::MIN_DELAY,
            pause_on_death: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    initial_delay_ms: u64,
    min_delay_ms: u64,
    pause_on_death: bool,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        let defaults = GameConfig::default();
        RawGameConfig {
            initial_delay_ms: u64::try_from(defaults.initial_delay.as_millis()).unwrap_or(u64::MAX),
            min_delay_ms: u64::try_from(defaults.min_delay.as_millis()).unwrap_or(u64::MAX),
            pause_on_death: defaults.pause_on_death,
        }
    }
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameConfigError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, GameConfigError> {
        if value.initial_delay_ms == 0 || value.min_delay_ms == 0 {
            return Err(GameConfigError::ZeroDelay);
        }
        if value.min_delay_ms > value.initial_delay_ms {
            return Err(GameConfigError::FloorAboveInitial {
                min: value.min_delay_ms,
                initial: value.initial_delay_ms,
            });
        }
        Ok(GameConfig {
            initial_delay: Duration::from_millis(value.initial_delay_ms),
            min_delay: Duration::from_millis(value.min_delay_ms),
            pause_on_death: value.pause_on_death,
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GameConfigError {
    #[error("tick delays must be greater than zero")]
    ZeroDelay,
    #[error("min-delay-ms ({min}) is greater than initial-delay-ms ({initial})")]
    FloorAboveInitial { min: u64, initial: u64 },
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LevelsConfig {
    /// Level map files to play in order; if empty, the built-in levels are
    /// used
    pub(crate) files: Vec<PathBuf>,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    /// File to write log messages to.  If not set, nothing is logged.
    pub(crate) file: Option<PathBuf>,

    /// Maximum level of messages to log
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.game.initial_delay, Duration::from_millis(220));
        assert_eq!(config.game.min_delay, Duration::from_millis(30));
        assert!(config.game.pause_on_death);
        assert!(config.levels.files.is_empty());
        assert_eq!(config.logging.file, None);
        assert_eq!(config.logging.level, LevelFilter::Info);
    }

    #[test]
    fn full() {
        let config = toml::from_str::<Config>(concat!(
            "[game]\n",
            "initial-delay-ms = 300\n",
            "min-delay-ms = 50\n",
            "pause-on-death = false\n",
            "\n",
            "[levels]\n",
            "files = [\"maps/a.txt\", \"maps/b.txt\"]\n",
            "\n",
            "[logging]\n",
            "file = \"snake.log\"\n",
            "level = \"debug\"\n",
        ))
        .unwrap();
        assert_eq!(
            config,
            Config {
                game: GameConfig {
                    initial_delay: Duration::from_millis(300),
                    min_delay: Duration::from_millis(50),
                    pause_on_death: false,
                },
                levels: LevelsConfig {
                    files: vec![PathBuf::from("maps/a.txt"), PathBuf::from("maps/b.txt")],
                },
                logging: LogConfig {
                    file: Some(PathBuf::from("snake.log")),
                    level: LevelFilter::Debug,
                },
            }
        );
    }

    #[test]
    fn partial_game() {
        let config = toml::from_str::<Config>("[game]\ninitial-delay-ms = 500\n").unwrap();
        assert_eq!(config.game.initial_delay, Duration::from_millis(500));
        assert_eq!(config.game.min_delay, Duration::from_millis(30));
        assert!(config.game.pause_on_death);
    }

    #[test]
    fn zero_delay() {
        let r = toml::from_str::<Config>("[game]\nmin-delay-ms = 0\n");
        assert!(r.is_err());
    }

    #[test]
    fn floor_above_initial() {
        let r = toml::from_str::<Config>("[game]\ninitial-delay-ms = 20\nmin-delay-ms = 30\n");
        assert!(r.is_err());
        assert_eq!(
            GameConfig::try_from(RawGameConfig {
                initial_delay_ms: 20,
                min_delay_ms: 30,
                pause_on_death: true,
            }),
            Err(GameConfigError::FloorAboveInitial {
                min: 30,
                initial: 20
            })
        );
    }

    #[test]
    fn load_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_resolves_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(
            &path,
            "[levels]\nfiles = [\"one.txt\", \"/abs/two.txt\"]\n[logging]\nfile = \"log.txt\"\n",
        )
        .unwrap();
        let config = Config::load(&path, false).unwrap();
        assert_eq!(
            config.levels.files,
            [dir.path().join("one.txt"), PathBuf::from("/abs/two.txt")]
        );
        assert_eq!(config.logging.file, Some(dir.path().join("log.txt")));
    }

    #[test]
    fn load_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs_err::write(&path, "[game]\ninitial-delay-ms = \"fast\"\n").unwrap();
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Parse(_))
        ));
    }
}
