use crate::consts;
use crate::engine::{EngineConfig, EngineError, Heading};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Length of each side of the board
    pub(crate) board_size: u16,

    /// Milliseconds between steps of the snake
    pub(crate) tick_ms: u64,

    /// Whether the snake wraps around the edges of the board
    pub(crate) wraparound: bool,

    /// File to write log messages to.  If not set, nothing is logged.
    pub(crate) log_file: Option<PathBuf>,

    /// Extra keys for steering the snake, mapped to the heading each one
    /// requests
    pub(crate) keys: BTreeMap<char, Heading>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            board_size: consts::DEFAULT_BOARD_SIZE,
            tick_ms: consts::DEFAULT_TICK_MS,
            wraparound: false,
            log_file: None,
            keys: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
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
        toml::from_str(&content).map_err(Into::into)
    }

    /// Check that the configuration describes a playable game.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the board size is out of range or the tick interval
    /// is zero.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.engine_config().validate()?;
        Ok(())
    }

    pub(crate) fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            board_size: self.board_size,
            wraparound: self.wraparound,
        }
    }

    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
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
    #[error("tick-ms must be at least 1")]
    ZeroTick,
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(src: &str) -> NamedTempFile {
        let mut tmpfile = NamedTempFile::new().unwrap();
        tmpfile.write_all(src.as_bytes()).unwrap();
        tmpfile.flush().unwrap();
        tmpfile
    }

    #[test]
    fn default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.board_size, 10);
        assert_eq!(cfg.tick_period(), Duration::from_millis(100));
        assert!(!cfg.wraparound);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.engine_config(), EngineConfig::default());
    }

    #[test]
    fn empty_file() {
        let tmpfile = write_config("");
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn full_file() {
        let tmpfile = write_config(concat!(
            "board-size = 15\n",
            "tick-ms = 250\n",
            "wraparound = true\n",
            "log-file = \"/tmp/gridsnake.log\"\n",
            "\n",
            "[keys]\n",
            "i = \"up\"\n",
            "m = \"Down\"\n",
        ));
        let cfg = Config::load(tmpfile.path(), false).unwrap();
        pretty_assertions::assert_eq!(
            cfg,
            Config {
                board_size: 15,
                tick_ms: 250,
                wraparound: true,
                log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
                keys: BTreeMap::from([('i', Heading::Up), ('m', Heading::Down)]),
            }
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&tmpdir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn missing_not_allowed() {
        let tmpdir = tempfile::tempdir().unwrap();
        let r = Config::load(&tmpdir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn illegal_heading() {
        let tmpfile = write_config("[keys]\ni = \"north\"\n");
        let r = Config::load(tmpfile.path(), false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn multichar_key() {
        let tmpfile = write_config("[keys]\nup = \"up\"\n");
        let r = Config::load(tmpfile.path(), false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn board_too_small() {
        let cfg = Config {
            board_size: 3,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Engine(EngineError::InvalidConfiguration(_)))
        ));
    }

    #[test]
    fn board_too_large() {
        let cfg = Config {
            board_size: consts::MAX_BOARD_SIZE + 1,
            ..Config::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_tick() {
        let cfg = Config {
            tick_ms: 0,
            ..Config::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::ZeroTick)));
    }
}
