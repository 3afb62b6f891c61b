use crate::config::Config;
use lexopt::{Arg, Parser, ValueExt};
use std::path::PathBuf;

pub(crate) const USAGE: &str = "\
Usage: gridsnake [<options>]

Play snake on a square grid in the terminal

Options:
  -c, --config <PATH>   Read configuration from the given file
      --board-size <N>  Length of each side of the board
      --tick-ms <N>     Milliseconds between steps of the snake
      --wraparound      Let the snake pass through the edges of the board
      --log-file <PATH> Write log messages to the given file
  -h, --help            Display this help message and exit
  -V, --version         Show the program version and exit
";

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Run(Arguments),
    Help,
    Version,
}

impl Command {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut args = Arguments::default();
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    args.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("board-size") => args.board_size = Some(parser.value()?.parse()?),
                Arg::Long("tick-ms") => args.tick_ms = Some(parser.value()?.parse()?),
                Arg::Long("wraparound") => args.wraparound = true,
                Arg::Long("log-file") => args.log_file = Some(PathBuf::from(parser.value()?)),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(args))
    }
}

/// Options given on the command line.  Everything but `config` overrides the
/// corresponding setting from the configuration file.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Arguments {
    pub(crate) config: Option<PathBuf>,
    pub(crate) board_size: Option<u16>,
    pub(crate) tick_ms: Option<u64>,
    pub(crate) wraparound: bool,
    pub(crate) log_file: Option<PathBuf>,
}

impl Arguments {
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(size) = self.board_size {
            config.board_size = size;
        }
        if let Some(ms) = self.tick_ms {
            config.tick_ms = ms;
        }
        if self.wraparound {
            config.wraparound = true;
        }
        if let Some(ref path) = self.log_file {
            config.log_file = Some(path.clone());
        }
    }
}
