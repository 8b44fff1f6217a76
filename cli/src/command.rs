use std::str::FromStr;

use sweeper_core::Coord;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord, Coord),
    Restart,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command, expected `x y`, `n` or `q`")]
    Empty,
    #[error("Invalid coordinate `{0}`")]
    InvalidCoord(String),
    #[error("Unknown command `{0}`, expected `x y`, `n` or `q`")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            [] => Err(CommandError::Empty),
            ["n" | "new"] => Ok(Self::Restart),
            ["q" | "quit"] => Ok(Self::Quit),
            [x, y] => Ok(Self::Reveal(parse_coord(x)?, parse_coord(y)?)),
            _ => Err(CommandError::Unknown(line.trim().to_owned())),
        }
    }
}

fn parse_coord(word: &str) -> Result<Coord, CommandError> {
    word.parse()
        .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
}
