use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A position on the board, addressed by row and column.
///
/// Coordinates are signed so that a proposed head position one step off the
/// board can still be represented; whether it lies on the board is up to
/// [`Grid::in_bounds()`][super::grid::Grid::in_bounds].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) row: i32,
    pub(crate) col: i32,
}

impl Cell {
    pub(crate) const fn new(row: i32, col: i32) -> Cell {
        Cell { row, col }
    }

    /// Return the cell one step away in direction `heading`.  No bounds
    /// checking is done.
    pub(crate) fn step(self, heading: Heading) -> Cell {
        let (drow, dcol) = heading.delta();
        Cell {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq)]
#[serde(try_from = "String")]
pub(crate) enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Unit `(row, column)` offset applied to the head each tick
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (-1, 0),
            Heading::Down => (1, 0),
            Heading::Left => (0, -1),
            Heading::Right => (0, 1),
        }
    }

    pub(crate) fn opposite(self) -> Heading {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Heading::Up => "up",
            Heading::Down => "down",
            Heading::Left => "left",
            Heading::Right => "right",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Heading {
    type Err = IllegalHeading;

    fn from_str(s: &str) -> Result<Heading, IllegalHeading> {
        [Heading::Up, Heading::Down, Heading::Left, Heading::Right]
            .into_iter()
            .find(|h| h.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| IllegalHeading(s.to_owned()))
    }
}

impl TryFrom<String> for Heading {
    type Error = IllegalHeading;

    fn try_from(s: String) -> Result<Heading, IllegalHeading> {
        s.parse()
    }
}

/// Error returned when a value does not name one of the four headings
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid heading {0:?}; expected one of \"up\", \"down\", \"left\", \"right\"")]
pub(crate) struct IllegalHeading(pub(crate) String);
