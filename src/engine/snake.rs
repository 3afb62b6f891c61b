use super::cell::{Cell, Heading};
use super::EngineError;
use std::collections::VecDeque;

/// The snake: the cells it occupies and the way it is facing.
///
/// The body is stored tail-first: the front of the deque is the tail and the
/// back is the head.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    body: VecDeque<Cell>,

    /// The direction in which the snake is currently moving
    heading: Heading,
}

impl Snake {
    /// Create a snake occupying `cells` (tail first) and moving in
    /// `heading`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `cells` is empty or is not a straight run of adjacent
    /// cells leading in the direction of `heading`.
    pub(crate) fn new<I>(cells: I, heading: Heading) -> Result<Snake, EngineError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let body = cells.into_iter().collect::<VecDeque<_>>();
        if body.is_empty() {
            return Err(EngineError::InvalidConfiguration(String::from(
                "initial snake must have at least one cell",
            )));
        }
        if body
            .iter()
            .zip(body.iter().skip(1))
            .any(|(&a, &b)| a.step(heading) != b)
        {
            return Err(EngineError::InvalidConfiguration(format!(
                "initial snake must be a straight line of cells heading {heading}"
            )));
        }
        Ok(Snake { body, heading })
    }

    pub(crate) fn head(&self) -> Cell {
        *self
            .body
            .back()
            .expect("snake body should always contain at least one cell")
    }

    pub(crate) fn tail(&self) -> Cell {
        *self
            .body
            .front()
            .expect("snake body should always contain at least one cell")
    }

    pub(crate) fn heading(&self) -> Heading {
        self.heading
    }

    pub(crate) fn turn(&mut self, heading: Heading) {
        self.heading = heading;
    }

    pub(crate) fn len(&self) -> usize {
        self.body.len()
    }

    /// Return the cells of the snake's body, tail first
    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    /// Return where the head would be after one step in direction
    /// `heading`.  The result may be off the board.
    pub(crate) fn propose_next_head(&self, heading: Heading) -> Cell {
        self.head().step(heading)
    }

    /// Add `new_head` as the snake's new head, keeping the tail where it is
    pub(crate) fn grow_to(&mut self, new_head: Cell) {
        debug_assert!(
            !self.body.contains(&new_head),
            "snake grew into itself at {new_head}"
        );
        self.body.push_back(new_head);
    }

    /// Move the snake forwards so that its head is at `new_head`, and return
    /// the cell vacated by the tail.
    ///
    /// The tail is dropped before the head is added, so `new_head` may be the
    /// current tail cell.
    pub(crate) fn advance_to(&mut self, new_head: Cell) -> Cell {
        let vacated = self
            .body
            .pop_front()
            .expect("snake body should always contain at least one cell");
        debug_assert!(
            !self.body.contains(&new_head),
            "snake advanced into itself at {new_head}"
        );
        self.body.push_back(new_head);
        vacated
    }
}
