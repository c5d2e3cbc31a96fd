//! Freeman chain-code synthesis, closure, and replay.
//!
//! A 4-connected Freeman chain code describes a boundary walk as a
//! start coordinate plus a string of direction digits, one per unit
//! step: `0` = East, `1` = North, `2` = West, `3` = South. This module
//! turns an ordered boundary trace into such a code, closes an open
//! code by walking back to the start point, and replays a code into a
//! vertex [`Polygon`].
//!
//! The y axis follows the mathematical convention here: North is +y.
//! Nothing downstream depends on the visual orientation -- area and
//! perimeter are invariant under flipping the axis.

use serde::{Deserialize, Serialize};

use crate::types::{Point, Polygon};

/// One of the four cardinal unit moves of a 4-connected walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// +x, Freeman digit `0`.
    East,
    /// +y, Freeman digit `1`.
    North,
    /// -x, Freeman digit `2`.
    West,
    /// -y, Freeman digit `3`.
    South,
}

impl Direction {
    /// The unit offset `(dx, dy)` of this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::East => (1, 0),
            Self::North => (0, 1),
            Self::West => (-1, 0),
            Self::South => (0, -1),
        }
    }

    /// The Freeman digit for this direction.
    #[must_use]
    pub const fn digit(self) -> char {
        match self {
            Self::East => '0',
            Self::North => '1',
            Self::West => '2',
            Self::South => '3',
        }
    }

    /// Parse a Freeman digit. Returns `None` for anything but `0`-`3`.
    #[must_use]
    pub const fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::East),
            '1' => Some(Self::North),
            '2' => Some(Self::West),
            '3' => Some(Self::South),
            _ => None,
        }
    }
}

/// Errors produced by chain-code synthesis and closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum ChainError {
    /// The boundary trace had fewer than 2 points.
    #[error("boundary trace has {0} point(s); at least 2 are required")]
    DegenerateInput(usize),

    /// The closure residual has both axes nonzero, which cannot happen
    /// for a genuinely 4-connected trace.
    #[error("closure residual ({dx}, {dy}) is not axis-aligned; trace was not 4-connected")]
    Closure {
        /// Remaining horizontal delta back to the start point.
        dx: i32,
        /// Remaining vertical delta back to the start point.
        dy: i32,
    },
}

/// A 4-connected Freeman chain code: a start point plus a string of
/// direction digits.
///
/// Invariant: replaying the digit string from `start` deterministically
/// reconstructs the traversed point sequence. A *closed* code replays
/// back to its start point; see [`ChainCode::closed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainCode {
    start: Point,
    directions: String,
}

impl ChainCode {
    /// Create a chain code from a start point and a raw digit string.
    ///
    /// The string is taken as-is; stray non-digit characters are
    /// tolerated during [`replay`](Self::replay) to match the
    /// historical chain-code text format.
    #[must_use]
    pub fn new(start: Point, directions: impl Into<String>) -> Self {
        Self {
            start,
            directions: directions.into(),
        }
    }

    /// The start point of the walk.
    #[must_use]
    pub const fn start(&self) -> Point {
        self.start
    }

    /// The direction digit string.
    #[must_use]
    pub fn directions(&self) -> &str {
        &self.directions
    }

    /// Encode an ordered boundary trace as a chain code.
    ///
    /// Each consecutive pair of points becomes one direction digit when
    /// the step is a canonical unit offset. A non-canonical step
    /// (diagonal or multi-cell jump from the upstream tracer) is
    /// repaired by emitting unit moves that consume the full horizontal
    /// component before the vertical one. The repair is deterministic
    /// but biased -- it does not claim to be the geometrically shortest
    /// decomposition.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::DegenerateInput`] if `points` has fewer
    /// than 2 elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use grainscan_analysis::chain::ChainCode;
    /// use grainscan_analysis::types::Point;
    ///
    /// let square = [
    ///     Point::new(0, 0),
    ///     Point::new(1, 0),
    ///     Point::new(1, 1),
    ///     Point::new(0, 1),
    /// ];
    /// let code = ChainCode::encode(&square)?;
    /// assert_eq!(code.start(), Point::new(0, 0));
    /// assert_eq!(code.directions(), "012");
    /// # Ok::<(), grainscan_analysis::chain::ChainError>(())
    /// ```
    pub fn encode(points: &[Point]) -> Result<Self, ChainError> {
        if points.len() < 2 {
            return Err(ChainError::DegenerateInput(points.len()));
        }

        let mut directions = String::with_capacity(points.len() - 1);
        for pair in points.windows(2) {
            let dx = pair[1].x - pair[0].x;
            let dy = pair[1].y - pair[0].y;
            match unit_direction(dx, dy) {
                Some(direction) => directions.push(direction.digit()),
                None => decompose_step(&mut directions, dx, dy),
            }
        }

        Ok(Self {
            start: points[0],
            directions,
        })
    }

    /// The endpoint reached by replaying the digit string from the
    /// start point. Pure simulation; does not allocate the vertex list.
    #[must_use]
    pub fn endpoint(&self) -> Point {
        let mut current = self.start;
        for direction in self.moves() {
            let (dx, dy) = direction.offset();
            current = Point::new(current.x + dx, current.y + dy);
        }
        current
    }

    /// Compute the digit suffix that closes this chain.
    ///
    /// The residual delta from the endpoint back to the start is
    /// cancelled one cardinal unit at a time, one axis at a time. A
    /// code that already ends at its start point yields an empty
    /// suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Closure`] when the residual has both axes
    /// nonzero. A valid 4-connected trace always leaves an axis-aligned
    /// residual, so this indicates a precondition violation upstream;
    /// it is reported rather than silently looped over.
    pub fn closure_suffix(&self) -> Result<String, ChainError> {
        let end = self.endpoint();
        let mut dx = self.start.x - end.x;
        let mut dy = self.start.y - end.y;

        let mut suffix = String::new();
        while dx != 0 || dy != 0 {
            if dx > 0 && dy == 0 {
                suffix.push(Direction::East.digit());
                dx -= 1;
            } else if dx < 0 && dy == 0 {
                suffix.push(Direction::West.digit());
                dx += 1;
            } else if dy > 0 && dx == 0 {
                suffix.push(Direction::North.digit());
                dy -= 1;
            } else if dy < 0 && dx == 0 {
                suffix.push(Direction::South.digit());
                dy += 1;
            } else {
                return Err(ChainError::Closure { dx, dy });
            }
        }
        Ok(suffix)
    }

    /// Return a closed copy of this chain code.
    ///
    /// Appends [`closure_suffix`](Self::closure_suffix) to the digit
    /// string, so replaying the result returns exactly to the start
    /// point. Idempotent on already-closed codes.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::Closure`] when the residual is not
    /// axis-aligned.
    pub fn closed(&self) -> Result<Self, ChainError> {
        let suffix = self.closure_suffix()?;
        let mut directions = self.directions.clone();
        directions.push_str(&suffix);
        Ok(Self {
            start: self.start,
            directions,
        })
    }

    /// Replay the digit string into the full vertex sequence, starting
    /// with the start point.
    ///
    /// Tolerant of slightly malformed input: non-digit characters and
    /// out-of-range digits (anything but `0`-`3`) are skipped
    /// per-character rather than aborting the replay.
    ///
    /// # Examples
    ///
    /// ```
    /// use grainscan_analysis::chain::ChainCode;
    /// use grainscan_analysis::types::Point;
    ///
    /// // The invalid digit `9` is skipped; only two moves remain.
    /// let code = ChainCode::new(Point::new(0, 0), "019");
    /// let polygon = code.replay();
    /// assert_eq!(
    ///     polygon.vertices(),
    ///     &[Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)],
    /// );
    /// ```
    #[must_use]
    pub fn replay(&self) -> Polygon {
        let mut vertices = Vec::with_capacity(self.directions.len() + 1);
        let mut current = self.start;
        vertices.push(current);
        for direction in self.moves() {
            let (dx, dy) = direction.offset();
            current = Point::new(current.x + dx, current.y + dy);
            vertices.push(current);
        }
        Polygon::new(vertices)
    }

    /// Iterator over the valid moves in the digit string, skipping
    /// characters that are not a Freeman digit.
    fn moves(&self) -> impl Iterator<Item = Direction> {
        self.directions.chars().filter_map(Direction::from_digit)
    }
}

/// Map a delta to its canonical direction, or `None` if the delta is
/// not one of the four unit offsets.
const fn unit_direction(dx: i32, dy: i32) -> Option<Direction> {
    match (dx, dy) {
        (1, 0) => Some(Direction::East),
        (0, 1) => Some(Direction::North),
        (-1, 0) => Some(Direction::West),
        (0, -1) => Some(Direction::South),
        _ => None,
    }
}

/// Break a non-canonical step into unit moves, horizontal component
/// first. Repair path for 8-connected or jumpy upstream tracers.
fn decompose_step(directions: &mut String, mut dx: i32, mut dy: i32) {
    while dx != 0 || dy != 0 {
        if dx > 0 {
            directions.push(Direction::East.digit());
            dx -= 1;
        } else if dx < 0 {
            directions.push(Direction::West.digit());
            dx += 1;
        } else if dy > 0 {
            directions.push(Direction::North.digit());
            dy -= 1;
        } else {
            directions.push(Direction::South.digit());
            dy += 1;
        }
    }
}
