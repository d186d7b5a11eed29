use super::grid::Cell;
use enum_map::Enum;

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Column & row deltas of one step in this direction.  Rows grow
    /// downwards.
    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub(crate) fn advance(self, cell: Cell) -> Cell {
        cell.offset(self.delta())
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Parse the identifier of an on-screen direction button
    pub(crate) fn from_button_id(id: &str) -> Option<Direction> {
        match id {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The direction the snake is moving in plus the direction it will move in
/// on the next tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Steering {
    current: Direction,
    next: Direction,
}

impl Steering {
    pub(crate) fn new(direction: Direction) -> Steering {
        Steering {
            current: direction,
            next: direction,
        }
    }

    pub(crate) fn current(self) -> Direction {
        self.current
    }

    #[cfg(test)]
    pub(crate) fn next(self) -> Direction {
        self.next
    }

    /// Request a turn on the next tick.  A request to reverse the current
    /// direction is ignored, leaving any earlier request in place.  Returns
    /// whether the request was accepted.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.current.reverse() {
            false
        } else {
            self.next = direction;
            true
        }
    }

    /// Apply the pending direction at a tick boundary and return it
    pub(crate) fn commit(&mut self) -> Direction {
        self.current = self.next;
        self.current
    }
}
