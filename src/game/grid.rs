use std::fmt;

/// A cell on the board.  Coordinates are signed so that a head which has
/// just run off the board (e.g., to `x = -1`) can still be represented.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct Cell {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Cell {
    pub(crate) const fn new(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    /// Return the cell `dx` columns and `dy` rows away from `self`
    pub(crate) fn offset(self, (dx, dy): (i32, i32)) -> Cell {
        Cell {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A square board of `size` × `size` cells with the origin in the top-left
/// corner
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    size: u16,
}

impl Grid {
    pub(crate) fn new(size: u16) -> Grid {
        Grid { size }
    }

    pub(crate) fn size(self) -> u16 {
        self.size
    }

    /// Total number of cells on the board
    pub(crate) fn area(self) -> usize {
        usize::from(self.size) * usize::from(self.size)
    }

    pub(crate) fn contains(self, cell: Cell) -> bool {
        let size = i32::from(self.size);
        (0..size).contains(&cell.x) && (0..size).contains(&cell.y)
    }

    /// Return the cell at a given index in row-major order.  `i` must be less
    /// than [`Grid::area()`].
    pub(crate) fn cell_at(self, i: usize) -> Cell {
        let size = usize::from(self.size);
        // Both quotient and remainder are below `size`, which fits in a u16.
        let x = u16::try_from(i % size).unwrap_or(u16::MAX);
        let y = u16::try_from(i / size).unwrap_or(u16::MAX);
        Cell::new(i32::from(x), i32::from(y))
    }

    /// Iterate over every cell on the board in row-major order
    #[cfg(test)]
    pub(crate) fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.area()).map(move |i| self.cell_at(i))
    }
}
