use super::direction::Direction;
use super::grid::{Cell, Grid};
use super::physics::{Bounce, PhysicsParams};
use std::collections::VecDeque;

/// One piece of the snake
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Segment {
    /// Where the segment is on the board
    pub(crate) cell: Cell,

    /// Where the segment was drawn before the most recent tick; rendering
    /// slides the segment from here to `cell`
    pub(crate) prev: Cell,

    pub(crate) bounce: Bounce,
}

impl Segment {
    pub(crate) fn new(cell: Cell) -> Segment {
        Segment {
            cell,
            prev: cell,
            bounce: Bounce::default(),
        }
    }
}

/// The segments of the snake, head first.  Every segment occupies a distinct cell.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Snake {
    pub(crate) segments: VecDeque<Segment>,
}

impl Snake {
    /// Create a new snake consisting of just a head at `head`
    pub(crate) fn new(head: Cell) -> Snake {
        Snake {
            segments: VecDeque::from([Segment::new(head)]),
        }
    }

    /// Build a snake from the cells of its segments, head first
    #[cfg(test)]
    pub(crate) fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Snake {
        let segments = cells.into_iter().map(Segment::new).collect::<VecDeque<_>>();
        assert!(!segments.is_empty(), "a snake needs at least a head");
        Snake { segments }
    }

    pub(crate) fn head(&self) -> Cell {
        self.segments.front().map(|seg| seg.cell).unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    pub(crate) fn occupies(&self, cell: Cell) -> bool {
        self.segments.iter().any(|seg| seg.cell == cell)
    }

    /// Move the snake one cell in `direction` within `grid`.
    ///
    /// The new head is checked against the walls and against every existing
    /// segment (including the tail, which has not moved yet) before it is
    /// inserted.  If the new head lands on `food`, the tail is kept and the
    /// snake grows by one; otherwise the tail is dropped.
    pub(crate) fn step(&mut self, direction: Direction, grid: Grid, food: Option<Cell>) -> Step {
        let head = direction.advance(self.head());
        if !grid.contains(head) {
            return Step::Crashed(Collision::Wall(head));
        }
        if self.occupies(head) {
            return Step::Crashed(Collision::Body(head));
        }
        let before = self.segments.iter().map(|seg| seg.cell).collect::<Vec<_>>();
        let bounce = self.segments.front().map(|seg| seg.bounce).unwrap_or_default();
        self.segments.push_front(Segment {
            cell: head,
            prev: head,
            bounce,
        });
        let grew = food == Some(head);
        if !grew {
            let _ = self.segments.pop_back();
        }
        // Segment `i` now occupies the cell that segment `i - 1` did; it
        // slides there from where segment `i` used to be.
        for (seg, &prev) in self.segments.iter_mut().zip(&before) {
            seg.prev = prev;
        }
        if grew {
            if let Some(tail) = self.segments.back_mut() {
                tail.prev = tail.cell;
            }
            Step::Grew
        } else {
            Step::Moved
        }
    }

    /// Stop all sliding so that the snake is drawn exactly on its cells
    pub(crate) fn freeze(&mut self) {
        for seg in &mut self.segments {
            seg.prev = seg.cell;
        }
    }

    /// Kick every segment upwards
    pub(crate) fn push(&mut self, params: &PhysicsParams) {
        for seg in &mut self.segments {
            seg.bounce.push(params);
        }
    }

    /// Advance every segment's bounce animation by one frame
    pub(crate) fn animate(&mut self, params: &PhysicsParams) {
        for seg in &mut self.segments {
            seg.bounce.step(params);
        }
    }
}

/// The result of moving the snake by one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Step {
    Moved,
    Grew,
    Crashed(Collision),
}

/// What the snake ran into, and where
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    Wall(Cell),
    Body(Cell),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.segments().map(|seg| seg.cell).collect()
    }

    fn prevs(snake: &Snake) -> Vec<Cell> {
        snake.segments().map(|seg| seg.prev).collect()
    }

    #[test]
    fn single_segment_moves() {
        let mut snake = Snake::new(Cell::new(5, 5));
        let r = snake.step(Direction::Right, Grid::new(20), None);
        assert_eq!(r, Step::Moved);
        assert_eq!(cells(&snake), [Cell::new(6, 5)]);
        assert_eq!(prevs(&snake), [Cell::new(5, 5)]);
    }

    #[test]
    fn body_follows_head() {
        let mut snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        let r = snake.step(Direction::Up, Grid::new(20), None);
        assert_eq!(r, Step::Moved);
        assert_eq!(
            cells(&snake),
            [Cell::new(5, 4), Cell::new(5, 5), Cell::new(4, 5)]
        );
        assert_eq!(
            prevs(&snake),
            [Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
    }

    #[test]
    fn eating_keeps_tail() {
        let mut snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        let r = snake.step(Direction::Right, Grid::new(20), Some(Cell::new(6, 5)));
        assert_eq!(r, Step::Grew);
        assert_eq!(
            cells(&snake),
            [
                Cell::new(6, 5),
                Cell::new(5, 5),
                Cell::new(4, 5),
                Cell::new(3, 5)
            ]
        );
        assert_eq!(snake.segments.back().map(|seg| seg.prev), Some(Cell::new(3, 5)));
    }

    #[test]
    fn food_elsewhere_does_not_grow() {
        let mut snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5)]);
        let r = snake.step(Direction::Right, Grid::new(20), Some(Cell::new(9, 9)));
        assert_eq!(r, Step::Moved);
        assert_eq!(snake.len(), 2);
    }

    #[test]
    fn off_left_edge() {
        let mut snake = Snake::new(Cell::new(0, 5));
        let r = snake.step(Direction::Left, Grid::new(20), None);
        assert_eq!(r, Step::Crashed(Collision::Wall(Cell::new(-1, 5))));
        assert_eq!(cells(&snake), [Cell::new(0, 5)]);
    }

    #[test]
    fn off_bottom_edge() {
        let mut snake = Snake::new(Cell::new(3, 19));
        let r = snake.step(Direction::Down, Grid::new(20), None);
        assert_eq!(r, Step::Crashed(Collision::Wall(Cell::new(3, 20))));
    }

    #[test]
    fn runs_into_itself() {
        // A loop whose head turns back into its own neck area
        let mut snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(5, 6),
            Cell::new(4, 6),
            Cell::new(4, 5),
            Cell::new(4, 4),
        ]);
        let r = snake.step(Direction::Left, Grid::new(20), None);
        assert_eq!(r, Step::Crashed(Collision::Body(Cell::new(4, 5))));
        assert_eq!(snake.len(), 5);
    }

    #[test]
    fn moving_into_tail_cell_is_a_collision() {
        // The tail has not moved away yet when the new head is checked
        let mut snake = Snake::from_cells([
            Cell::new(5, 5),
            Cell::new(6, 5),
            Cell::new(6, 4),
            Cell::new(5, 4),
        ]);
        let r = snake.step(Direction::Up, Grid::new(20), None);
        assert_eq!(r, Step::Crashed(Collision::Body(Cell::new(5, 4))));
    }

    #[test]
    fn cells_stay_distinct() {
        let mut snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        let grid = Grid::new(20);
        let moves = [
            Direction::Right,
            Direction::Down,
            Direction::Down,
            Direction::Left,
            Direction::Left,
            Direction::Up,
        ];
        for (i, d) in moves.into_iter().enumerate() {
            let before = snake.len();
            let food = (i % 2 == 0).then(|| d.advance(snake.head()));
            let r = snake.step(d, grid, food);
            assert!(!matches!(r, Step::Crashed(_)), "crashed on move {i}");
            assert!(snake.len() == before || snake.len() == before + 1);
            let unique = snake.segments().map(|seg| seg.cell).collect::<HashSet<_>>();
            assert_eq!(unique.len(), snake.len());
        }
    }

    #[test]
    fn freeze_stops_sliding() {
        let mut snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5)]);
        let _ = snake.step(Direction::Down, Grid::new(20), None);
        snake.freeze();
        assert_eq!(cells(&snake), prevs(&snake));
    }

    #[test]
    fn push_lifts_every_segment() {
        let params = PhysicsParams::default();
        let mut snake = Snake::from_cells([Cell::new(5, 5), Cell::new(4, 5)]);
        snake.push(&params);
        assert!(snake.segments().all(|seg| !seg.bounce.is_settled()));
        for _ in 0..200 {
            snake.animate(&params);
        }
        assert!(snake.segments().all(|seg| seg.bounce.is_settled()));
        assert_eq!(cells(&snake), [Cell::new(5, 5), Cell::new(4, 5)]);
    }
}
