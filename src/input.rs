//! Pointer input: swipes made by dragging the mouse, and clicks on the
//! on-screen direction pad
use crate::consts;
use crate::game::Direction;
use ratatui::layout::{Position, Rect};

/// Turns mouse drags into directions.
///
/// Each drag sample is compared to the previous one (or to where the button
/// was pressed); if the movement along its dominant axis exceeds
/// [`MIN_SWIPE_DISTANCE`], that is a swipe in that direction.  The reference
/// point moves to every sample, swipe or not.
///
/// [`MIN_SWIPE_DISTANCE`]: consts::MIN_SWIPE_DISTANCE
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct SwipeTracker {
    anchor: Option<Position>,
}

impl SwipeTracker {
    pub(crate) fn new() -> SwipeTracker {
        SwipeTracker::default()
    }

    pub(crate) fn press(&mut self, pos: Position) {
        self.anchor = Some(pos);
    }

    pub(crate) fn release(&mut self) {
        self.anchor = None;
    }

    /// Process a drag sample at `pos` and return the direction swiped, if any
    pub(crate) fn drag(&mut self, pos: Position) -> Option<Direction> {
        let anchor = self.anchor.replace(pos)?;
        // Terminal cells are twice as tall as they are wide, and a board cell
        // is two columns wide.
        let dx = (f64::from(pos.x) - f64::from(anchor.x)) * consts::TILE_UNITS / 2.0;
        let dy = (f64::from(pos.y) - f64::from(anchor.y)) * consts::TILE_UNITS;
        if dx.abs() > dy.abs() && dx.abs() > consts::MIN_SWIPE_DISTANCE {
            Some(if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            })
        } else if dy.abs() > consts::MIN_SWIPE_DISTANCE {
            Some(if dy > 0.0 {
                Direction::Down
            } else {
                Direction::Up
            })
        } else {
            None
        }
    }
}

/// Layout of the clickable direction pad:
///
/// ```text
///     [▲]
/// [◀]     [▶]
///     [▼]
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DPad;

impl DPad {
    pub(crate) const WIDTH: u16 = 11;
    pub(crate) const HEIGHT: u16 = 3;
    const BUTTON_WIDTH: u16 = 3;

    /// The identifiers of the buttons along with their labels and their
    /// positions relative to the top-left corner of the pad
    pub(crate) const BUTTONS: [(&'static str, &'static str, u16, u16); 4] = [
        ("up", "[▲]", 4, 0),
        ("left", "[◀]", 0, 1),
        ("right", "[▶]", 8, 1),
        ("down", "[▼]", 4, 2),
    ];

    /// Return the area of each button when the pad is drawn at `area`
    pub(crate) fn buttons(area: Rect) -> impl Iterator<Item = (&'static str, &'static str, Rect)> {
        DPad::BUTTONS.into_iter().map(move |(id, label, x, y)| {
            let rect = Rect::new(
                area.x.saturating_add(x),
                area.y.saturating_add(y),
                DPad::BUTTON_WIDTH,
                1,
            )
            .intersection(area);
            (id, label, rect)
        })
    }

    /// Return the identifier of the button at `pos` when the pad is drawn at
    /// `area`
    pub(crate) fn hit(area: Rect, pos: Position) -> Option<&'static str> {
        DPad::buttons(area)
            .find(|&(_, _, rect)| rect.contains(pos))
            .map(|(id, _, _)| id)
    }
}
