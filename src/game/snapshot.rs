use super::food::Food;
use super::session::Status;
use std::time::Duration;

/// Everything the renderer needs in order to draw one frame, with the snake's
/// positions already interpolated between ticks
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RenderSnapshot {
    /// Side length of the board in cells
    pub(crate) grid_size: u16,

    /// The snake's segments, head first
    pub(crate) segments: Vec<SegmentView>,

    pub(crate) food: Option<FoodView>,
    pub(crate) score: u32,
    pub(crate) elapsed: Duration,
    pub(crate) status: Status,
}

/// On-screen position of a snake segment, in (fractional) cells
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SegmentView {
    pub(crate) x: f64,
    pub(crate) y: f64,

    /// Height above the segment's position, in cells
    pub(crate) lift: f64,

    /// Index of the track riding on this segment
    pub(crate) track: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct FoodView {
    pub(crate) food: Food,

    /// Size factor oscillating around 1.0
    pub(crate) pulse: f64,
}
