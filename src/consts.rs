//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Time between two render frames
pub(crate) const FRAME_PERIOD: Duration = Duration::from_millis(16);

/// Default number of cells along each side of the square board
pub(crate) const GRID_SIZE: u16 = 20;

/// Smallest board side length accepted from the configuration.  The snake
/// starts at (5, 5) heading right, so this leaves it two moves to turn.
pub(crate) const MIN_GRID_SIZE: u16 = 8;

/// Largest board side length that still fits in [`DISPLAY_SIZE`]
pub(crate) const MAX_GRID_SIZE: u16 = 20;

/// Size of one grid cell in physics units.  Bounce offsets and swipe
/// distances are measured in these units.
pub(crate) const TILE_UNITS: f64 = 20.0;

/// Time between two moves of the snake at the start of a game
pub(crate) const INITIAL_INTERVAL: Duration = Duration::from_millis(180);

/// The snake never moves faster than once per this period
pub(crate) const MIN_INTERVAL: Duration = Duration::from_millis(80);

/// Factor applied to the move interval each time food is eaten
pub(crate) const ACCELERATION: f64 = 0.98;

/// Frame deltas larger than this are clamped before being fed to the
/// simulation clock
pub(crate) const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Upward offset added to every segment when the snake grows
pub(crate) const PUSH_FORCE: f64 = 15.0;

/// Downward acceleration applied to segment offsets on every frame
pub(crate) const GRAVITY: f64 = 0.8;

/// Fraction of speed kept when a segment bounces off its resting place
pub(crate) const BOUNCE: f64 = 0.6;

/// Offsets & speeds below this are snapped to rest
pub(crate) const REST_EPSILON: f64 = 0.5;

/// Points awarded for each food eaten
pub(crate) const FOOD_SCORE: u32 = 10;

/// How many random cells to try before giving up on placing food
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 100;

/// Fewest usable tracks with which a game can be started
pub(crate) const MIN_TRACKS: usize = 5;

/// Minimum drag distance, in physics units, that counts as a swipe
pub(crate) const MIN_SWIPE_DISTANCE: f64 = 10.0;

/// Period of the food "pulse" animation
pub(crate) const PULSE_PERIOD: Duration = Duration::from_millis(200);

/// Volume at which track previews are played
pub(crate) const PREVIEW_VOLUME: f32 = 0.4;

/// Glyphs for a snake body segment (each grid cell is two columns wide)
pub(crate) const SEGMENT_SYMBOL: &str = "██";

/// Glyphs for the snake's head
pub(crate) const HEAD_SYMBOL: &str = "▐▌";

/// Glyphs for food, drawn larger or smaller as it pulses
pub(crate) const FOOD_SYMBOL_LARGE: &str = "◖◗";
pub(crate) const FOOD_SYMBOL_SMALL: &str = "()";

/// Color used for the head when its track has no usable artwork
pub(crate) const FALLBACK_HEAD_COLOR: Color = Color::Rgb(0x1D, 0xB9, 0x54);

/// Color used for body segments whose track has no usable artwork
pub(crate) const FALLBACK_BODY_COLOR: Color = Color::Rgb(0x1E, 0xD7, 0x60);

/// Color used for food whose track has no usable artwork
pub(crate) const FALLBACK_FOOD_COLOR: Color = Color::LightRed;

/// Style for the snake's head, patched with the head's artwork color
pub(crate) const HEAD_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Style for the snake's head after it has crashed
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the "MUSIC" half of the logo
pub(crate) const LOGO_MUSIC_STYLE: Style = Style::new().fg(Color::LightMagenta);

/// Style for the "SNAKE" half of the logo
pub(crate) const LOGO_SNAKE_STYLE: Style = Style::new()
    .fg(Color::Green)
    .add_modifier(Modifier::BOLD);

/// Style for the track title in the "now playing" panel
pub(crate) const TRACK_NAME_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Style for secondary text such as artist names
pub(crate) const DIM_STYLE: Style = Style::new().fg(Color::DarkGray);
