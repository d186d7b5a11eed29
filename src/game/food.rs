use super::grid::{Cell, Grid};
use super::snake::Snake;
use crate::consts;
use rand::{seq::IndexedRandom, Rng};
use thiserror::Error;

/// A piece of food: a cell on the board plus the index of the track that the
/// snake will "play" when it eats it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    pub(crate) cell: Cell,
    pub(crate) track: usize,
}

/// Choose a free cell for a new piece of food along with its track.
///
/// Cells are picked at random, up to [`MAX_FOOD_ATTEMPTS`] times, until one
/// not covered by `snake` is found.  The track is picked from those that are
/// not already riding on the snake (per `riding`), or from all `track_count`
/// tracks once every one of them is in use.
///
/// [`MAX_FOOD_ATTEMPTS`]: consts::MAX_FOOD_ATTEMPTS
pub(crate) fn place_food<R: Rng>(
    rng: &mut R,
    grid: Grid,
    snake: &Snake,
    riding: &[usize],
    track_count: usize,
) -> Result<Food, FoodError> {
    if track_count == 0 {
        return Err(FoodError::NoTracks);
    }
    let cell = (0..consts::MAX_FOOD_ATTEMPTS)
        .map(|_| grid.cell_at(rng.random_range(0..grid.area())))
        .find(|&cell| !snake.occupies(cell))
        .ok_or(FoodError::Exhausted {
            attempts: consts::MAX_FOOD_ATTEMPTS,
        })?;
    let unused = (0..track_count)
        .filter(|i| !riding.contains(i))
        .collect::<Vec<_>>();
    let track = match unused.choose(rng) {
        Some(&i) => i,
        None => rng.random_range(0..track_count),
    };
    Ok(Food { cell, track })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum FoodError {
    #[error("no tracks to attach to food")]
    NoTracks,
    #[error("no free cell found for food after {attempts} attempts")]
    Exhausted { attempts: usize },
}
