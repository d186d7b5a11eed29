use super::session::Status;
use super::snapshot::RenderSnapshot;
use crate::consts;
use crate::input::DPad;
use crate::tracks::{Library, Track};
use crate::util::{center_rect, format_time, get_display_area};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Rect, Size},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::time::Duration;

/// Where each part of the game screen goes
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameLayout {
    pub(crate) score_bar: Rect,
    pub(crate) board: Rect,
    pub(crate) now_playing: Rect,
    pub(crate) controls: Rect,
    pub(crate) dpad: Rect,
    pub(crate) message: Rect,
}

impl GameLayout {
    const BOARD_COLUMN_WIDTH: u16 = consts::MAX_GRID_SIZE * 2 + 2;
    const NOW_PLAYING_HEIGHT: u16 = 5;

    pub(crate) fn new(area: Rect, grid_size: u16) -> GameLayout {
        let display = get_display_area(area);
        let [score_bar, main, message] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        let [board_column, panel] = Layout::horizontal([
            Constraint::Length(Self::BOARD_COLUMN_WIDTH),
            Constraint::Fill(1),
        ])
        .spacing(1)
        .areas(main);
        let board = center_rect(
            board_column,
            Size {
                width: grid_size.saturating_mul(2).saturating_add(2),
                height: grid_size.saturating_add(2),
            },
        );
        let [now_playing, controls, dpad] =
            Layout::vertical([Self::NOW_PLAYING_HEIGHT, 1, DPad::HEIGHT])
                .flex(Flex::Start)
                .spacing(1)
                .areas(panel);
        let [dpad] = Layout::horizontal([DPad::WIDTH])
            .flex(Flex::Center)
            .areas(dpad);
        GameLayout {
            score_bar,
            board,
            now_playing,
            controls,
            dpad,
            message,
        }
    }
}

/// The board with the snake & food on it
#[derive(Clone, Copy, Debug)]
pub(crate) struct BoardView<'a> {
    pub(crate) snapshot: &'a RenderSnapshot,
    pub(crate) library: &'a Library,
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Block::bordered().render(area, buf);
        let mut canvas = Canvas {
            area: area.inner(Margin::new(1, 1)),
            buf,
        };
        if let Some(fv) = self.snapshot.food {
            let color = self
                .library
                .color(fv.food.track)
                .unwrap_or(consts::FALLBACK_FOOD_COLOR);
            let symbol = if fv.pulse >= 1.0 {
                consts::FOOD_SYMBOL_LARGE
            } else {
                consts::FOOD_SYMBOL_SMALL
            };
            canvas.draw(
                f64::from(fv.food.cell.x),
                f64::from(fv.food.cell.y),
                symbol,
                Style::new().fg(color),
            );
        }
        // Draw from the tail forwards so that the head ends up on top
        for (i, seg) in self.snapshot.segments.iter().enumerate().rev() {
            let color = seg.track.and_then(|t| self.library.color(t));
            let (symbol, style) = if i > 0 {
                (
                    consts::SEGMENT_SYMBOL,
                    Style::new().fg(color.unwrap_or(consts::FALLBACK_BODY_COLOR)),
                )
            } else if matches!(self.snapshot.status, Status::Dead(_)) {
                (consts::HEAD_SYMBOL, consts::COLLISION_STYLE)
            } else {
                (
                    consts::HEAD_SYMBOL,
                    consts::HEAD_STYLE.fg(color.unwrap_or(consts::FALLBACK_HEAD_COLOR)),
                )
            };
            canvas.draw(seg.x, seg.y - seg.lift, symbol, style);
        }
    }
}

/// Draws board cells (each two terminal columns wide) at fractional
/// positions, clipped to `area`
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn draw(&mut self, x: f64, y: f64, symbol: &str, style: Style) {
        let col = (x * 2.0).round();
        let row = y.round();
        if col < 0.0 || row < 0.0 {
            return;
        }
        // Float-to-int `as` casts saturate.
        let (col, row) = (col as u16, row as u16);
        let Some(y) = self.area.y.checked_add(row).filter(|&y| y < self.area.bottom()) else {
            return;
        };
        for (i, ch) in (0u16..).zip(symbol.chars()) {
            let Some(x) = self
                .area
                .x
                .checked_add(col)
                .and_then(|x| x.checked_add(i))
                .filter(|&x| x < self.area.right())
            else {
                continue;
            };
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

/// The track most recently eaten
#[derive(Clone, Copy, Debug)]
pub(crate) struct NowPlayingView<'a> {
    pub(crate) track: Option<(&'a Track, Option<Color>)>,
    pub(crate) preview: Option<&'a str>,
}

impl Widget for NowPlayingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Now Playing ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        let [name_area, artist_area, preview_area] = Layout::vertical([1, 1, 1]).areas(inner);
        if let Some((track, color)) = self.track {
            let mut name_style = consts::TRACK_NAME_STYLE;
            if let Some(c) = color {
                name_style = name_style.fg(c);
            }
            Line::styled(track.name.as_str(), name_style).render(name_area, buf);
            Line::from(track.artist.as_str()).render(artist_area, buf);
            let preview = if self.preview.is_some() {
                "♪ preview"
            } else {
                "(no preview)"
            };
            Line::styled(preview, consts::DIM_STYLE).render(preview_area, buf);
        } else {
            Line::styled("Nothing yet", consts::DIM_STYLE).render(name_area, buf);
        }
    }
}

/// The clickable direction pad
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DPadView;

impl Widget for DPadView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (_, label, rect) in DPad::buttons(area) {
            Span::styled(label, consts::KEY_STYLE).render(rect, buf);
        }
    }
}

/// The score & time bar at the top of the game screen
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ScoreBar {
    pub(crate) score: u32,
    pub(crate) elapsed: Duration,
}

impl Widget for ScoreBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Line::styled(format!(" Score: {}", self.score), consts::SCORE_BAR_STYLE).render(area, buf);
        Line::from(format!("Time: {} ", format_time(self.elapsed)))
            .right_aligned()
            .render(area, buf);
    }
}

/// Pop-up shown over the board once the game has ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameOverView {
    pub(crate) status: Status,
    pub(crate) score: u32,
    pub(crate) elapsed: Duration,
}

impl GameOverView {
    pub(crate) const WIDTH: u16 = 34;
    pub(crate) const HEIGHT: u16 = 7;
}

impl Widget for GameOverView {
    // `area` is the area over which the pop-up is centered.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup = center_rect(
            area,
            Size {
                width: GameOverView::WIDTH,
                height: GameOverView::HEIGHT,
            },
        );
        let title = if self.status == Status::BoardFull {
            " BOARD FULL! "
        } else {
            " GAME OVER "
        };
        let block = Block::bordered()
            .title(title)
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [score_area, time_area, _, choices_area] =
            Layout::vertical([1, 1, 1, 1]).areas(block.inner(popup));
        Clear.render(popup, buf);
        block.render(popup, buf);
        Line::from(format!("Score: {}", self.score))
            .centered()
            .render(score_area, buf);
        Line::from(format!("Time: {}", format_time(self.elapsed)))
            .centered()
            .render(time_area, buf);
        Line::from_iter([
            Span::raw("Again ("),
            Span::styled("r", consts::KEY_STYLE),
            Span::raw(")  Menu ("),
            Span::styled("m", consts::KEY_STYLE),
            Span::raw(")  Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(choices_area, buf);
    }
}
