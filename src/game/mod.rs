mod clock;
mod direction;
mod food;
mod grid;
mod physics;
mod render;
mod session;
mod snake;
mod snapshot;
pub(crate) use self::clock::ClockParams;
pub(crate) use self::direction::Direction;
pub(crate) use self::physics::PhysicsParams;
pub(crate) use self::session::SessionParams;
use self::render::{BoardView, DPadView, GameLayout, GameOverView, NowPlayingView, ScoreBar};
use self::session::{GameSession, SessionError, SessionEvent, Status};
use self::snake::Collision;
use crate::app::{Globals, Screen};
use crate::audio::Jukebox;
use crate::command::Command;
use crate::consts;
use crate::input::{DPad, SwipeTracker};
use crate::menu::MainMenu;
use crate::tracks::{Library, Track, TrackError};
use crate::util::format_time;
use crossterm::event::{poll, read, Event, MouseButton, MouseEvent, MouseEventKind};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::rc::Rc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info};

/// The game screen: a running (or finished) session plus everything around
/// it that the player sees & hears
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    session: GameSession<R>,
    globals: Globals,
    library: Rc<Library>,
    jukebox: Jukebox,

    /// Index of the most recently eaten track
    now_playing: Option<usize>,

    swipe: SwipeTracker,
    next_frame: Option<Instant>,

    /// Layout of the most recent draw, used to locate mouse clicks
    layout: Option<GameLayout>,
}

impl Game<rand::rngs::ThreadRng> {
    /// Fetch the tracks for the selected period (unless they were already
    /// fetched) and start a new game with them
    pub(crate) fn start(globals: Globals) -> Result<Self, StartError> {
        Game::start_with_rng(globals, rand::rng(), Instant::now())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn start_with_rng(
        mut globals: Globals,
        rng: R,
        now: Instant,
    ) -> Result<Game<R>, StartError> {
        let library = globals.library()?;
        let session = GameSession::start(globals.session_params(), library.len(), rng, now)?;
        Ok(Game {
            session,
            globals,
            library,
            jukebox: Jukebox::new(),
            now_playing: None,
            swipe: SwipeTracker::new(),
            next_frame: None,
            layout: None,
        })
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        if self.session.is_running() {
            let when = *self
                .next_frame
                .get_or_insert_with(|| Instant::now() + consts::FRAME_PERIOD);
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance(Instant::now());
                self.next_frame = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    fn advance(&mut self, now: Instant) {
        for event in self.session.frame(now) {
            self.handle_session_event(event);
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&mut self, frame: &mut Frame<'_>) {
        self.layout = Some(GameLayout::new(frame.area(), self.session.grid_size()));
        frame.render_widget(&*self, frame.area());
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Ate { track } => {
                self.jukebox
                    .play(self.library.get(track).and_then(Track::preview));
                self.now_playing = Some(track);
            }
            SessionEvent::Crashed(_) | SessionEvent::BoardFull => {
                self.jukebox.stop();
                self.now_playing = None;
                info!(
                    score = self.session.score(),
                    time = %format_time(self.session.elapsed()),
                    "Final score"
                );
            }
        }
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        if let Event::Mouse(mouse) = event {
            self.handle_mouse(mouse);
            return None;
        }
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if self.session.is_running() {
            match cmd {
                Command::Quit => return Some(Screen::Quit),
                Command::Up => self.steer(Direction::Up),
                Command::Left => self.steer(Direction::Left),
                Command::Down => self.steer(Direction::Down),
                Command::Right => self.steer(Direction::Right),
                Command::Esc => return Some(self.main_menu()),
                _ => (),
            }
        } else {
            match cmd {
                Command::R | Command::Enter => return Some(self.restart()),
                Command::M | Command::Esc => return Some(self.main_menu()),
                Command::Quit | Command::Q => return Some(Screen::Quit),
                _ => (),
            }
        }
        None
    }

    fn handle_mouse(&mut self, event: MouseEvent) {
        if !self.session.is_running() {
            return;
        }
        let pos = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let button = self.layout.and_then(|layout| DPad::hit(layout.dpad, pos));
                if let Some(d) = button.and_then(Direction::from_button_id) {
                    self.steer(d);
                } else {
                    self.swipe.press(pos);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(d) = self.swipe.drag(pos) {
                    self.steer(d);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.swipe.release(),
            _ => (),
        }
    }

    fn steer(&mut self, direction: Direction) {
        if !self.session.steer(direction) {
            debug!(
                ?direction,
                current = ?self.session.current_direction(),
                "Ignoring turn"
            );
        }
    }

    fn restart(&mut self) -> Screen {
        self.jukebox.stop();
        match Game::start(self.globals.clone()) {
            Ok(game) => Screen::Game(game),
            Err(e) => Screen::Main(MainMenu::new(self.globals.clone()).with_warning(e.into())),
        }
    }

    fn main_menu(&mut self) -> Screen {
        self.jukebox.stop();
        Screen::Main(MainMenu::new(self.globals.clone()))
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snapshot = self.session.snapshot();
        let layout = GameLayout::new(area, snapshot.grid_size);
        ScoreBar {
            score: snapshot.score,
            elapsed: snapshot.elapsed,
        }
        .render(layout.score_bar, buf);
        BoardView {
            snapshot: &snapshot,
            library: &self.library,
        }
        .render(layout.board, buf);
        NowPlayingView {
            track: self
                .now_playing
                .and_then(|i| Some((self.library.get(i)?, self.library.color(i)))),
            preview: self.jukebox.playing(),
        }
        .render(layout.now_playing, buf);
        Line::from_iter([
            Span::raw("Menu ("),
            Span::styled("Esc", consts::KEY_STYLE),
            Span::raw(")  Quit ("),
            Span::styled("Ctrl-C", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(layout.controls, buf);
        DPadView.render(layout.dpad, buf);
        if let Some(msg) = status_message(snapshot.status) {
            Line::from(msg).render(layout.message, buf);
            GameOverView {
                status: snapshot.status,
                score: snapshot.score,
                elapsed: snapshot.elapsed,
            }
            .render(layout.board, buf);
        }
    }
}

fn status_message(status: Status) -> Option<String> {
    match status {
        Status::Running => None,
        Status::Dead(Collision::Wall(cell)) => Some(format!(" You hit the wall at {cell}")),
        Status::Dead(Collision::Body(cell)) => Some(format!(" You ran into yourself at {cell}")),
        Status::BoardFull => Some(String::from(" The board is full!")),
    }
}

#[derive(Debug, Error)]
pub(crate) enum StartError {
    #[error(transparent)]
    Tracks(#[from] TrackError),
    #[error("Failed to start game")]
    Session(#[from] SessionError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tracks::{StaticTracks, TrackProvider};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn globals(provider: &Rc<StaticTracks>) -> Globals {
        let provider: Rc<dyn TrackProvider> = provider.clone();
        Globals::new(Rc::new(Config::default()), provider)
    }

    fn new_game(now: Instant) -> Game<ChaCha12Rng> {
        let provider = Rc::new(StaticTracks::sample(8));
        Game::start_with_rng(globals(&provider), ChaCha12Rng::seed_from_u64(RNG_SEED), now)
            .unwrap()
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    /// Run frames until the game ends
    fn play_out(game: &mut Game<ChaCha12Rng>, start: Instant) {
        let mut now = start;
        while game.session.is_running() {
            now += Duration::from_millis(50);
            game.advance(now);
            assert!(now - start < Duration::from_secs(60), "game never ended");
        }
    }

    #[test]
    fn too_few_tracks() {
        let provider = Rc::new(StaticTracks::sample(3));
        let r = Game::start_with_rng(
            globals(&provider),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            Instant::now(),
        );
        match r {
            Err(StartError::Tracks(e)) => assert!(e.is_insufficient()),
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[test]
    fn eating_plays_preview() {
        let mut game = new_game(Instant::now());
        game.handle_session_event(SessionEvent::Ate { track: 3 });
        assert_eq!(game.now_playing, Some(3));
        assert_eq!(
            game.jukebox.playing(),
            Some("https://example.com/preview3.mp3")
        );
        game.handle_session_event(SessionEvent::Ate { track: 5 });
        assert_eq!(game.now_playing, Some(5));
        assert_eq!(
            game.jukebox.playing(),
            Some("https://example.com/preview5.mp3")
        );
    }

    #[test]
    fn game_over_stops_audio() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.handle_session_event(SessionEvent::Ate { track: 1 });
        assert!(game
            .handle_event(Event::Key(KeyCode::Up.into()))
            .is_none());
        play_out(&mut game, start);
        assert!(matches!(
            game.session.status(),
            Status::Dead(Collision::Wall(_))
        ));
        assert_eq!(game.now_playing, None);
        assert_eq!(game.jukebox.playing(), None);
    }

    #[test]
    fn keys_after_game_over() {
        let start = Instant::now();
        let mut game = new_game(start);
        play_out(&mut game, start);
        assert!(game
            .handle_event(Event::Key(KeyCode::Up.into()))
            .is_none());
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Char('r').into())),
            Some(Screen::Game(_))
        ));
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(Screen::Main(_))
        ));
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn restart_reuses_tracks() {
        let start = Instant::now();
        let provider = Rc::new(StaticTracks::sample(8));
        let mut game = Game::start_with_rng(
            globals(&provider),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
            start,
        )
        .unwrap();
        play_out(&mut game, start);
        assert!(matches!(game.restart(), Screen::Game(_)));
        assert!(matches!(game.main_menu(), Screen::Main(_)));
        assert_eq!(provider.fetches.get(), 1);
    }

    #[test]
    fn esc_returns_to_menu() {
        let mut game = new_game(Instant::now());
        game.handle_session_event(SessionEvent::Ate { track: 0 });
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Esc.into())),
            Some(Screen::Main(_))
        ));
        assert_eq!(game.jukebox.playing(), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut game = new_game(Instant::now());
        assert!(matches!(
            game.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn click_dpad() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.layout = Some(GameLayout::new(Rect::new(0, 0, 80, 24), consts::GRID_SIZE));
        // The pad is drawn at (56, 9); its "up" button is 4 columns in.
        assert!(game
            .handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 61, 9))
            .is_none());
        game.advance(start + Duration::from_millis(200));
        assert_eq!(game.session.current_direction(), Direction::Up);
    }

    #[test]
    fn swipe_steers() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.layout = Some(GameLayout::new(Rect::new(0, 0, 80, 24), consts::GRID_SIZE));
        game.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        game.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 10, 12));
        game.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 10, 12));
        game.advance(start + Duration::from_millis(200));
        assert_eq!(game.session.current_direction(), Direction::Down);
    }

    #[test]
    fn reversal_is_ignored() {
        let start = Instant::now();
        let mut game = new_game(start);
        game.handle_event(Event::Key(KeyCode::Char('a').into()));
        game.advance(start + Duration::from_millis(200));
        assert_eq!(game.session.current_direction(), Direction::Right);
    }

    #[test]
    fn draw_game_over() {
        let start = Instant::now();
        let mut game = new_game(start);
        play_out(&mut game, start);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&game).render(area, &mut buffer);
        let row = |y: u16| {
            (0..area.width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        };
        assert!(row(23).starts_with(" You hit the wall at (20, 5)"));
        assert!((0..area.height).any(|y| row(y).contains(" GAME OVER ")));
        assert!(row(0).starts_with(" Score: "));
    }
}
