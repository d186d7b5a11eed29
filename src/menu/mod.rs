mod widgets;
use self::widgets::{Instructions, Logo};
use crate::app::{Globals, Screen};
use crate::command::Command;
use crate::consts;
use crate::game::Game;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::{get_display_area, EnumExt};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{read, Event};
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};
use tracing::warn;

#[derive(Clone, Debug)]
pub(crate) struct MainMenu {
    globals: Globals,
    selection: Selection,
    options: OptionsMenu,
    warning: Option<Warning>,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> Self {
        let options = OptionsMenu::new(globals.options);
        MainMenu {
            globals,
            selection: Selection::default(),
            options,
            warning: None,
        }
    }

    /// Show `warning` on top of the menu
    pub(crate) fn with_warning(mut self, warning: Warning) -> Self {
        self.warning = Some(warning);
        self
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        if let Some(ref mut warning) = self.warning {
            match warning.handle_command(cmd)? {
                WarningOutcome::Dismissed => self.warning = None,
                WarningOutcome::Retry => {
                    self.warning = None;
                    return self.play();
                }
                WarningOutcome::Quit => return Some(Screen::Quit),
            }
            return None;
        }
        match (self.selection, cmd) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (_, Command::Home) => self.select(Selection::PlayButton, None),
            (_, Command::End) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Enter) | (_, Command::P) => return self.play(),
            (Selection::PlayButton, Command::Prev) => self.select(Selection::QuitButton, None),
            (Selection::PlayButton, Command::Down | Command::Next) => {
                self.select(Selection::Options, Some(true));
            }
            (Selection::Options, Command::Up | Command::Prev) => {
                if let Some(sel) = self.options.move_up() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Down | Command::Next) => {
                if let Some(sel) = self.options.move_down() {
                    self.select(sel, None);
                }
            }
            (Selection::Options, Command::Left) => self.options.move_left(),
            (Selection::Options, Command::Right) => self.options.move_right(),
            (Selection::Options, Command::Space | Command::Enter) => self.options.toggle(),
            (Selection::QuitButton, Command::Enter) | (_, Command::Q) => {
                return Some(Screen::Quit);
            }
            (Selection::QuitButton, Command::Next) => self.select(Selection::PlayButton, None),
            (Selection::QuitButton, Command::Up | Command::Prev) => {
                self.select(Selection::Options, Some(false));
            }
            _ => (),
        }
        None
    }

    /// Start a game with the selected options.  If the tracks can't be
    /// loaded, stay on the menu and show why.
    fn play(&mut self) -> Option<Screen> {
        self.globals.options = self.options.to_options();
        match Game::start(self.globals.clone()) {
            Ok(game) => Some(Screen::Game(game)),
            Err(e) => {
                warn!(error = %e, "Could not start game");
                self.warning = Some(Warning::from(e).with_retry());
                None
            }
        }
    }

    fn select(&mut self, selection: Selection, first_option: Option<bool>) {
        self.selection = selection;
        if selection == Selection::Options {
            if let Some(first) = first_option {
                self.options.selection = if first {
                    Some(OptKey::min())
                } else {
                    Some(OptKey::max())
                };
            } else {
                self.options.selection = None;
            }
        }
    }
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, play_area, options_area, quit_area] =
            Layout::vertical([
                Logo::HEIGHT,
                Instructions::HEIGHT,
                1,
                OptionsMenu::HEIGHT,
                1,
            ])
            .flex(Flex::Start)
            .spacing(1)
            .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        button("Play", "p", self.selection == Selection::PlayButton).render(play_area, buf);

        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Center)
            .areas(options_area);
        (&self.options).render(options_area, buf);

        button("Quit", "q", self.selection == Selection::QuitButton).render(quit_area, buf);

        if let Some(ref warning) = self.warning {
            warning.render(display, buf);
        }
    }
}

/// A centered "[Label (k)]" button
fn button(label: &str, key: &'static str, selected: bool) -> Line<'static> {
    let style = if selected {
        consts::MENU_SELECTION_STYLE
    } else {
        Style::new()
    };
    Line::from_iter([
        Span::styled(format!("[{label} ("), style),
        Span::styled(key, consts::KEY_STYLE.patch(style)),
        Span::styled(")]", style),
    ])
    .centered()
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum Selection {
    #[default]
    PlayButton,
    Options,
    QuitButton,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct OptionsMenu {
    /// If the currently-selected main menu item is an element of this menu,
    /// then `selection` is `Some(key)`, where `key` is the key of the selected
    /// item within the `OptionsMenu`.
    selection: Option<OptKey>,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: None,
            settings,
        }
    }

    fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    fn move_up(&mut self) -> Option<Selection> {
        self.selection = self.selection?.prev();
        self.selection.is_none().then_some(Selection::PlayButton)
    }

    fn move_down(&mut self) -> Option<Selection> {
        self.selection = self.selection?.next();
        self.selection.is_none().then_some(Selection::QuitButton)
    }

    fn move_left(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].decrease();
        }
    }

    fn move_right(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].increase();
        }
    }

    fn toggle(&mut self) {
        if let Some(sel) = self.selection {
            self.settings[sel].toggle();
        }
    }
}

impl Widget for &OptionsMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = Some(key) == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tracks::{Period, StaticTracks, TrackProvider};
    use crossterm::event::KeyCode;
    use pretty_assertions::assert_eq;
    use std::rc::Rc;

    fn menu_with(provider: &Rc<StaticTracks>) -> MainMenu {
        let provider: Rc<dyn TrackProvider> = provider.clone();
        MainMenu::new(Globals::new(Rc::new(Config::default()), provider))
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[rustfmt::skip]
    const INITIAL_SCREEN: [&str; 24] = [
        r"           __  __ _   _ ____ ___ ____  ____  _   _    _    _  _______           ",
        r"          |  \/  | | | / ___|_ _/ ___|/ ___|| \ | |  / \  | |/ / ____|          ",
        r"          | |\/| | | | \___ \| | |    \___ \|  \| | / _ \ | ' /|  _|            ",
        r"          | |  | | |_| |___) | | |___  ___) | |\  |/ ___ \| . \| |___           ",
        r"          |_|  |_|\___/|____/___\____||____/|_| \_/_/   \_\_|\_\_____|          ",
         "                                                                                ",
         "                                ██████████▐▌  ◖◗                                ",
         "                                                                                ",
         "                              Move the snake with:                              ",
         "                                     ← ↓ ↑ →                                    ",
         "                                 or: h j k l                                    ",
         "                                 or: a s w d                                    ",
         "                                 or: the mouse                                  ",
         "                              Eat the tracks, but                               ",
         "                              don't hit yourself!                               ",
         "                                                                                ",
         "                                   [Play (p)]                                   ",
         "                                                                                ",
         "                           ┌ Options: ──────────────┐                           ",
         "                           │   Period  ◀  1 year  ▶ │                           ",
         "                           │   Bounce      [✓]      │                           ",
         "                           └────────────────────────┘                           ",
         "                                                                                ",
         "                                   [Quit (q)]                                   ",
    ];

    /// Styles present on every rendering of the menu
    fn set_common_styles(expected: &mut Buffer) {
        expected.set_style(Rect::new(10, 0, 28, 5), consts::LOGO_MUSIC_STYLE);
        expected.set_style(Rect::new(38, 0, 32, 5), consts::LOGO_SNAKE_STYLE);
        expected.set_style(
            Rect::new(32, 6, 10, 1),
            Style::new().fg(consts::FALLBACK_BODY_COLOR),
        );
        expected.set_style(
            Rect::new(42, 6, 2, 1),
            consts::HEAD_STYLE.fg(consts::FALLBACK_HEAD_COLOR),
        );
        expected.set_style(
            Rect::new(46, 6, 2, 1),
            Style::new().fg(consts::FALLBACK_FOOD_COLOR),
        );
        for y in 9..12 {
            for x in [37, 39, 41, 43] {
                expected.set_style(Rect::new(x, y, 1, 1), consts::KEY_STYLE);
            }
        }
        expected.set_style(Rect::new(42, 16, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(42, 23, 1, 1), consts::KEY_STYLE);
    }

    fn render(menu: &MainMenu) -> Buffer {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        menu.render(area, &mut buffer);
        buffer
    }

    #[test]
    fn draw_initial() {
        let menu = menu_with(&Rc::new(StaticTracks::sample(6)));
        let mut expected = Buffer::with_lines(INITIAL_SCREEN);
        set_common_styles(&mut expected);
        expected.set_style(Rect::new(35, 16, 10, 1), consts::MENU_SELECTION_STYLE);
        assert_eq!(render(&menu), expected);
    }

    #[test]
    fn interact_options() {
        let provider = Rc::new(StaticTracks::sample(6));
        let mut menu = menu_with(&provider);
        assert!(menu.handle_event(key(KeyCode::Down)).is_none());
        assert!(menu.handle_event(key(KeyCode::Right)).is_none());
        let mut lines = INITIAL_SCREEN;
        lines[19] = "                           │ » Period  ◀ All time ▷ │                           ";
        let mut expected = Buffer::with_lines(lines);
        set_common_styles(&mut expected);
        expected.set_style(Rect::new(29, 19, 22, 1), consts::MENU_SELECTION_STYLE);
        assert_eq!(render(&menu), expected);

        assert!(menu.handle_event(key(KeyCode::Down)).is_none());
        assert!(menu.handle_event(key(KeyCode::Char(' '))).is_none());
        let mut lines = INITIAL_SCREEN;
        lines[19] = "                           │   Period  ◀ All time ▷ │                           ";
        lines[20] = "                           │ » Bounce      [ ]      │                           ";
        let mut expected = Buffer::with_lines(lines);
        set_common_styles(&mut expected);
        expected.set_style(Rect::new(29, 20, 22, 1), consts::MENU_SELECTION_STYLE);
        assert_eq!(render(&menu), expected);

        assert!(matches!(
            menu.handle_event(key(KeyCode::Char('p'))),
            Some(Screen::Game(_))
        ));
        assert_eq!(
            menu.globals.options,
            Options {
                period: Period::Overall,
                bounce: false,
            }
        );
    }

    #[test]
    fn navigate_wraps_around() {
        let mut menu = menu_with(&Rc::new(StaticTracks::sample(6)));
        menu.handle_event(key(KeyCode::BackTab));
        assert_eq!(menu.selection, Selection::QuitButton);
        menu.handle_event(key(KeyCode::Up));
        assert_eq!(menu.selection, Selection::Options);
        assert_eq!(menu.options.selection, Some(OptKey::Bounce));
        menu.handle_event(key(KeyCode::Up));
        menu.handle_event(key(KeyCode::Up));
        assert_eq!(menu.selection, Selection::PlayButton);
        assert_eq!(menu.options.selection, None);
        assert!(menu.handle_event(key(KeyCode::End)).is_none());
        assert!(matches!(
            menu.handle_event(key(KeyCode::Enter)),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn failed_start_shows_warning() {
        let provider = Rc::new(StaticTracks::sample(3));
        let mut menu = menu_with(&provider);
        assert!(menu.handle_event(key(KeyCode::Char('p'))).is_none());
        assert!(menu.warning.is_some());
        let buffer = render(&menu);
        let text = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert!(text.contains(" WARNING "));
        assert!(text.contains("Failed to load tracks"));
        assert!(text.contains("[Retry (r)]  [OK]"));

        // While the warning is up, menu keys go to it
        assert!(menu.handle_event(key(KeyCode::Char('q'))).is_none());
        assert!(menu.handle_event(key(KeyCode::Char('r'))).is_none());
        assert_eq!(provider.fetches.get(), 2);
        assert!(menu.warning.is_some());
        assert!(menu.handle_event(key(KeyCode::Enter)).is_none());
        assert!(menu.warning.is_none());
        assert_eq!(menu.selection, Selection::PlayButton);
    }
}
