use crate::config::Config;
use crate::game::{Game, SessionParams};
use crate::menu::MainMenu;
use crate::options::Options;
use crate::tracks::{Library, TrackError, TrackProvider};
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::rc::Rc;
use tracing::info;

#[derive(Clone, Debug)]
pub(crate) struct App {
    screen: Screen,
}

impl App {
    pub(crate) fn new(globals: Globals) -> App {
        App {
            screen: Screen::Main(MainMenu::new(globals)),
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        match self.screen {
            Screen::Main(ref menu) => {
                terminal.draw(|frame| menu.draw(frame))?;
            }
            Screen::Game(ref mut game) => {
                terminal.draw(|frame| game.draw(frame))?;
            }
            Screen::Quit => (),
        }
        Ok(())
    }

    fn process_input(&mut self) -> io::Result<()> {
        let next = match self.screen {
            Screen::Main(ref mut menu) => menu.process_input()?,
            Screen::Game(ref mut game) => game.process_input()?,
            Screen::Quit => None,
        };
        if let Some(screen) = next {
            self.screen = screen;
        }
        Ok(())
    }

    fn quitting(&self) -> bool {
        matches!(self.screen, Screen::Quit)
    }
}

#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Main(MainMenu),
    Game(Game),
    Quit,
}

/// State that outlives individual screens
#[derive(Clone, Debug)]
pub(crate) struct Globals {
    pub(crate) config: Rc<Config>,
    pub(crate) options: Options,
    provider: Rc<dyn TrackProvider>,

    /// The most recently fetched tracks, reused for as long as the selected
    /// period stays the same
    library: Option<Rc<Library>>,
}

impl Globals {
    pub(crate) fn new(config: Rc<Config>, provider: Rc<dyn TrackProvider>) -> Globals {
        Globals {
            options: config.options,
            config,
            provider,
            library: None,
        }
    }

    /// Return the tracks for the currently-selected period, fetching them if
    /// needed
    pub(crate) fn library(&mut self) -> Result<Rc<Library>, TrackError> {
        let period = self.options.period;
        if let Some(lib) = self.library.as_ref().filter(|lib| lib.period() == period) {
            return Ok(Rc::clone(lib));
        }
        info!(%period, "Fetching tracks");
        let lib = Rc::new(Library::fetch(&*self.provider, period)?);
        self.library = Some(Rc::clone(&lib));
        Ok(lib)
    }

    pub(crate) fn session_params(&self) -> SessionParams {
        self.config.session_params(self.options.bounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracks::{Period, StaticTracks};

    #[test]
    fn library_is_cached_per_period() {
        let provider = Rc::new(StaticTracks::sample(6));
        let dyn_provider: Rc<dyn TrackProvider> = provider.clone();
        let mut globals = Globals::new(Rc::new(Config::default()), dyn_provider);
        let first = globals.library().unwrap();
        assert_eq!(first.len(), 6);
        let second = globals.library().unwrap();
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(provider.fetches.get(), 1);
        globals.options.period = Period::Week;
        let third = globals.library().unwrap();
        assert_eq!(third.period(), Period::Week);
        assert_eq!(provider.fetches.get(), 2);
    }

    #[test]
    fn fetch_failure_is_not_cached() {
        let provider = Rc::new(StaticTracks::sample(2));
        let dyn_provider: Rc<dyn TrackProvider> = provider.clone();
        let mut globals = Globals::new(Rc::new(Config::default()), dyn_provider);
        assert!(globals.library().is_err());
        assert!(globals.library().is_err());
        assert_eq!(provider.fetches.get(), 2);
    }

    #[test]
    fn session_params_follow_options() {
        let provider: Rc<dyn TrackProvider> = Rc::new(StaticTracks::sample(6));
        let mut globals = Globals::new(Rc::new(Config::default()), provider);
        assert!(globals.session_params().physics.is_some());
        globals.options.bounce = false;
        assert!(globals.session_params().physics.is_none());
    }
}
