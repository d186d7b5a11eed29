use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A key press, reduced to what the interface cares about
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    Home,
    End,
    Next,
    Prev,
    P,
    Q,
    R,
    M,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::SHIFT, KeyCode::Char('W')) => Some(Command::Up),
            (KeyModifiers::SHIFT, KeyCode::Char('S')) => Some(Command::Down),
            (KeyModifiers::SHIFT, KeyCode::Char('A')) => Some(Command::Left),
            (KeyModifiers::SHIFT, KeyCode::Char('D')) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (_, KeyCode::Home) => Some(Command::Home),
            (_, KeyCode::End) => Some(Command::End),
            (_, KeyCode::Tab) => Some(Command::Next),
            (_, KeyCode::BackTab) => Some(Command::Prev),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Some(Command::Quit))]
    #[case(KeyEvent::from(KeyCode::Up), Some(Command::Up))]
    #[case(KeyEvent::from(KeyCode::Char('w')), Some(Command::Up))]
    #[case(KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT), Some(Command::Up))]
    #[case(KeyEvent::from(KeyCode::Char('k')), Some(Command::Up))]
    #[case(KeyEvent::from(KeyCode::Char('j')), Some(Command::Down))]
    #[case(KeyEvent::from(KeyCode::Char('h')), Some(Command::Left))]
    #[case(KeyEvent::from(KeyCode::Char('d')), Some(Command::Right))]
    #[case(KeyEvent::from(KeyCode::Char('c')), None)]
    #[case(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL), None)]
    #[case(KeyEvent::from(KeyCode::Char('r')), Some(Command::R))]
    #[case(KeyEvent::from(KeyCode::Esc), Some(Command::Esc))]
    fn from_key_event(#[case] ev: KeyEvent, #[case] cmd: Option<Command>) {
        assert_eq!(Command::from_key_event(ev), cmd);
    }
}
