use crate::tracks::Period;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use serde::Deserialize;
use std::fmt;

/// Gameplay options adjustable from the main menu
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    /// Listening period from which tracks are drawn
    pub(crate) period: Period,

    /// Whether the snake bounces when it eats
    pub(crate) bounce: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            period: Period::default(),
            bounce: true,
        }
    }
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Period => self.period.into(),
            OptKey::Bounce => self.bounce.into(),
        }
    }

    /// Set the option `key` to `value`.  A value of the wrong kind for the key
    /// is ignored.
    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match (key, value) {
            (OptKey::Period, OptValue::Period(p)) => self.period = p,
            (OptKey::Bounce, OptValue::Bool(b)) => self.bounce = b,
            _ => debug_assert!(false, "Options::set({key:?}, {value:?}): mismatched kinds"),
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Period,
    Bounce,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 6;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Period => "Period",
            OptKey::Bounce => "Bounce",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    Period,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 12;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "    [ ]     "),
            OptValue::Bool(true) => write!(f, "    [✓]     "),
            OptValue::Period(p) => {
                write!(
                    f,
                    "{left} {p:^8} {right}",
                    left = if p.can_decrease() { '◀' } else { '◁' },
                    right = if p.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}
