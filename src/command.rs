use crate::engine::{Heading, IllegalHeading};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::BTreeMap;

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
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
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
            _ => None,
        }
    }
}

impl From<Heading> for Command {
    fn from(heading: Heading) -> Command {
        match heading {
            Heading::Up => Command::Up,
            Heading::Down => Command::Down,
            Heading::Left => Command::Left,
            Heading::Right => Command::Right,
        }
    }
}

impl TryFrom<Command> for Heading {
    type Error = IllegalHeading;

    fn try_from(cmd: Command) -> Result<Heading, IllegalHeading> {
        match cmd {
            Command::Up => Ok(Heading::Up),
            Command::Down => Ok(Heading::Down),
            Command::Left => Ok(Heading::Left),
            Command::Right => Ok(Heading::Right),
            other => Err(IllegalHeading(format!("{other:?}"))),
        }
    }
}

/// Translates key presses into commands, with optional extra user-defined
/// keys for steering the snake
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct KeyMap {
    steering: BTreeMap<char, Heading>,
}

impl KeyMap {
    pub(crate) fn new(steering: BTreeMap<char, Heading>) -> KeyMap {
        KeyMap { steering }
    }

    /// Look up the command for a key press.  User-defined steering keys take
    /// precedence over the built-in bindings.
    ///
    /// Terminals report uppercase letters and shifted symbols with `SHIFT`
    /// set, so steering keys match with or without it.
    pub(crate) fn command(&self, ev: KeyEvent) -> Option<Command> {
        if let KeyCode::Char(c) = ev.code {
            if (KeyModifiers::NONE | KeyModifiers::SHIFT).contains(ev.modifiers) {
                if let Some(&heading) = self.steering.get(&c) {
                    return Some(Command::from(heading));
                }
            }
        }
        Command::from_key_event(ev)
    }
}
