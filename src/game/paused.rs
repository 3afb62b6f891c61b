use crate::command::{Command, KeyMap};
use crate::consts;
use crate::util::EnumExt;
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying a pause menu pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Paused {
    /// The currently-selected item in the pause menu
    selection: PauseOpt,
}

impl Paused {
    /// The height that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const HEIGHT: u16 = 5;

    /// The width that should be used for the `Rect` passed to
    /// `Paused::render()`
    pub(super) const WIDTH: u16 = 18;

    pub(super) fn new() -> Paused {
        Paused {
            selection: PauseOpt::min(),
        }
    }

    /// Handle an input event, translating keys with the game's `keymap` so
    /// that custom steering keys move the selection too.  Returns `Some` if
    /// the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event, keymap: &KeyMap) -> Option<PauseOpt> {
        match keymap.command(event.as_key_press_event()?)? {
            Command::Esc | Command::P => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter | Command::Space => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            Command::Home => self.selection = PauseOpt::min(),
            Command::End => self.selection = PauseOpt::max(),
            Command::Left | Command::Right => (),
        }
        None
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    Resume,
    /// Throw away the current run and start a new one
    Restart,
    Quit,
}

impl PauseOpt {
    /// Render the option as a `Line` for display in the pause menu
    fn to_line(self, selected: bool) -> Line<'static> {
        let (label, key) = match self {
            PauseOpt::Resume => ("Resume", "Esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::Quit => ("Quit", "q"),
        };
        let line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(label),
            Span::raw(" ("),
            Span::styled(key, consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for Paused {
    /*
     * ┌──── PAUSED ────┐
     * │ » Resume (Esc) │
     * │   Restart (r)  │
     * │   Quit (q)     │
     * └────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Heading;
    use crossterm::event::{KeyCode, KeyEvent};
    use rstest::rstest;
    use std::collections::BTreeMap;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[rstest]
    #[case(KeyCode::Esc, PauseOpt::Resume)]
    #[case(KeyCode::Char('p'), PauseOpt::Resume)]
    #[case(KeyCode::Char('r'), PauseOpt::Restart)]
    #[case(KeyCode::Char('q'), PauseOpt::Quit)]
    #[case(KeyCode::Enter, PauseOpt::Resume)]
    fn shortcuts(#[case] code: KeyCode, #[case] opt: PauseOpt) {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_event(key(code), &KeyMap::default()), Some(opt));
    }

    #[test]
    fn navigate_and_select() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_event(key(KeyCode::Down), &KeyMap::default()), None);
        assert_eq!(paused.handle_event(key(KeyCode::Down), &KeyMap::default()), None);
        assert_eq!(paused.handle_event(key(KeyCode::Down), &KeyMap::default()), None);
        assert_eq!(paused.selection, PauseOpt::Quit);
        assert_eq!(paused.handle_event(key(KeyCode::Tab), &KeyMap::default()), None);
        assert_eq!(paused.selection, PauseOpt::Resume);
        assert_eq!(paused.handle_event(key(KeyCode::BackTab), &KeyMap::default()), None);
        assert_eq!(paused.selection, PauseOpt::Quit);
        assert_eq!(paused.handle_event(key(KeyCode::Up), &KeyMap::default()), None);
        assert_eq!(paused.handle_event(key(KeyCode::Enter), &KeyMap::default()), Some(PauseOpt::Restart));
    }

    #[test]
    fn ignores_other_events() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_event(Event::FocusGained, &KeyMap::default()), None);
        assert_eq!(paused.handle_event(key(KeyCode::Char('z')), &KeyMap::default()), None);
        assert_eq!(paused.selection, PauseOpt::Resume);
    }

    #[test]
    fn custom_steering_keys_navigate() {
        let keymap = KeyMap::new(BTreeMap::from([('m', Heading::Down), ('i', Heading::Up)]));
        let mut paused = Paused::new();
        assert_eq!(paused.handle_event(key(KeyCode::Char('m')), &keymap), None);
        assert_eq!(paused.selection, PauseOpt::Restart);
        assert_eq!(paused.handle_event(key(KeyCode::Char('m')), &keymap), None);
        assert_eq!(paused.selection, PauseOpt::Quit);
        assert_eq!(paused.handle_event(key(KeyCode::Char('i')), &keymap), None);
        assert_eq!(paused.selection, PauseOpt::Restart);
        assert_eq!(
            paused.handle_event(key(KeyCode::Enter), &keymap),
            Some(PauseOpt::Restart)
        );
    }

    #[test]
    fn render() {
        let area = Rect::new(0, 0, Paused::WIDTH, Paused::HEIGHT);
        let mut buffer = Buffer::empty(area);
        Paused::new().render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌──── PAUSED ────┐",
            "│ » Resume (Esc) │",
            "│   Restart (r)  │",
            "│   Quit (q)     │",
            "└────────────────┘",
        ]);
        expected.set_style(area, Style::reset());
        expected.set_style(Rect::new(2, 1, 14, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(12, 1, 3, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(13, 2, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(10, 3, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
