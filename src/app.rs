use crate::game::{Control, Game};
use ratatui::{backend::Backend, Terminal};
use std::io;

#[derive(Clone, Debug)]
pub(crate) struct App {
    game: Game,
    quitting: bool,
}

impl App {
    pub(crate) fn new(game: Game) -> App {
        App {
            game,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| self.game.draw(frame))?;
            if self.game.process_input()? == Control::Quit {
                self.quitting = true;
            }
        }
        Ok(())
    }
}
