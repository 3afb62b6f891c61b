mod paused;
use self::paused::{PauseOpt, Paused};
use crate::clock::Clock;
use crate::command::{Command, KeyMap};
use crate::config::Config;
use crate::consts;
use crate::engine::{Cell, CellState, CollisionKind, Engine, EngineError, GameState, Heading, Step};
use crate::util::{center_rect, get_display_area};
use crossterm::event::{poll, read, Event};
use log::{debug, info};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::io;
use std::time::Instant;

/// What the application should do after the game screen has handled a round
/// of input
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Control {
    Continue,
    Quit,
}

/// The game screen: drives an [`Engine`] from the keyboard and a [`Clock`]
/// and draws it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    engine: Engine<R>,
    clock: Clock,
    keymap: KeyMap,
    phase: Phase,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: &Config) -> Result<Self, EngineError> {
        Game::new_with_rng(config, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(config: &Config, rng: R) -> Result<Game<R>, EngineError> {
        Ok(Game {
            engine: Engine::new_with_rng(config.engine_config(), rng)?,
            clock: Clock::new(config.tick_period()),
            keymap: KeyMap::new(config.keys.clone()),
            phase: Phase::Ready,
        })
    }

    /// Wait for either the next tick or the next input event, whichever
    /// comes first, and handle it
    pub(crate) fn process_input(&mut self) -> io::Result<Control> {
        let now = Instant::now();
        if let Some(wait) = self.clock.wait(now) {
            if self.clock.due(now) || !poll(wait)? {
                self.tick(Instant::now());
                return Ok(Control::Continue);
            }
        }
        let event = read()?;
        self.handle_event(event, Instant::now())
    }

    fn tick(&mut self, now: Instant) {
        match self.engine.step() {
            Some(Step::Moved { .. } | Step::AteFood { .. }) => self.clock.fire(now),
            Some(Step::GameOver(_) | Step::Won { .. }) | None => {
                self.clock.stop();
                self.phase = Phase::Over;
            }
        }
    }

    fn handle_event(&mut self, event: Event, now: Instant) -> io::Result<Control> {
        match self.phase {
            Phase::Ready => match self.command(&event) {
                Some(Command::Enter | Command::Space) => self.play(now),
                Some(Command::Q | Command::Quit) => return Ok(Control::Quit),
                Some(cmd) => {
                    // Steering keys start the game too, heading that way
                    if let Ok(heading) = Heading::try_from(cmd) {
                        self.engine.request_heading(heading);
                        self.play(now);
                    }
                }
                None => (),
            },
            Phase::Playing => {
                if event == Event::FocusLost {
                    self.pause();
                } else if let Some(cmd) = self.command(&event) {
                    match Heading::try_from(cmd) {
                        Ok(heading) => {
                            if !self.engine.request_heading(heading) {
                                debug!("Ignoring request to reverse to {heading}");
                            }
                        }
                        Err(_) => match cmd {
                            Command::Esc | Command::P => self.pause(),
                            Command::Q | Command::Quit => return Ok(Control::Quit),
                            _ => (),
                        },
                    }
                }
            }
            Phase::Paused(ref mut paused) => match paused.handle_event(event, &self.keymap) {
                Some(PauseOpt::Resume) => self.play(now),
                Some(PauseOpt::Restart) => self.restart(now)?,
                Some(PauseOpt::Quit) => return Ok(Control::Quit),
                None => (),
            },
            Phase::Over => match self.command(&event) {
                Some(Command::R | Command::Enter | Command::Space) => self.restart(now)?,
                Some(Command::Q | Command::Quit) => return Ok(Control::Quit),
                _ => (),
            },
        }
        Ok(Control::Continue)
    }

    fn restart(&mut self, now: Instant) -> io::Result<()> {
        self.engine.start_run().map_err(io::Error::other)?;
        self.clock.stop();
        self.play(now);
        Ok(())
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn command(&self, event: &Event) -> Option<Command> {
        self.keymap.command(event.as_key_press_event()?)
    }

    fn play(&mut self, now: Instant) {
        self.phase = Phase::Playing;
        self.clock.start(now);
    }

    fn pause(&mut self) {
        info!("Game paused");
        self.clock.stop();
        self.phase = Phase::Paused(Paused::new());
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, block_area, msg1_area, msg2_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(
            format!(" Score: {}", self.engine.score()),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let board_size = self.engine.grid().size();
        let block_size = Size {
            width: board_size
                .saturating_mul(consts::CELL_WIDTH)
                .saturating_add(2),
            height: board_size.saturating_add(2),
        };
        let block_area = center_rect(block_area, block_size);
        if self.engine.config().wraparound {
            DottedBorder.render(block_area, buf);
        } else {
            Block::bordered().render(block_area, buf);
        }

        let mut board = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for (cell, state) in self.engine.grid().cells() {
            if state == CellState::Body {
                board.draw_cell(cell, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
            }
        }
        if let Some(food) = self.engine.food() {
            board.draw_cell(food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        let snake = self.engine.snake();
        board.draw_cell(
            snake.head(),
            head_symbol(snake.heading()),
            consts::SNAKE_STYLE,
        );
        if let GameState::GameOver(collision) = self.engine.state() {
            let mark = match collision.kind {
                CollisionKind::Boundary => snake.head(),
                CollisionKind::SelfCollision => collision.cell,
            };
            board.draw_cell(mark, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }

        match self.phase {
            Phase::Ready => {
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("Enter", consts::KEY_STYLE),
                    Span::raw(" or "),
                    Span::styled("Space", consts::KEY_STYLE),
                    Span::raw(" to start"),
                ])
                .render(msg1_area, buf);
                controls_line().render(msg2_area, buf);
            }
            Phase::Playing => controls_line().render(msg2_area, buf),
            Phase::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
            }
            Phase::Over => {
                if self.engine.state() == GameState::Won {
                    Span::from(" — YOU WIN —").render(msg1_area, buf);
                } else {
                    Span::from(" — GAME OVER —").render(msg1_area, buf);
                }
                Line::from_iter([
                    Span::raw(" Choose One: Restart ("),
                    Span::styled("r", consts::KEY_STYLE),
                    Span::raw(") — Quit ("),
                    Span::styled("q", consts::KEY_STYLE),
                    Span::raw(")"),
                ])
                .render(msg2_area, buf);
            }
        }
    }
}

fn controls_line() -> Line<'static> {
    Line::from_iter([
        Span::raw(" Steer with the arrow keys — Pause ("),
        Span::styled("p", consts::KEY_STYLE),
        Span::raw(") — Quit ("),
        Span::styled("q", consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

/// The head glyph points back along the snake, away from where it's going
fn head_symbol(heading: Heading) -> char {
    match heading {
        Heading::Up => consts::SNAKE_HEAD_UP_SYMBOL,
        Heading::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
        Heading::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
        Heading::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_char(&mut self, pos: Position, symbol: char) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
        }
    }

    /// Draw a board cell, which spans [`consts::CELL_WIDTH`] columns with the
    /// symbol in the leftmost one.  Cells outside the canvas are skipped.
    fn draw_cell(&mut self, cell: Cell, symbol: char, style: Style) {
        let (Ok(row), Ok(col)) = (u16::try_from(cell.row), u16::try_from(cell.col)) else {
            return;
        };
        let Some(x) = col
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(row) else {
            return;
        };
        if !self.area.contains(Position { x, y }) {
            return;
        }
        if let Some(c) = self.buf.cell_mut((x, y)) {
            c.set_char(symbol);
            c.set_style(Style::reset().patch(style));
        }
    }
}

/// A border drawn around the board when the snake can wrap through the edges
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let size = area.as_size();
        let max_x = size.width.saturating_sub(1);
        let max_y = size.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        canvas.draw_char(Position::ORIGIN, '·');
        canvas.draw_char(Position::new(max_x, 0), '·');
        canvas.draw_char(Position::new(max_x, max_y), '·');
        canvas.draw_char(Position::new(0, max_y), '·');
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    /// A run has been set up but the clock hasn't been started yet
    Ready,
    Playing,
    Paused(Paused),
    /// The run ended in either a collision or a full board
    Over,
}
