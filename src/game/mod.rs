mod board;
mod direction;
mod level;
mod levels;
mod paused;
mod scoring;
mod snake;
use self::direction::Direction;
pub(crate) use self::level::Level;
use self::level::StepOutcome;
pub(crate) use self::levels::LevelSet;
use self::paused::{PauseOpt, Paused};
use self::scoring::Scoring;
use crate::command::Command;
use crate::config::GameConfig;
use crate::consts;
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
use std::time::{Duration, Instant};

/// One play-through of a single level
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    level: Level,
    scoring: Scoring,
    state: GameState,
    /// Where the snake's head hit something, once it has died
    collision: Option<Position>,
    info: LevelInfo,
    settings: GameConfig,
    /// Time spent running since the snake last moved
    elapsed: Duration,
    /// When the clock was last read.  `None` while the game is stopped.
    last_frame: Option<Instant>,
    /// Set when the level ends in play and the game should move on without
    /// waiting for a key
    pending: Option<Transition>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(level: Level, info: LevelInfo, settings: GameConfig) -> Self {
        Game::new_with_rng(level, info, settings, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(
        mut level: Level,
        info: LevelInfo,
        settings: GameConfig,
        mut rng: R,
    ) -> Game<R> {
        debug!("Map of level {:?}:\n{}", info.name, level.to_map());
        let state = if level.spawn_apple(&mut rng).is_some() {
            GameState::Running
        } else {
            info!("Level {:?} has no room for an apple", info.name);
            GameState::Cleared
        };
        Game {
            rng,
            level,
            scoring: Scoring::new(settings.initial_delay, settings.min_delay),
            state,
            collision: None,
            info,
            settings,
            elapsed: Duration::ZERO,
            last_frame: None,
            pending: None,
        }
    }

    /// Wait for either the next tick or the next input event, whichever comes
    /// first, and act on it.  Returns `Some` when the level is over.
    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Transition>> {
        if let Some(transition) = self.pending.take() {
            return Ok(Some(transition));
        }
        if !self.running() {
            self.last_frame = None;
            return Ok(self.handle_event(read()?));
        }
        self.clock();
        let wait = self.scoring.delay().saturating_sub(self.elapsed);
        if self.running() && poll(wait)? {
            let event = read()?;
            self.clock();
            Ok(self.handle_event(event))
        } else {
            self.clock();
            Ok(self.pending.take())
        }
    }

    /// Count the time since the last reading of the clock towards the current
    /// tick
    fn clock(&mut self) {
        let now = Instant::now();
        if let Some(prev) = self.last_frame.replace(now) {
            self.elapse(now.saturating_duration_since(prev));
        }
    }

    /// Let `dt` of running time pass, moving the snake if the current tick is
    /// up
    fn elapse(&mut self, dt: Duration) {
        if !self.running() {
            return;
        }
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.scoring.delay() {
            self.elapsed = Duration::ZERO;
            self.advance();
        }
    }

    fn advance(&mut self) {
        match self.level.step(&mut self.rng) {
            StepOutcome::Continue => (),
            StepOutcome::AteApple => {
                self.scoring.apple_eaten();
                debug!(
                    "Ate an apple; length {}, score {}, delay {:?}",
                    self.level.snake().len(),
                    self.scoring.score(),
                    self.scoring.delay()
                );
            }
            StepOutcome::Filled => {
                self.scoring.apple_eaten();
                info!(
                    "Cleared level {:?} with score {}",
                    self.info.name,
                    self.scoring.score()
                );
                self.finish(GameState::Cleared);
            }
            StepOutcome::Died(collision) => {
                info!(
                    "Snake died on level {:?} ({collision:?}) with score {}",
                    self.info.name,
                    self.scoring.score()
                );
                self.collision = Some(
                    collision
                        .position()
                        .unwrap_or_else(|| self.level.snake().head()),
                );
                self.finish(GameState::Dead);
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    fn handle_event(&mut self, event: Event) -> Option<Transition> {
        match self.state {
            GameState::Running => {
                if event == Event::FocusLost {
                    self.pause();
                } else {
                    match Command::from_key_event(event.as_key_press_event()?)? {
                        Command::Quit | Command::Q => return Some(Transition::Quit),
                        Command::Up => self.level.set_heading(Direction::Up),
                        Command::Down => self.level.set_heading(Direction::Down),
                        Command::Left => self.level.set_heading(Direction::Left),
                        Command::Right => self.level.set_heading(Direction::Right),
                        Command::Pause => self.pause(),
                        _ => (),
                    }
                }
            }
            GameState::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => {
                    debug!("Resumed");
                    self.state = GameState::Running;
                }
                PauseOpt::Restart => return Some(Transition::Restart),
                PauseOpt::NextLevel => return Some(Transition::NextLevel),
                PauseOpt::Quit => return Some(Transition::Quit),
            },
            GameState::Dead | GameState::Cleared => {
                match Command::from_key_event(event.as_key_press_event()?)? {
                    Command::Enter | Command::N => return Some(Transition::NextLevel),
                    Command::R => return Some(Transition::Restart),
                    Command::Quit | Command::Q => return Some(Transition::Quit),
                    _ => (),
                }
            }
        }
        None
    }

    fn running(&self) -> bool {
        self.state == GameState::Running
    }

    fn pause(&mut self) {
        debug!("Paused");
        self.stop(GameState::Paused(Paused::new()));
    }

    fn stop(&mut self, state: GameState) {
        self.state = state;
        self.last_frame = None;
    }

    /// End the level after the snake has died or filled the board
    fn finish(&mut self, state: GameState) {
        self.stop(state);
        if !self.settings.pause_on_death {
            self.pending = Some(Transition::NextLevel);
        }
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
            format!(
                " Level {}/{}: {} | Score: {}",
                self.info.number,
                self.info.total,
                self.info.name,
                self.scoring.score()
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let mut block_size = self.level.size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(block_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for &pos in self.level.board().walls() {
            canvas.draw_cell(pos, consts::WALL_SYMBOL, consts::WALL_STYLE);
        }
        if let Some(pos) = self.level.board().apple() {
            canvas.draw_cell(pos, consts::APPLE_SYMBOL, consts::APPLE_STYLE);
        }
        let snake = self.level.snake();
        for pos in snake.segments().skip(1) {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        canvas.draw_cell(
            snake.head(),
            snake.heading().head_symbol(),
            consts::SNAKE_STYLE,
        );
        // Drawn last so that it covers whatever the snake ran into
        if let Some(pos) = self.collision {
            canvas.draw_cell(pos, consts::COLLISION_SYMBOL, consts::COLLISION_STYLE);
        }

        let ending = match self.state {
            GameState::Running => None,
            GameState::Paused(paused) => {
                let pause_area = center_rect(
                    display,
                    Size {
                        width: Paused::WIDTH,
                        height: Paused::HEIGHT,
                    },
                );
                paused.render(pause_area, buf);
                None
            }
            GameState::Dead => Some(" GAME OVER"),
            GameState::Cleared => Some(" LEVEL CLEARED"),
        };
        if let Some(msg) = ending {
            Span::from(msg).render(msg1_area, buf);
            Line::from_iter([
                Span::raw(" Next Level ("),
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(") · Restart ("),
                Span::styled("r", consts::KEY_STYLE),
                Span::raw(") · Quit ("),
                Span::styled("q", consts::KEY_STYLE),
                Span::raw(")"),
            ])
            .render(msg2_area, buf);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` at `pos` relative to the canvas.  Positions outside the
    /// canvas are skipped.
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Which level is being played, for display
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LevelInfo {
    pub(crate) name: String,
    /// 1-based
    pub(crate) number: usize,
    pub(crate) total: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    Paused(Paused),
    Dead,
    /// The snake has filled the board and there is no room for another
    /// apple.
    Cleared,
}

/// What to do once a `Game` is over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Transition {
    /// Play the same level again from the start
    Restart,
    NextLevel,
    Quit,
}
