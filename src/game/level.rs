use super::board::{Board, Cell, ParseError};
use super::direction::Direction;
use super::snake::Snake;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Size};

/// A level in play: the board and the snake moving around on it
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Level {
    board: Board,
    snake: Snake,
}

impl Level {
    /// Parse a level map.  The resulting level has no apple on it yet.
    pub(crate) fn parse(src: &str) -> Result<Level, ParseError> {
        let (board, snake) = Board::parse(src)?;
        Ok(Level { board, snake })
    }

    pub(super) fn size(&self) -> Size {
        self.board.size()
    }

    pub(super) fn board(&self) -> &Board {
        &self.board
    }

    pub(super) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(super) fn set_heading(&mut self, heading: Direction) {
        self.snake.set_heading(heading);
    }

    /// Return what currently occupies `pos`.  Walls and the apple are
    /// looked up directly, but finding a snake segment means scanning the
    /// snake.
    pub(super) fn cell(&self, pos: Position) -> Cell {
        if self.board.walls.contains(&pos) {
            Cell::Wall
        } else if self.board.apple == Some(pos) {
            Cell::Apple
        } else if self.snake.contains(pos) {
            Cell::Snake
        } else {
            Cell::Empty
        }
    }

    /// Move the snake one cell in its current heading.
    ///
    /// The tail leaves its cell before the head arrives, so the head may move
    /// into the cell the tail is vacating.  If the snake dies, neither it nor
    /// the board is changed.
    pub(super) fn step<R: Rng>(&mut self, rng: &mut R) -> StepOutcome {
        let Some(new_head) = self
            .snake
            .heading()
            .advance(self.snake.head(), self.board.size)
        else {
            return StepOutcome::Died(Collision::OutOfBounds);
        };
        if self.board.walls.contains(&new_head) {
            return StepOutcome::Died(Collision::Wall(new_head));
        }
        if self.snake.blocks(new_head) {
            return StepOutcome::Died(Collision::Snake(new_head));
        }
        let ate = self.board.apple == Some(new_head);
        self.snake.push_head(new_head);
        let tail = self.snake.pop_tail();
        if !ate {
            return StepOutcome::Continue;
        }
        if let Some(tail) = tail {
            self.snake.push_tail(tail);
        }
        self.board.apple = None;
        if self.spawn_apple(rng).is_some() {
            StepOutcome::AteApple
        } else {
            StepOutcome::Filled
        }
    }

    /// Place an apple on a randomly-chosen empty cell and return its
    /// position.  Returns `None` if there are no empty cells left.
    pub(super) fn spawn_apple<R: Rng>(&mut self, rng: &mut R) -> Option<Position> {
        let spot = self
            .board
            .positions()
            .filter(|&p| self.cell(p) == Cell::Empty)
            .choose(rng);
        if spot.is_some() {
            self.board.apple = spot;
        }
        spot
    }

    /// Move the apple to `pos`, wherever it was spawned
    #[cfg(test)]
    pub(super) fn place_apple(&mut self, pos: Position) {
        self.board.apple = Some(pos);
    }

    /// Write the level back out as a map.  Every row, including the last, is
    /// terminated by a newline.  The apple is not included.
    pub(super) fn to_map(&self) -> String {
        let size = self.board.size;
        let mut s = String::with_capacity((usize::from(size.width) + 1) * usize::from(size.height));
        for y in 0..size.height {
            s.extend((0..size.width).map(|x| self.cell(Position::new(x, y)).map_char()));
            s.push('\n');
        }
        s
    }
}

/// The result of moving the snake one cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum StepOutcome {
    /// The snake moved into an empty cell.
    Continue,

    /// The snake ate the apple and a new one was placed.
    AteApple,

    /// The snake ate the apple and there is nowhere left to put a new one.
    Filled,

    /// The snake ran into something.
    Died(Collision),
}

/// What the snake ran into
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Collision {
    /// The snake tried to leave the grid.
    OutOfBounds,
    Wall(Position),
    Snake(Position),
}

impl Collision {
    /// Return the cell in which the collision happened, if it's on the grid
    pub(super) fn position(self) -> Option<Position> {
        match self {
            Collision::OutOfBounds => None,
            Collision::Wall(pos) | Collision::Snake(pos) => Some(pos),
        }
    }
}
