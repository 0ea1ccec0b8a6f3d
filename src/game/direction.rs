use crate::consts;
use ratatui::layout::{Position, Size};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    /// Return the position one cell over from `pos` in this direction, or
    /// `None` if that would leave a grid of the given size.
    pub(super) fn advance(self, pos: Position, size: Size) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = y.checked_add(1).filter(|&yy| yy < size.height)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = x.checked_add(1).filter(|&xx| xx < size.width)?,
        }
        Some(Position { x, y })
    }

    /// Return the glyph to use for drawing the head of a snake moving in this
    /// direction
    pub(super) fn head_symbol(self) -> char {
        match self {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }
}
