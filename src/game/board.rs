use super::snake::Snake;
use crate::consts;
use ratatui::layout::{Position, Positions, Rect, Size};
use std::collections::{HashSet, VecDeque};
use thiserror::Error;

/// What occupies a single cell of a level
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) enum Cell {
    #[default]
    Empty,
    Wall,
    Snake,
    Apple,
}

impl Cell {
    fn from_map_char(ch: char) -> Option<Cell> {
        match ch {
            consts::MAP_EMPTY => Some(Cell::Empty),
            consts::MAP_WALL => Some(Cell::Wall),
            consts::MAP_SNAKE => Some(Cell::Snake),
            _ => None,
        }
    }

    /// Return the character used for this cell in a level map.  Apples are
    /// never recorded in maps and are written as empty cells.
    pub(super) fn map_char(self) -> char {
        match self {
            Cell::Empty | Cell::Apple => consts::MAP_EMPTY,
            Cell::Wall => consts::MAP_WALL,
            Cell::Snake => consts::MAP_SNAKE,
        }
    }
}

/// The fixed layout of a level plus the current apple.  Snake segments are
/// not stored here; the snake is the only record of where it is.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Board {
    pub(super) size: Size,
    pub(super) walls: HashSet<Position>,
    pub(super) apple: Option<Position>,
}

impl Board {
    /// Parse a level map into a board and the snake starting on it.
    ///
    /// Each line of `src` is a row of the grid.  A space is an empty cell,
    /// `X` is a wall, and `S` is a segment of the snake.  Snake segments are
    /// collected in reading order, so the first `S` is the head.
    pub(super) fn parse(src: &str) -> Result<(Board, Snake), ParseError> {
        let mut width = None;
        let mut height = 0;
        let mut walls = HashSet::new();
        let mut segments = VecDeque::new();
        for (y, line) in src.lines().enumerate() {
            let mut row_width = 0;
            for (x, ch) in line.chars().enumerate() {
                let cell = Cell::from_map_char(ch).ok_or(ParseError::UnknownCell {
                    line: y + 1,
                    column: x + 1,
                    ch,
                })?;
                let pos = Position::new(
                    to_coord(x, consts::MAX_LEVEL_SIZE.width)?,
                    to_coord(y, consts::MAX_LEVEL_SIZE.height)?,
                );
                match cell {
                    Cell::Wall => {
                        walls.insert(pos);
                    }
                    Cell::Snake => segments.push_back(pos),
                    Cell::Empty | Cell::Apple => (),
                }
                row_width += 1;
            }
            match width {
                None if row_width == 0 => return Err(ParseError::Empty),
                None => width = Some(row_width),
                Some(expected) if expected != row_width => {
                    return Err(ParseError::RaggedRow {
                        line: y + 1,
                        width: row_width,
                        expected,
                    })
                }
                Some(_) => (),
            }
            height += 1;
        }
        let width = width.ok_or(ParseError::Empty)?;
        let snake = Snake::new(segments).ok_or(ParseError::NoSnake)?;
        let board = Board {
            size: Size::new(dimension(width)?, dimension(height)?),
            walls,
            apple: None,
        };
        Ok((board, snake))
    }

    pub(super) fn size(&self) -> Size {
        self.size
    }

    pub(super) fn walls(&self) -> &HashSet<Position> {
        &self.walls
    }

    pub(super) fn apple(&self) -> Option<Position> {
        self.apple
    }

    /// Iterate over every position on the board in row-major order
    pub(super) fn positions(&self) -> Positions {
        Rect::from((Position::ORIGIN, self.size)).positions()
    }
}

/// Convert an index along a row or column to a coordinate, failing if it
/// falls outside the play area
fn to_coord(i: usize, limit: u16) -> Result<u16, ParseError> {
    u16::try_from(i)
        .ok()
        .filter(|&c| c < limit)
        .ok_or(ParseError::TooLarge)
}

fn dimension(i: usize) -> Result<u16, ParseError> {
    u16::try_from(i).map_err(|_| ParseError::TooLarge)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ParseError {
    #[error("level map is empty")]
    Empty,
    #[error("level map does not contain a snake")]
    NoSnake,
    #[error("line {line} is {width} cells wide, but the first line is {expected} cells wide")]
    RaggedRow {
        line: usize,
        width: usize,
        expected: usize,
    },
    #[error("unrecognized character {ch:?} at line {line}, column {column}")]
    UnknownCell { line: usize, column: usize, ch: char },
    #[error(
        "level map does not fit in the {}x{} play area",
        consts::MAX_LEVEL_SIZE.width,
        consts::MAX_LEVEL_SIZE.height
    )]
    TooLarge,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parse_simple() {
        let (board, snake) = Board::parse("XXXXX\nX S X\nX S X\nXXXXX\n").unwrap();
        assert_eq!(board.size(), Size::new(5, 4));
        assert_eq!(board.walls().len(), 14);
        assert!(board.walls().contains(&Position::new(0, 1)));
        assert!(!board.walls().contains(&Position::new(1, 1)));
        assert_eq!(board.apple(), None);
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Position::new(2, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn snake_in_reading_order() {
        let (_, snake) = Board::parse("  S\nSS \n").unwrap();
        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            [Position::new(2, 0), Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn crlf_line_endings() {
        let (board, snake) = Board::parse("X X\r\nXSX\r\n").unwrap();
        assert_eq!(board.size(), Size::new(3, 2));
        assert_eq!(snake.head(), Position::new(1, 1));
    }

    #[test]
    fn trailing_spaces_count() {
        let (board, _) = Board::parse("S  \n   \n").unwrap();
        assert_eq!(board.size(), Size::new(3, 2));
    }

    #[test]
    fn positions_cover_board() {
        let (board, _) = Board::parse("S  \n   \n").unwrap();
        let positions = board.positions().collect::<Vec<_>>();
        assert_eq!(positions.len(), 6);
        assert_eq!(positions.first(), Some(&Position::new(0, 0)));
        assert_eq!(positions.last(), Some(&Position::new(2, 1)));
    }

    #[rstest]
    #[case("", ParseError::Empty)]
    #[case("\n", ParseError::Empty)]
    #[case("XXX\nX X\nXXX\n", ParseError::NoSnake)]
    #[case(
        "XXX\nXS\nXXX\n",
        ParseError::RaggedRow { line: 2, width: 2, expected: 3 }
    )]
    #[case(
        "XXX\nXSX\nXXX\n\n",
        ParseError::RaggedRow { line: 4, width: 0, expected: 3 }
    )]
    #[case(
        "XXX\nXSX\nX.X\n",
        ParseError::UnknownCell { line: 3, column: 2, ch: '.' }
    )]
    #[case(
        "XXX\nXSX\nXAX\n",
        ParseError::UnknownCell { line: 3, column: 2, ch: 'A' }
    )]
    #[case(
        "XXX\nXsX\nXXX\n",
        ParseError::UnknownCell { line: 2, column: 2, ch: 's' }
    )]
    fn parse_errors(#[case] src: &str, #[case] err: ParseError) {
        assert_eq!(Board::parse(src), Err(err));
    }

    #[test]
    fn largest_map() {
        let row = format!("S{}\n", " ".repeat(77));
        let src = row.repeat(19);
        let (board, _) = Board::parse(&src).unwrap();
        assert_eq!(board.size(), Size::new(78, 19));
    }

    #[test]
    fn too_wide() {
        let src = format!("S{}\n", " ".repeat(78));
        assert_eq!(Board::parse(&src), Err(ParseError::TooLarge));
    }

    #[test]
    fn too_tall() {
        let src = format!("S\n{}", " \n".repeat(19));
        assert_eq!(Board::parse(&src), Err(ParseError::TooLarge));
        assert_eq!(
            ParseError::TooLarge.to_string(),
            "level map does not fit in the 78x19 play area"
        );
    }

    #[test]
    fn map_chars() {
        assert_eq!(Cell::Empty.map_char(), ' ');
        assert_eq!(Cell::Wall.map_char(), 'X');
        assert_eq!(Cell::Snake.map_char(), 'S');
        assert_eq!(Cell::Apple.map_char(), ' ');
    }
}
