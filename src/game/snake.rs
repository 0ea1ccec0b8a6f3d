use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the level the snake is
/// on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The positions of all of the snake's segments, head first.  Never
    /// empty.
    segments: VecDeque<Position>,

    /// The direction in which the snake will move on the next tick
    heading: Direction,
}

impl Snake {
    /// Create a new snake from its segments, head first, heading right.
    /// Returns `None` if `segments` is empty.
    pub(super) fn new(segments: VecDeque<Position>) -> Option<Snake> {
        (!segments.is_empty()).then_some(Snake {
            segments,
            heading: Direction::default(),
        })
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.segments.front().copied().unwrap_or_default()
    }

    /// Return the position of the snake's last segment.  For a snake of
    /// length one, this is the head.
    pub(super) fn tail(&self) -> Position {
        self.segments.back().copied().unwrap_or_default()
    }

    pub(super) fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterate over the positions of the snake's segments, head first
    pub(super) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().copied()
    }

    pub(super) fn heading(&self) -> Direction {
        self.heading
    }

    /// Set the direction for the next tick.  The snake doesn't move until
    /// then.
    pub(super) fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    pub(super) fn push_head(&mut self, pos: Position) {
        self.segments.push_front(pos);
    }

    /// Remove and return the tail segment.  The last remaining segment is
    /// never removed.
    pub(super) fn pop_tail(&mut self) -> Option<Position> {
        if self.segments.len() > 1 {
            self.segments.pop_back()
        } else {
            None
        }
    }

    pub(super) fn push_tail(&mut self, pos: Position) {
        self.segments.push_back(pos);
    }

    /// Does any segment other than the tail occupy `pos`?
    ///
    /// The tail vacates its cell before the head moves on a tick, so this is
    /// the test for whether the head can move into `pos`.
    pub(super) fn blocks(&self, pos: Position) -> bool {
        // Segments never overlap, so only the tail itself is exempt.
        pos != self.tail() && self.contains(pos)
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(cells: &[(u16, u16)]) -> Snake {
        Snake::new(cells.iter().map(|&(x, y)| Position::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn empty_snake() {
        assert_eq!(Snake::new(VecDeque::new()), None);
    }

    #[test]
    fn head_and_tail() {
        let s = snake(&[(3, 1), (3, 2), (3, 3)]);
        assert_eq!(s.head(), Position::new(3, 1));
        assert_eq!(s.tail(), Position::new(3, 3));
        assert_eq!(s.len(), 3);
        assert_eq!(s.heading(), Direction::Right);
    }

    #[test]
    fn single_segment_tail_is_head() {
        let mut s = snake(&[(4, 4)]);
        assert_eq!(s.tail(), Position::new(4, 4));
        assert_eq!(s.pop_tail(), None);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn push_and_pop() {
        let mut s = snake(&[(3, 1), (3, 2)]);
        s.push_head(Position::new(4, 1));
        assert_eq!(s.pop_tail(), Some(Position::new(3, 2)));
        assert_eq!(
            s.segments().collect::<Vec<_>>(),
            [Position::new(4, 1), Position::new(3, 1)]
        );
        s.push_tail(Position::new(3, 2));
        assert_eq!(s.len(), 3);
        assert_eq!(s.tail(), Position::new(3, 2));
    }

    #[test]
    fn set_heading_does_not_move() {
        let mut s = snake(&[(3, 1), (3, 2)]);
        s.set_heading(Direction::Up);
        assert_eq!(s.heading(), Direction::Up);
        assert_eq!(s.head(), Position::new(3, 1));
    }

    #[test]
    fn tail_does_not_block() {
        let s = snake(&[(3, 1), (3, 2), (3, 3)]);
        assert!(s.blocks(Position::new(3, 1)));
        assert!(s.blocks(Position::new(3, 2)));
        assert!(!s.blocks(Position::new(3, 3)));
        assert!(s.contains(Position::new(3, 3)));
        assert!(!s.blocks(Position::new(0, 0)));
    }

    #[test]
    fn lone_head_blocks_nothing() {
        let s = snake(&[(4, 4)]);
        assert!(!s.blocks(Position::new(4, 4)));
    }
}
