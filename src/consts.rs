//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Default time between movements of the snake at the start of a level
pub(crate) const INITIAL_DELAY: Duration = Duration::from_millis(220);

/// Default lower bound on the time between movements of the snake
pub(crate) const MIN_DELAY: Duration = Duration::from_millis(30);

/// Eating an apple multiplies the delay by `SPEEDUP_NUMERATOR /
/// SPEEDUP_DENOMINATOR`.
pub(crate) const SPEEDUP_NUMERATOR: u32 = 9;

/// Cf. [`SPEEDUP_NUMERATOR`]
pub(crate) const SPEEDUP_DENOMINATOR: u32 = 10;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// The largest level map that can be drawn: the display minus the score bar,
/// the two message lines, and the border around the map
pub(crate) const MAX_LEVEL_SIZE: Size = Size {
    width: DISPLAY_SIZE.width - 2,
    height: DISPLAY_SIZE.height - 5,
};

/// Map character for an empty cell
pub(crate) const MAP_EMPTY: char = ' ';

/// Map character for a wall
pub(crate) const MAP_WALL: char = 'X';

/// Map character for a segment of the snake's starting body
pub(crate) const MAP_SNAKE: char = 'S';

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the apple
pub(crate) const APPLE_SYMBOL: char = '●';

/// Glyph for walls
pub(crate) const WALL_SYMBOL: char = '█';

/// Glyph drawn where the snake's head collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the apple
pub(crate) const APPLE_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for walls
pub(crate) const WALL_STYLE: Style = Style::new().fg(Color::Gray);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
