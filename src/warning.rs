use crate::command::Command;
use crate::consts;
use crate::util::center_rect;
use crossterm::event::read;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;
use std::error::Error;

/// A pop-up explaining why a level could not be played
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: usize = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    /// Wait for a keypress and report what the user chose, if anything
    pub(crate) fn process_input() -> std::io::Result<Option<WarningOutcome>> {
        Ok(read()?
            .as_key_press_event()
            .and_then(Command::from_key_event)
            .and_then(Warning::handle_command))
    }

    fn handle_command(cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Enter | Command::N => Some(WarningOutcome::Dismissed),
            Command::Quit | Command::Q => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    /// Lay out an error message followed by its causes, wrapped to fit the
    /// pop-up.  Lines past the height of the pop-up are dropped.
    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let mut lines = Vec::new();
        if let Some(first) = msgs.next() {
            wrap_into(&mut lines, &first, "", "");
        }
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
        }
        if let [cause] = causes.as_slice() {
            wrap_into(&mut lines, cause, "    ", "    ");
        } else {
            for (i, cause) in causes.iter().enumerate() {
                wrap_into(&mut lines, cause, &format!("{i:>5}: "), "       ");
            }
        }
        lines.truncate(Warning::MAX_LINES);
        Warning { lines }
    }
}

fn wrap_into(lines: &mut Vec<String>, text: &str, first_indent: &str, indent: &str) {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(first_indent)
        .subsequent_indent(indent);
    lines.extend(textwrap::wrap(text, opts).into_iter().map(Cow::into_owned));
}

/// Return the message of `e` followed by those of each of its sources
pub(crate) fn error_chain(e: &dyn Error) -> Vec<String> {
    let mut msgs = vec![e.to_string()];
    let mut source = e.source();
    while let Some(src) = source {
        msgs.push(src.to_string());
        source = src.source();
    }
    msgs
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    /// Move on to the next level
    Dismissed,
    Quit,
}

impl<E: Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        Warning::from_error_messages(error_chain(&e))
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" CANNOT LOAD LEVEL ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, keys_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from_iter([
            Span::raw("Skip ("),
            Span::styled("Enter", consts::KEY_STYLE),
            Span::raw(")  Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .centered()
        .render(keys_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::LevelSet;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rstest::rstest;

    fn row(middle: &str) -> String {
        format!("{:14}│ {middle:48} │{:14}", "", "")
    }

    fn expected(top: u16, text: &[&str]) -> Buffer {
        let mut lines = vec![String::new(); usize::from(top)];
        lines.push(format!(
            "{:14}┌{} CANNOT LOAD LEVEL {}┐{:14}",
            "",
            "─".repeat(15),
            "─".repeat(16),
            ""
        ));
        lines.extend(text.iter().map(|s| row(s)));
        lines.push(row(""));
        lines.push(row("             Skip (Enter)  Quit (q)"));
        lines.push(format!("{:14}└{}┘{:14}", "", "─".repeat(50), ""));
        lines.resize(24, String::new());
        let mut buffer = Buffer::with_lines(lines);
        let keys_row = top + u16::try_from(text.len()).unwrap() + 2;
        buffer.set_style(Rect::new(35, keys_row, 5, 1), consts::KEY_STYLE);
        buffer.set_style(Rect::new(49, keys_row, 1, 1), consts::KEY_STYLE);
        buffer
    }

    #[test]
    fn render_no_cause() {
        let warning = Warning::from_error_messages(vec![String::from("level map is empty")]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        pretty_assertions::assert_eq!(buffer, expected(10, &["level map is empty"]));
    }

    #[test]
    fn parse_error_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"XXX\nX?X\nXXX\n").unwrap();
        let levels = LevelSet::from_paths(vec![file.path().to_owned()]);
        let err = levels.get(0).unwrap().load().unwrap_err();
        let warning = Warning::from(err);
        let stem = file.path().file_stem().unwrap().to_string_lossy();
        assert_eq!(
            warning.lines,
            [
                format!("level {stem:?} is not a valid map"),
                String::new(),
                String::from("Caused by:"),
                String::from("    unrecognized character '?' at line 2, column"),
                String::from("    2"),
            ]
        );
    }

    #[test]
    fn render_two_causes() {
        let warning = Warning::from_error_messages(vec![
            String::from("failed to start level"),
            String::from("failed to read level file"),
            String::from("No such file or directory (os error 2)"),
        ]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        pretty_assertions::assert_eq!(
            buffer,
            expected(
                8,
                &[
                    "failed to start level",
                    "",
                    "Caused by:",
                    "    0: failed to read level file",
                    "    1: No such file or directory (os error 2)",
                ]
            )
        );
    }

    #[test]
    fn wrap_long_cause() {
        let warning = Warning::from_error_messages(vec![
            String::from("level \"castle\" is not a valid map"),
            String::from(
                "line 12 is 57 cells wide, but the first line is 60 cells wide, which will not do",
            ),
        ]);
        assert_eq!(
            warning.lines,
            [
                "level \"castle\" is not a valid map",
                "",
                "Caused by:",
                "    line 12 is 57 cells wide, but the first line",
                "    is 60 cells wide, which will not do",
            ]
        );
    }

    #[test]
    fn too_many_lines() {
        let msgs = (0..30).map(|i| format!("cause {i}")).collect();
        let warning = Warning::from_error_messages(msgs);
        assert_eq!(warning.lines.len(), Warning::MAX_LINES);
    }

    #[rstest]
    #[case(KeyCode::Enter, KeyModifiers::NONE, Some(WarningOutcome::Dismissed))]
    #[case(KeyCode::Char('n'), KeyModifiers::NONE, Some(WarningOutcome::Dismissed))]
    #[case(KeyCode::Char('q'), KeyModifiers::NONE, Some(WarningOutcome::Quit))]
    #[case(KeyCode::Char('c'), KeyModifiers::CONTROL, Some(WarningOutcome::Quit))]
    #[case(KeyCode::Char('r'), KeyModifiers::NONE, None)]
    fn keys(
        #[case] code: KeyCode,
        #[case] modifiers: KeyModifiers,
        #[case] outcome: Option<WarningOutcome>,
    ) {
        let cmd = Command::from_key_event(crossterm::event::KeyEvent::new(code, modifiers));
        assert_eq!(cmd.and_then(Warning::handle_command), outcome);
    }
}
