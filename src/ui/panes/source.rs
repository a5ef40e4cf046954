//! Source code pane rendering with syntax highlighting
//!
//! Highlighting uses a small character scanner rather than the lexer so that
//! text the lexer would reject is still displayed. `{ ... }` comments may
//! span lines, so the scanner carries the "inside a comment" flag from one
//! line to the next.

use crate::parser::token::Keyword;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Highlight one line; `in_comment` is updated for the following line.
fn highlight_line<'a>(line: &'a str, in_comment: &mut bool) -> Vec<Span<'a>> {
    let comment = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = Vec::new();
    let mut rest = line;

    while !rest.is_empty() {
        if *in_comment {
            match rest.find('}') {
                Some(end) => {
                    spans.push(Span::styled(&rest[..=end], comment));
                    rest = &rest[end + 1..];
                    *in_comment = false;
                }
                None => {
                    spans.push(Span::styled(rest, comment));
                    rest = "";
                }
            }
            continue;
        }

        let Some(first) = rest.chars().next() else {
            break;
        };

        if first == '{' {
            *in_comment = true;
            continue;
        }

        let end = if first.is_alphabetic() {
            rest.find(|c: char| !c.is_alphanumeric()).unwrap_or(rest.len())
        } else if first.is_ascii_digit() {
            rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len())
        } else {
            first.len_utf8()
        };

        let word = &rest[..end];
        let style = if Keyword::lookup(word).is_some() {
            Style::default()
                .fg(DEFAULT_THEME.keyword)
                .add_modifier(Modifier::BOLD)
        } else if first.is_ascii_digit() {
            Style::default().fg(DEFAULT_THEME.number)
        } else if "+-*/=<();:".contains(first) {
            Style::default().fg(DEFAULT_THEME.secondary)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };

        spans.push(Span::styled(word, style));
        rest = &rest[end..];
    }

    spans
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let all_lines: Vec<&str> = source.lines().collect();
    let total = all_lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders

    *scroll_offset = (*scroll_offset).min(total.saturating_sub(visible_height));

    let number_width = total.max(1).to_string().len();
    let mut in_comment = false;
    let mut lines = Vec::with_capacity(visible_height);

    for (index, text) in all_lines.iter().enumerate() {
        // Highlight skipped lines too so comment state stays correct
        let mut spans = highlight_line(text, &mut in_comment);
        if index < *scroll_offset {
            continue;
        }
        if lines.len() == visible_height {
            break;
        }

        spans.insert(
            0,
            Span::styled(
                format!("{:>width$} ", index + 1, width = number_width),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        );
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(spans: &[Span<'_>]) -> Vec<String> {
        spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn test_highlight_splits_words() {
        let mut in_comment = false;
        let spans = highlight_line("x:=x+12", &mut in_comment);
        assert_eq!(texts(&spans), vec!["x", ":", "=", "x", "+", "12"]);
        assert!(!in_comment);
    }

    #[test]
    fn test_highlight_keywords() {
        let mut in_comment = false;
        let spans = highlight_line("repeat", &mut in_comment);
        assert_eq!(spans[0].style.fg, Some(DEFAULT_THEME.keyword));
    }

    #[test]
    fn test_comment_spans_lines() {
        let mut in_comment = false;
        let first = highlight_line("read x { start", &mut in_comment);
        assert!(in_comment);
        assert_eq!(texts(&first).last().unwrap(), "{ start");

        let second = highlight_line("end } write x", &mut in_comment);
        assert!(!in_comment);
        assert_eq!(texts(&second)[0], "end }");
        assert_eq!(second[0].style.fg, Some(DEFAULT_THEME.comment));
    }
}
