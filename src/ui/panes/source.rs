//! Source code pane rendering with syntax highlighting
//!
//! The pane shows the MicroML text that produced the tree, with line numbers.
//! Highlighting goes through the real lexer one line at a time; a line that
//! does not lex is shown unstyled rather than hidden.

use crate::parser::lexer::{Lexer, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn token_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Let
        | TokenKind::In
        | TokenKind::If
        | TokenKind::Then
        | TokenKind::Else
        | TokenKind::Lambda => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        TokenKind::Number => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::Operator | TokenKind::Arrow => Style::default().fg(DEFAULT_THEME.operator),
        TokenKind::LParen | TokenKind::RParen => Style::default().fg(DEFAULT_THEME.primary),
        TokenKind::Identifier | TokenKind::Semicolon => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Highlight one line of MicroML.
pub fn highlight_line(line: &str) -> Line<'static> {
    let Ok(tokens) = Lexer::new(line).tokenize() else {
        return Line::from(line.to_string());
    };

    let chars: Vec<char> = line.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;

    for token in tokens {
        // Columns are 1-based char positions on a single-line input
        let start = token.location.column - 1;
        if start > cursor {
            spans.push(Span::raw(chars[cursor..start].iter().collect::<String>()));
        }
        cursor = start + token.text.chars().count();
        spans.push(Span::styled(token.text, token_style(token.kind)));
    }

    if cursor < chars.len() {
        spans.push(Span::raw(chars[cursor..].iter().collect::<String>()));
    }

    Line::from(spans)
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source_code: &str,
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

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    if total_lines > visible_height {
        *scroll_offset = (*scroll_offset).min(total_lines - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let mut spans = vec![Span::styled(
                format!("{:4} ", idx + 1),
                Style::default().fg(DEFAULT_THEME.comment),
            )];
            spans.extend(highlight_line(line).spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
