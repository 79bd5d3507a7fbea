//! Detail pane: the selected subtree as JSON
//!
//! Shows the exact serialized form a consumer of the JSON output would
//! receive for the selected node, headed by its size and depth.

use crate::json::to_json_pretty;
use crate::parser::ast::Node;
use crate::ui::theme::{node_color, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn json_line(line: &str) -> Line<'static> {
    // Keys are the quoted text before the first `": `
    match line.split_once("\": ") {
        Some((key, rest)) => Line::from(vec![
            Span::styled(format!("{}\": ", key), Style::default().fg(DEFAULT_THEME.primary)),
            Span::styled(rest.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
        ]),
        None => Line::from(Span::styled(
            line.to_string(),
            Style::default().fg(DEFAULT_THEME.comment),
        )),
    }
}

/// Render the detail pane for `node`
pub fn render_detail_pane(
    frame: &mut Frame,
    area: Rect,
    node: Option<&Node>,
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
        .title(" Node JSON ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some(node) = node else {
        let paragraph = Paragraph::new("(no node selected)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                node.node_type().as_str(),
                Style::default()
                    .fg(node_color(node.node_type()))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} node(s), depth {}", node.size(), node.depth()),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ]),
        Line::from(""),
    ];

    match to_json_pretty(node) {
        Ok(json) => lines.extend(json.lines().map(json_line)),
        Err(e) => lines.push(Line::from(Span::styled(
            format!("serialization failed: {}", e),
            Style::default().fg(DEFAULT_THEME.error),
        ))),
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let visible: Vec<Line> = lines
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}
