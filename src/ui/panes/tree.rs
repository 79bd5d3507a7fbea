//! AST tree pane rendering
//!
//! Draws the flattened tree rows produced by [`crate::render::flatten`]. Each
//! row shows its guide lines, a fold marker for nodes with children and the
//! node label coloured by node type. The selected row is highlighted and kept
//! inside the visible window.

use crate::render::TreeRow;
use crate::ui::theme::{node_color, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Adjust `offset` so that row `selected` is visible in a window of `height`
/// rows over `total` rows.
pub fn scroll_to_selection(offset: usize, selected: usize, total: usize, height: usize) -> usize {
    let height = height.max(1);
    let mut offset = offset;

    if selected < offset {
        offset = selected;
    } else if selected >= offset + height {
        offset = selected + 1 - height;
    }

    offset.min(total.saturating_sub(height))
}

fn row_line(row: &TreeRow, is_selected: bool) -> Line<'static> {
    let marker = match (row.has_children, row.collapsed) {
        (true, true) => "▸ ",
        (true, false) => "▾ ",
        (false, _) => "  ",
    };

    let mut label_style = Style::default().fg(node_color(row.node_type));
    if row.has_children {
        label_style = label_style.add_modifier(Modifier::BOLD);
    }

    let mut spans = vec![
        Span::styled(row.guide.clone(), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(marker, Style::default().fg(DEFAULT_THEME.fg)),
        Span::styled(row.label.clone(), label_style),
    ];

    if is_selected {
        for span in &mut spans {
            span.style = span.style.bg(DEFAULT_THEME.selection_bg);
        }
    }

    Line::from(spans)
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[TreeRow],
    selected: usize,
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
        .title(" Syntax Tree ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    *scroll_offset = scroll_to_selection(*scroll_offset, selected, rows.len(), visible_height);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| ListItem::new(row_line(row, idx == selected)))
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
