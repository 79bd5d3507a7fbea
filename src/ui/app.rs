//! Main TUI application state and logic

use crate::parser::ast::Node;
use crate::render::{branch_paths, flatten, NodePath, TreeRow};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use rustc_hash::FxHashSet;
use std::io;
use std::time::Duration;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tree,
    Detail,
    Source,
}

impl FocusedPane {
    /// Move focus to the next pane (tree -> detail -> source)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tree => FocusedPane::Detail,
            FocusedPane::Detail => FocusedPane::Source,
            FocusedPane::Source => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// The source text the tree was parsed from
    pub source_code: String,

    /// The parsed tree
    pub tree: Node,

    /// Nodes whose children are hidden
    pub collapsed: FxHashSet<NodePath>,

    /// Path of the selected node; always names a visible row
    pub selected: NodePath,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tree_scroll: usize,
    pub detail_scroll: usize,
    pub source_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app for `tree`, parsed from `source_code`
    pub fn new(source_code: String, tree: Node) -> Self {
        App {
            source_code,
            tree,
            collapsed: FxHashSet::default(),
            selected: Vec::new(),
            focused_pane: FocusedPane::Tree,
            tree_scroll: 0,
            detail_scroll: 0,
            source_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Rows currently visible in the tree pane
    pub fn rows(&self) -> Vec<TreeRow> {
        flatten(&self.tree, &self.collapsed)
    }

    /// Index of the selected row among [`App::rows`]
    pub fn selected_index(&self, rows: &[TreeRow]) -> usize {
        rows.iter()
            .position(|row| row.path == self.selected)
            .unwrap_or(0)
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.tree.at_path(&self.selected)
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub(crate) fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        // Left column: Source (top) | Tree (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
            .split(columns[0]);

        let rows = self.rows();
        let selected = self.selected_index(&rows);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            left_rows[1],
            &rows,
            selected,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        let node = self.tree.at_path(&self.selected);
        super::panes::render_detail_pane(
            frame,
            columns[1],
            node,
            self.focused_pane == FocusedPane::Detail,
            &mut self.detail_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            selected,
            rows.len(),
            self.tree.size(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up | KeyCode::Char('k') => match self.focused_pane {
                FocusedPane::Tree => self.move_selection(-1),
                FocusedPane::Detail => self.detail_scroll = self.detail_scroll.saturating_sub(1),
                FocusedPane::Source => self.source_scroll = self.source_scroll.saturating_sub(1),
            },
            KeyCode::Down | KeyCode::Char('j') => match self.focused_pane {
                FocusedPane::Tree => self.move_selection(1),
                FocusedPane::Detail => self.detail_scroll = self.detail_scroll.saturating_add(1),
                FocusedPane::Source => self.source_scroll = self.source_scroll.saturating_add(1),
            },
            KeyCode::Home => {
                self.selected = Vec::new();
                self.detail_scroll = 0;
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Char('e') => {
                self.collapsed.clear();
                self.status_message = "Expanded all".to_string();
            }
            KeyCode::Char('c') => {
                self.collapsed = branch_paths(&self.tree);
                self.selected = Vec::new();
                self.detail_scroll = 0;
                self.status_message = "Collapsed all".to_string();
            }
            _ => {}
        }
    }

    /// Move the selection by `delta` visible rows, clamped to the tree
    fn move_selection(&mut self, delta: isize) {
        let rows = self.rows();
        if rows.is_empty() {
            return;
        }
        let current = self.selected_index(&rows);
        let target = current.saturating_add_signed(delta).min(rows.len() - 1);
        if target != current {
            self.selected = rows[target].path.clone();
            self.detail_scroll = 0;
            self.status_message = rows[target].label.clone();
        }
    }

    /// Fold or unfold the selected node
    fn toggle_selected(&mut self) {
        let Some(node) = self.tree.at_path(&self.selected) else {
            return;
        };
        if node.is_leaf() {
            self.status_message = format!("{} has no children", node.label());
            return;
        }

        let label = node.label();
        if self.collapsed.remove(&self.selected) {
            self.status_message = format!("Expanded {}", label);
        } else {
            self.collapsed.insert(self.selected.clone());
            self.status_message = format!("Collapsed {}", label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn app_for(source: &str) -> App {
        App::new(source.to_string(), crate::parse(source).unwrap())
    }

    fn screen_text(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_selection_moves_and_clamps() {
        let mut app = app_for("let x = 5 in x + 3");
        press(&mut app, KeyCode::Up);
        assert_eq!(app.selected, Vec::<usize>::new());

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, vec![1]);
        assert_eq!(app.status_message, "BinaryOp (+)");

        for _ in 0..10 {
            press(&mut app, KeyCode::Char('j'));
        }
        assert_eq!(app.selected, vec![1, 1]);
    }

    #[test]
    fn test_toggle_collapse() {
        let mut app = app_for("let x = 5 in x + 3");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.rows().len(), 3);
        assert_eq!(app.status_message, "Collapsed BinaryOp (+)");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.rows().len(), 5);
    }

    #[test]
    fn test_toggle_leaf_is_noop() {
        let mut app = app_for("let x = 5 in x");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char(' '));
        assert!(app.collapsed.is_empty());
        assert_eq!(app.status_message, "Number (5) has no children");
    }

    #[test]
    fn test_collapse_and_expand_all() {
        let mut app = app_for("if a then f x else 0");
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.rows().len(), 1);
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.rows().len(), 6);
    }

    #[test]
    fn test_tab_cycles_focus_and_q_quits() {
        let mut app = app_for("1");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Detail);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tree);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_tree_and_json() {
        let mut app = app_for("let x = 5 in x + 3");
        let text = screen_text(&mut app);
        assert!(text.contains("Syntax Tree"));
        assert!(text.contains("Let (x)"));
        assert!(text.contains("BinaryOp (+)"));
        assert!(text.contains("\"nodeType\": \"Let\""));
    }

    #[test]
    fn test_render_detail_follows_selection() {
        let mut app = app_for("let x = 5 in x + 3");
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        let text = screen_text(&mut app);
        assert!(text.contains("\"operator\": \"+\""));
        assert!(!text.contains("\"variableName\""));
    }
}
