//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: MicroML source with line numbers and lexer-driven highlighting
//! - [`tree`]: Collapsible syntax tree coloured by node type
//! - [`detail`]: JSON of the selected subtree
//! - [`status`]: Status bar with keybindings and selection state
//!
//! Each pane module exports a stateless `render_*` function; scroll offsets
//! live in [`crate::ui::App`] and are passed in by mutable reference.

pub mod detail;
pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use detail::render_detail_pane;
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tree::render_tree_pane;
