//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with lexicon-aware highlighting
//! - [`tokens`]: Token table with kind, value and position columns
//! - [`tree`]: Indented AST outline, or the front-end error
//! - [`status`]: Status bar with counts and keybindings
//!
//! Each pane module exports a `render_*` function that takes the frame, its
//! area, the data to show, whether it has focus, and its scroll offset. The
//! offset is clamped in place to the content height.

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

// Re-export render functions for convenience
pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_tokens_pane;
pub use tree::render_tree_pane;
