//! Embedded default documents
//!
//! These are compiled into the binary and used when a file type has no
//! template, or when its template cannot be resolved.

/// Blank drawing document: front-matter plus two empty-canvas scenes
pub const BLANK_DRAWING: &str = include_str!("../templates/drawing.excalidraw.md");

/// Front-matter that marks a markdown file as a kanban board
pub const KANBAN_FRONTMATTER: &str = "---\nkanban-plugin: basic\n---\n";
