//! CLI module
//!
//! This module contains all CLI-specific functionality including:
//! - Command implementations
//! - Colored output helpers
//! - Utility functions

pub mod colors;
pub mod commands;
pub mod utils;

use filecreator::{DatePosition, FileType};

/// How the `new` command should treat embedding
pub enum EmbedChoice {
    /// Use the configured auto-embed target, if any
    Configured,
    Into(String),
    Skip,
}

/// Everything the `new` command collected from its arguments
pub struct NewOptions {
    pub name: Option<String>,
    pub folder: String,
    pub file_type: Option<FileType>,
    pub date: Option<DatePosition>,
    pub template: Option<String>,
    pub headers: Vec<String>,
    pub completed: Vec<String>,
    pub base_content: Option<String>,
    pub embed: EmbedChoice,
    pub open: bool,
}
