//! Error taxonomy for file creation
//!
//! Every failure the engine can report maps to one of these variants. Callers
//! decide how to surface them; the CLI prints each as a single message.

use crate::file_type::FileType;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CreateError {
    /// A required form field was blank
    #[error("Missing {0}")]
    MissingInput(&'static str),

    /// The file name would name a path rather than a file
    #[error("Invalid file name: {0}")]
    InvalidName(String),

    /// A path would resolve outside the vault root
    #[error("Path is outside the vault: {}", .0.display())]
    OutsideVault(PathBuf),

    /// The destination file already exists
    #[error("File already exists: {}", .0.display())]
    PathConflict(PathBuf),

    /// A template could not be resolved or read
    #[error("{file_type} template not found: {}", .path.display())]
    TemplateNotFound { file_type: FileType, path: PathBuf },

    /// The note to embed into does not exist
    #[error("Embed target not found: {}", .0.display())]
    TargetNoteNotFound(PathBuf),

    /// Any other storage failure
    #[error(transparent)]
    Adapter(#[from] anyhow::Error),
}

impl CreateError {
    /// Whether the request can still succeed after this error
    pub fn is_recoverable(&self) -> bool {
        match self {
            CreateError::TemplateNotFound { file_type, .. } => !file_type.template_required(),
            CreateError::TargetNoteNotFound(_) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_template_missing_is_not_recoverable() {
        let err = CreateError::TemplateNotFound {
            file_type: FileType::Pdf,
            path: PathBuf::from("tpl/missing.pdf"),
        };
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "pdf template not found: tpl/missing.pdf");
    }

    #[test]
    fn test_markdown_template_missing_is_recoverable() {
        let err = CreateError::TemplateNotFound {
            file_type: FileType::Markdown,
            path: PathBuf::from("tpl/missing.md"),
        };
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_conflict_message() {
        let err = CreateError::PathConflict(PathBuf::from("Notes.md"));
        assert_eq!(err.to_string(), "File already exists: Notes.md");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_outside_vault_is_fatal() {
        let err = CreateError::OutsideVault(PathBuf::from("../leaked.md"));
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Path is outside the vault: ../leaked.md");
    }
}
