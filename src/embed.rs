//! Embedding new files into existing notes
//!
//! Appends an embed marker to the end of a target note. The note is never
//! rewritten or deduplicated; embedding twice yields two markers.

use log::info;
use std::path::{Path, PathBuf};

use crate::error::CreateError;
use crate::folders::{ensure_in_vault, vault_path};
use crate::storage::Storage;

/// Vault path of an embed target, with `.md` added when missing
pub fn target_path(target: &str) -> PathBuf {
    let path = vault_path(target);
    if path.to_string_lossy().ends_with(".md") {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".md");
        PathBuf::from(name)
    }
}

/// Marker that transcludes `file` when the note is rendered
pub fn embed_marker(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| file.to_string_lossy());
    format!("![[{}]]", name)
}

/// Append an embed of `new_file` to the note at `target`
///
/// Returns the resolved path of the note that was modified.
pub fn embed(storage: &dyn Storage, new_file: &Path, target: &str) -> Result<PathBuf, CreateError> {
    if target.trim().is_empty() {
        return Err(CreateError::MissingInput("embed target"));
    }

    let note = target_path(target);
    ensure_in_vault(&note)?;
    if !storage.exists(&note) || storage.is_dir(&note) {
        return Err(CreateError::TargetNoteNotFound(note));
    }

    let mut content = storage.read_to_string(&note)?;
    content.push_str("\n\n");
    content.push_str(&embed_marker(new_file));
    content.push('\n');
    storage.write(&note, &content)?;

    info!("Embedded {} into {}", new_file.display(), note.display());
    Ok(note)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_target_path_adds_extension() {
        assert_eq!(target_path("Inbox"), PathBuf::from("Inbox.md"));
        assert_eq!(target_path("/Daily/today.md"), PathBuf::from("Daily/today.md"));
        assert_eq!(target_path("Boards/plan.base"), PathBuf::from("Boards/plan.base.md"));
    }

    #[test]
    fn test_embed_marker_uses_file_name() {
        assert_eq!(embed_marker(Path::new("Projects/03052024-Notes.md")), "![[03052024-Notes.md]]");
        assert_eq!(embed_marker(Path::new("scan.pdf")), "![[scan.pdf]]");
    }

    #[test]
    fn test_embed_appends_marker() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("Inbox.md"), "# Inbox").unwrap();

        let note = embed(&storage, Path::new("Docs/scan.pdf"), "Inbox").unwrap();

        assert_eq!(note, PathBuf::from("Inbox.md"));
        assert_eq!(
            storage.read_to_string(Path::new("Inbox.md")).unwrap(),
            "# Inbox\n\n![[scan.pdf]]\n"
        );
    }

    #[test]
    fn test_embed_twice_duplicates_marker() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("Inbox.md"), "").unwrap();

        embed(&storage, Path::new("a.md"), "Inbox.md").unwrap();
        embed(&storage, Path::new("a.md"), "Inbox.md").unwrap();

        let content = storage.read_to_string(Path::new("Inbox.md")).unwrap();
        assert_eq!(content.matches("![[a.md]]").count(), 2);
    }

    #[test]
    fn test_embed_missing_target() {
        let storage = MemoryStorage::new();
        let result = embed(&storage, Path::new("a.md"), "Nowhere");

        assert!(matches!(result, Err(CreateError::TargetNoteNotFound(p)) if p == Path::new("Nowhere.md")));
        assert!(!storage.exists(Path::new("Nowhere.md")));
    }

    #[test]
    fn test_embed_target_outside_vault() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("note.md"), "# Note").unwrap();

        let result = embed(&storage, Path::new("a.md"), "../note");

        assert!(matches!(result, Err(CreateError::OutsideVault(p)) if p == Path::new("../note.md")));
        assert_eq!(storage.read_to_string(Path::new("note.md")).unwrap(), "# Note");
    }

    #[test]
    fn test_embed_blank_target() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            embed(&storage, Path::new("a.md"), "  "),
            Err(CreateError::MissingInput(_))
        ));
    }
}
