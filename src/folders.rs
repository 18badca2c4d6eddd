//! Destination folder enumeration
//!
//! Walks a vault's folder tree and produces the folders a new file may be
//! created in. An ignore list hides individual folders; it does not prune
//! their subtrees, so children of an ignored folder are still offered unless
//! they are ignored themselves.

use anyhow::Result;
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::error::CreateError;
use crate::storage::Storage;

/// A node in a folder tree
pub trait TreeNode {
    /// Vault-relative path of this node
    fn path(&self) -> &str;

    /// Whether this node can contain other nodes (a folder, not a file)
    fn is_container(&self) -> bool;

    fn children(&self) -> &[Self]
    where
        Self: Sized;
}

/// A folder that may receive new files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderEntry {
    pub path: String,
    /// 1 for folders directly under the vault root
    pub depth: usize,
}

/// Normalize a vault path the way the host application does
///
/// Backslashes become slashes, repeated slashes collapse, leading and
/// trailing slashes are dropped and non-breaking spaces become plain spaces.
/// The vault root normalizes to `/`.
pub fn normalize_path(path: &str) -> String {
    let replaced: String = path
        .chars()
        .map(|c| match c {
            '\\' => '/',
            '\u{00A0}' | '\u{202F}' => ' ',
            other => other,
        })
        .collect();

    let joined = replaced
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    if joined.is_empty() {
        "/".to_string()
    } else {
        joined
    }
}

/// Vault-relative storage path for a folder setting; the root maps to ""
pub fn vault_path(path: &str) -> PathBuf {
    let normalized = normalize_path(path);
    if normalized == "/" {
        PathBuf::new()
    } else {
        PathBuf::from(normalized)
    }
}

/// Reject a vault-relative path that would resolve outside the vault
///
/// Only plain segments are allowed: no root, drive prefix or `..`.
pub fn ensure_in_vault(path: &Path) -> std::result::Result<(), CreateError> {
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(CreateError::OutsideVault(path.to_path_buf()));
    }
    Ok(())
}

/// Folder paths excluded from the destination list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    paths: Vec<String>,
}

impl IgnoreList {
    /// Parse a comma-separated setting; entries are trimmed and normalized
    pub fn parse(setting: &str) -> Self {
        let paths = setting
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(normalize_path)
            .collect();
        Self { paths }
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        let normalized = normalize_path(path);
        self.paths.iter().any(|p| *p == normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// List every container below `root` in pre-order, skipping ignored ones
///
/// The root itself is never listed; callers offer it separately.
pub fn enumerate<N: TreeNode>(root: &N, ignore: &IgnoreList) -> Vec<FolderEntry> {
    let mut folders = Vec::new();
    visit(root, ignore, 1, &mut folders);
    folders
}

fn visit<N: TreeNode>(node: &N, ignore: &IgnoreList, depth: usize, out: &mut Vec<FolderEntry>) {
    for child in node.children().iter().filter(|c| c.is_container()) {
        if ignore.is_ignored(child.path()) {
            debug!("Hiding ignored folder {}", child.path());
        } else {
            out.push(FolderEntry {
                path: child.path().to_string(),
                depth,
            });
        }
        visit(child, ignore, depth + 1, out);
    }
}

/// Folder tree node backed by a snapshot of `Storage`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultNode {
    pub path: String,
    pub is_folder: bool,
    pub children: Vec<VaultNode>,
}

impl VaultNode {
    pub fn folder(path: &str, children: Vec<VaultNode>) -> Self {
        Self {
            path: path.to_string(),
            is_folder: true,
            children,
        }
    }

    pub fn file(path: &str) -> Self {
        Self {
            path: path.to_string(),
            is_folder: false,
            children: Vec::new(),
        }
    }

    /// Snapshot the whole vault, skipping hidden entries (starting with `.`)
    ///
    /// Symbolic links are not followed, so a link back into the vault cannot
    /// loop.
    pub fn from_storage(storage: &dyn Storage) -> Result<Self> {
        let children = Self::read_children(storage, Path::new(""))?;
        Ok(Self::folder("/", children))
    }

    fn read_children(storage: &dyn Storage, dir: &Path) -> Result<Vec<VaultNode>> {
        let mut children = Vec::new();

        for entry in storage.read_dir(dir)? {
            let hidden = entry
                .file_name()
                .and_then(|s| s.to_str())
                .map(|s| s.starts_with('.'))
                .unwrap_or(true);
            if hidden {
                continue;
            }
            if storage.is_symlink(&entry) {
                debug!("Not following symlink {}", entry.display());
                continue;
            }

            let path = entry.to_string_lossy().replace('\\', "/");
            if storage.is_dir(&entry) {
                let grandchildren = Self::read_children(storage, &entry)?;
                children.push(Self::folder(&path, grandchildren));
            } else {
                children.push(Self::file(&path));
            }
        }

        Ok(children)
    }
}

impl TreeNode for VaultNode {
    fn path(&self) -> &str {
        &self.path
    }

    fn is_container(&self) -> bool {
        self.is_folder
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
