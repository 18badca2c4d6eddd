//! Storage abstraction for vault file operations
//!
//! The Storage trait is the narrow capability the creation engine calls
//! through. It lets the library be tested without touching the filesystem.
//! All paths are relative to the vault root; the empty path is the root.

use anyhow::{Context, Result};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Storage abstraction for file operations
///
/// All paths are relative to the vault directory. Implementations
/// handle the mapping to absolute paths or in-memory storage.
pub trait Storage {
    /// Read a file to a string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Read a file as raw bytes
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;

    /// Write text to a file, replacing any previous contents
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Write raw bytes to a file, replacing any previous contents
    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<()>;

    /// Check if a path exists (file or directory)
    fn exists(&self, path: &Path) -> bool;

    /// Check if a path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if a path is a symbolic link, without following it
    fn is_symlink(&self, path: &Path) -> bool;

    /// Read the immediate entries of a directory, returning sorted relative paths
    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Create directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// Real filesystem storage implementation
///
/// All operations are scoped to a root directory (the vault).
/// Paths passed to Storage methods are interpreted relative to this root.
pub struct RealStorage {
    root: PathBuf,
}

impl RealStorage {
    /// Create a new RealStorage with the given root directory
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Get the full path by joining with root
    ///
    /// Paths with a root, drive prefix or `..` segment are refused so nothing
    /// is read or written outside the vault.
    fn full_path(&self, path: &Path) -> Result<PathBuf> {
        if path
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            anyhow::bail!("Path escapes the vault root: {}", path.display());
        }
        Ok(self.root.join(path))
    }
}

impl Storage for RealStorage {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(self.full_path(path)?)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(self.full_path(path)?)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.write_bytes(path, contents.as_bytes())
    }

    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<()> {
        std::fs::write(self.full_path(path)?, contents)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.full_path(path).is_ok_and(|p| p.exists())
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.full_path(path).is_ok_and(|p| p.is_dir())
    }

    fn is_symlink(&self, path: &Path) -> bool {
        self.full_path(path)
            .and_then(|p| Ok(std::fs::symlink_metadata(p)?))
            .is_ok_and(|meta| meta.file_type().is_symlink())
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let full_path = self.full_path(path)?;
        let entries = std::fs::read_dir(&full_path)
            .with_context(|| format!("Failed to read directory {}", path.display()))?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry
                .with_context(|| format!("Failed to read entry in {}", path.display()))?;
            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .with_context(|| format!("Entry escaped the vault root: {}", entry.path().display()))?
                .to_path_buf();
            paths.push(relative);
        }

        paths.sort();
        Ok(paths)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(self.full_path(path)?)
            .with_context(|| format!("Failed to create directory {}", path.display()))
    }
}

#[derive(Default)]
struct MemoryState {
    files: HashMap<PathBuf, Vec<u8>>,
    dirs: HashSet<PathBuf>,
    links: HashSet<PathBuf>,
}

/// In-memory storage implementation for testing
///
/// Stores files in a HashMap, allowing tests to run without
/// touching the filesystem. Directories exist either explicitly
/// (via `create_dir_all`) or implicitly as parents of stored files.
/// Symlinks are recorded as bare entries that report as directories.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStorage {
    /// Create a new empty MemoryStorage
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| anyhow::anyhow!("Memory storage lock poisoned"))
    }

    /// Record a symbolic link to a directory at `path`
    pub fn symlink(&self, path: &Path) -> Result<()> {
        let mut state = self.lock()?;
        if state.files.contains_key(path) || state.dirs.contains(path) {
            anyhow::bail!("Cannot create link {}: path exists", path.display());
        }
        state.links.insert(path.to_path_buf());
        Ok(())
    }
}

impl MemoryState {
    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty()
            || self.dirs.contains(path)
            || self.links.contains(path)
            || self
                .files
                .keys()
                .chain(self.dirs.iter())
                .chain(self.links.iter())
                .any(|k| k != path && k.starts_with(path))
    }
}

impl Storage for MemoryStorage {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        String::from_utf8(bytes).with_context(|| format!("{} is not valid UTF-8", path.display()))
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let state = self.lock()?;
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        self.write_bytes(path, contents.as_bytes())
    }

    fn write_bytes(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut state = self.lock()?;
        if state.is_dir(path) {
            anyhow::bail!("Cannot write {}: is a directory", path.display());
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        match self.lock() {
            Ok(state) => state.files.contains_key(path) || state.is_dir(path),
            Err(_) => false,
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        match self.lock() {
            Ok(state) => state.is_dir(path),
            Err(_) => false,
        }
    }

    fn is_symlink(&self, path: &Path) -> bool {
        match self.lock() {
            Ok(state) => state.links.contains(path),
            Err(_) => false,
        }
    }

    fn read_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let state = self.lock()?;
        if !state.is_dir(path) {
            anyhow::bail!("Directory not found: {}", path.display());
        }

        let entries: BTreeSet<PathBuf> = state
            .files
            .keys()
            .chain(state.dirs.iter())
            .chain(state.links.iter())
            .filter(|k| k.as_path() != path)
            .filter_map(|k| k.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| path.join(first))
            .collect();

        Ok(entries.into_iter().collect())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let mut state = self.lock()?;
        if state.files.contains_key(path) {
            anyhow::bail!("Cannot create directory {}: a file exists there", path.display());
        }
        for ancestor in path.ancestors().filter(|a| !a.as_os_str().is_empty()) {
            state.dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }
}
