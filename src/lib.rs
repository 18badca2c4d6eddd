//! filecreator - A settings-driven file creation library for note vaults
//!
//! This library holds the policy for materializing new files in a vault:
//! naming with date tokens, dispatch by file type, content generation from
//! templates or built-in boilerplate, and embedding the new file into an
//! existing note. It separates that policy from front-end concerns like
//! prompting, colours and editor integration.
//!
//! # Example
//!
//! ```no_run
//! use filecreator::{CreationRequest, FileCreator, RealStorage};
//! use std::path::PathBuf;
//!
//! let storage = Box::new(RealStorage::new(PathBuf::from("vault")));
//! let creator = FileCreator::with_defaults(storage);
//!
//! let request = creator.new_request("Meeting", "/");
//! let today = chrono::Local::now().date_naive();
//! let outcome = creator.create(&request, today).unwrap();
//! println!("Created {}", outcome.path.display());
//! ```

pub mod config;
pub mod content;
pub mod embed;
pub mod error;
pub mod file_type;
pub mod folders;
pub mod kanban;
pub mod name;
pub mod notice;
pub mod request;
pub mod storage;
pub mod template;
pub mod templates;

use chrono::NaiveDate;
use log::{debug, info};
use std::path::PathBuf;

/// Result type alias using anyhow::Error
pub type Result<T> = std::result::Result<T, anyhow::Error>;

/// What a successful creation produced
#[derive(Debug, Clone)]
pub struct CreationOutcome {
    /// Vault-relative path of the new file
    pub path: PathBuf,
    pub is_binary: bool,
    /// Note the new file was embedded into, if any
    pub embedded_into: Option<PathBuf>,
    /// Non-fatal conditions to show the user
    pub notices: Vec<notice::Notice>,
}

/// Main library API
///
/// Holds the immutable configuration and the storage capability, and runs
/// creation requests against them.
pub struct FileCreator {
    config: config::CreatorConfig,
    storage: Box<dyn storage::Storage>,
}

impl FileCreator {
    /// Create a FileCreator with the given configuration and storage
    pub fn new(config: config::CreatorConfig, storage: Box<dyn storage::Storage>) -> Self {
        Self { config, storage }
    }

    /// Create a FileCreator by loading configuration from storage
    pub fn from_storage(storage: Box<dyn storage::Storage>) -> Result<Self> {
        let config = config::CreatorConfig::load(&*storage)?;
        Ok(Self::new(config, storage))
    }

    /// Create a FileCreator with stored configuration, or defaults if none
    pub fn with_defaults(storage: Box<dyn storage::Storage>) -> Self {
        let config = config::CreatorConfig::load_or_default(&*storage);
        Self::new(config, storage)
    }

    pub fn config(&self) -> &config::CreatorConfig {
        &self.config
    }

    /// Change one setting, persist it, and return the updated creator
    pub fn with_setting(self, key: &str, value: &str) -> Result<Self> {
        let config = self.config.with_setting(key, value)?;
        config.save(&*self.storage)?;
        info!("Setting {} changed", key);
        Ok(Self::new(config, self.storage))
    }

    /// Start a request seeded from the configured defaults
    pub fn new_request(&self, base_name: &str, folder: &str) -> request::CreationRequest {
        request::CreationRequest::new(base_name, folder, &self.config)
    }

    /// Folders a new file may be created in, excluding the root
    pub fn list_folders(&self) -> Result<Vec<folders::FolderEntry>> {
        let root = folders::VaultNode::from_storage(&*self.storage)?;
        Ok(folders::enumerate(&root, &self.config.ignore_list()))
    }

    /// Templates available for a file type
    pub fn list_templates(&self, file_type: file_type::FileType) -> Result<template::TemplateListing> {
        template::list_templates(&*self.storage, &self.config, file_type)
    }

    /// Initial edit buffer for a base file, seeded from a template
    pub fn seed_base_buffer(
        &self,
        template_name: Option<&str>,
    ) -> std::result::Result<(String, Option<notice::Notice>), error::CreateError> {
        content::seed_base_buffer(&*self.storage, &self.config, template_name)
    }

    /// Materialize a new file
    ///
    /// Blocks before any write when an input is missing or the destination
    /// already exists. Content is generated before the destination folder is
    /// created, so a fatal template failure leaves the vault untouched. Embed
    /// failures are reported as notices; the file stays created.
    pub fn create(
        &self,
        request: &request::CreationRequest,
        now: NaiveDate,
    ) -> std::result::Result<CreationOutcome, error::CreateError> {
        request.validate()?;

        let path = request.destination(now);
        folders::ensure_in_vault(&path)?;
        if self.storage.exists(&path) {
            return Err(error::CreateError::PathConflict(path));
        }

        debug!("Generating {} content for {}", request.file_type, path.display());
        let generated = content::generate(&*self.storage, &self.config, request, &path)?;

        let folder = request.folder_path();
        if !folder.as_os_str().is_empty() && !self.storage.exists(&folder) {
            self.storage.create_dir_all(&folder)?;
        }

        generated.file.write(&*self.storage)?;
        info!("Created {}", path.display());

        let mut notices = generated.notices;
        let mut embedded_into = None;

        if let Some(target) = request.embed_target() {
            match embed::embed(&*self.storage, &path, target) {
                Ok(note) => embedded_into = Some(note),
                Err(e) => {
                    log::warn!("Skipping embed: {:#}", e);
                    notices.push(notice::Notice::from(&e));
                }
            }
        }

        Ok(CreationOutcome {
            is_binary: generated.file.is_binary(),
            path,
            embedded_into,
            notices,
        })
    }

    /// Append an embed of an existing file to a note
    pub fn embed(
        &self,
        new_file: &std::path::Path,
        target: &str,
    ) -> std::result::Result<PathBuf, error::CreateError> {
        embed::embed(&*self.storage, new_file, target)
    }
}

// Re-export main types for convenience
pub use config::{CreatorConfig, KanbanConfig, TemplateConfig};
pub use content::{GeneratedFile, Payload};
pub use error::CreateError;
pub use file_type::{FileType, TemplateSource};
pub use folders::{FolderEntry, IgnoreList, TreeNode, VaultNode};
pub use kanban::KanbanSpec;
pub use name::{DatePosition, build_name, format_date};
pub use notice::{Notice, NoticeLevel};
pub use request::{CreationRequest, TypeOptions};
pub use storage::{MemoryStorage, RealStorage, Storage};
pub use template::{TemplateListing, TemplateReference};
