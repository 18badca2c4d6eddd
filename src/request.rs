//! Creation requests
//!
//! A request carries everything the creation form collects. New requests
//! are seeded from configuration the same way the form starts out.

use chrono::NaiveDate;
use std::path::PathBuf;

use crate::config::CreatorConfig;
use crate::error::CreateError;
use crate::file_type::FileType;
use crate::folders::{ensure_in_vault, vault_path};
use crate::kanban::KanbanSpec;
use crate::name::{DatePosition, build_name};

/// Options that only apply to some file types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeOptions {
    None,
    Kanban(KanbanSpec),
    /// Edit buffer for a base file; `None` seeds it from the template
    Base { buffer: Option<String> },
}

impl TypeOptions {
    /// Options a fresh request of `file_type` starts with
    pub fn seeded(file_type: FileType, config: &CreatorConfig) -> Self {
        match file_type {
            FileType::Kanban => TypeOptions::Kanban(KanbanSpec::from_config(&config.kanban)),
            FileType::Base => TypeOptions::Base { buffer: None },
            FileType::Markdown | FileType::Pdf | FileType::Drawing => TypeOptions::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationRequest {
    pub base_name: String,
    /// Destination folder as shown to the user; `/` is the vault root
    pub folder: String,
    pub file_type: FileType,
    pub date_position: DatePosition,
    pub date_format: String,
    pub template: Option<String>,
    pub options: TypeOptions,
    pub embed_target: Option<String>,
}

impl CreationRequest {
    /// Start a request with the configured defaults
    pub fn new(base_name: impl Into<String>, folder: impl Into<String>, config: &CreatorConfig) -> Self {
        let file_type = config.file_type;
        Self {
            base_name: base_name.into(),
            folder: folder.into(),
            file_type,
            date_position: config.date_position,
            date_format: config.date_format.clone(),
            template: config.default_template(file_type).map(String::from),
            options: TypeOptions::seeded(file_type, config),
            embed_target: config.auto_embed_target().map(String::from),
        }
    }

    /// Switch file type, re-seeding the template and type options
    pub fn with_file_type(mut self, file_type: FileType, config: &CreatorConfig) -> Self {
        self.file_type = file_type;
        self.template = config.default_template(file_type).map(String::from);
        self.options = TypeOptions::seeded(file_type, config);
        self
    }

    /// Reject requests the form would not submit
    ///
    /// The base name must be a single file name, and the folder must stay
    /// inside the vault.
    pub fn validate(&self) -> Result<(), CreateError> {
        let name = self.base_name.trim();
        if name.is_empty() {
            return Err(CreateError::MissingInput("file name"));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(CreateError::InvalidName(name.to_string()));
        }
        if self.folder.trim().is_empty() {
            return Err(CreateError::MissingInput("folder"));
        }
        ensure_in_vault(&self.folder_path())
    }

    /// File name with date token and extension
    pub fn file_name(&self, now: NaiveDate) -> String {
        let stem = build_name(&self.base_name, self.date_position, &self.date_format, now);
        format!("{}{}", stem, self.file_type.extension())
    }

    /// Vault-relative folder the file goes into ("" for the root)
    pub fn folder_path(&self) -> PathBuf {
        vault_path(&self.folder)
    }

    /// Vault-relative path of the file to create
    pub fn destination(&self, now: NaiveDate) -> PathBuf {
        self.folder_path().join(self.file_name(now))
    }

    /// Embed target, if one was given and is not blank
    pub fn embed_target(&self) -> Option<&str> {
        self.embed_target
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}
