//! Creator configuration
//!
//! Configuration lives within the vault itself, making each vault
//! self-contained and portable. It is loaded once, merged over defaults,
//! and passed by reference into the creation engine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::file_type::FileType;
use crate::folders::IgnoreList;
use crate::name::DatePosition;
use crate::storage::Storage;

const PREFERRED_PATH: &str = ".filecreator/config.toml";
const FALLBACK_PATH: &str = "filecreator.toml";

/// Settings for the file creator, loaded from the vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatorConfig {
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default)]
    pub date_position: DatePosition,
    #[serde(default = "default_file_type")]
    pub file_type: FileType,
    /// Comma-separated folder paths hidden from the destination list
    #[serde(default)]
    pub ignore_folders: String,
    /// Embed every new file into `embed_target` unless told otherwise
    #[serde(default)]
    pub auto_embed: bool,
    #[serde(default)]
    pub embed_target: String,
    /// Open every new file after creating it
    #[serde(default)]
    pub auto_open: bool,
    #[serde(default = "default_markdown_templates")]
    pub markdown: TemplateConfig,
    #[serde(default = "default_pdf_templates")]
    pub pdf: TemplateConfig,
    #[serde(default = "default_base_templates")]
    pub base: TemplateConfig,
    #[serde(default = "default_drawing_templates")]
    pub drawing: TemplateConfig,
    #[serde(default)]
    pub kanban: KanbanConfig,
}

/// Template folder and default template for one file type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    pub folder: String,
    #[serde(default = "default_template_name")]
    pub default_template: String,
}

/// Default columns for new kanban boards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KanbanConfig {
    #[serde(default = "default_kanban_headers")]
    pub headers: Vec<String>,
    #[serde(default = "default_kanban_completed")]
    pub completed: Vec<String>,
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            headers: default_kanban_headers(),
            completed: default_kanban_completed(),
        }
    }
}

fn default_date_format() -> String {
    "MMddYYYY".to_string()
}

fn default_file_type() -> FileType {
    FileType::Markdown
}

fn default_template_name() -> String {
    "none".to_string()
}

fn template_config(folder: &str, default_template: &str) -> TemplateConfig {
    TemplateConfig {
        folder: folder.to_string(),
        default_template: default_template.to_string(),
    }
}

fn default_markdown_templates() -> TemplateConfig {
    template_config("/00-assets/02-templates/", "none")
}

fn default_pdf_templates() -> TemplateConfig {
    template_config("/00-assets/01-pdfs/", "blank.pdf")
}

fn default_base_templates() -> TemplateConfig {
    template_config("/00-assets/03-bases/", "none")
}

fn default_drawing_templates() -> TemplateConfig {
    template_config("/00-assets/04-drawings/", "none")
}

fn default_kanban_headers() -> Vec<String> {
    vec!["To Do".to_string(), "In Progress".to_string(), "Done".to_string()]
}

fn default_kanban_completed() -> Vec<String> {
    vec!["Done".to_string()]
}

impl Default for CreatorConfig {
    fn default() -> Self {
        Self {
            date_format: default_date_format(),
            date_position: DatePosition::default(),
            file_type: default_file_type(),
            ignore_folders: String::new(),
            auto_embed: false,
            embed_target: String::new(),
            auto_open: false,
            markdown: default_markdown_templates(),
            pdf: default_pdf_templates(),
            base: default_base_templates(),
            drawing: default_drawing_templates(),
            kanban: KanbanConfig::default(),
        }
    }
}

/// Settings that `with_setting` accepts
pub const SETTING_KEYS: &[&str] = &[
    "date_format",
    "date_position",
    "file_type",
    "ignore_folders",
    "auto_embed",
    "embed_target",
    "auto_open",
    "markdown.folder",
    "markdown.default_template",
    "pdf.folder",
    "pdf.default_template",
    "base.folder",
    "base.default_template",
    "drawing.folder",
    "drawing.default_template",
    "kanban.headers",
    "kanban.completed",
];

impl CreatorConfig {
    /// Load config from storage
    ///
    /// Looks for .filecreator/config.toml or filecreator.toml in the vault
    pub fn load(storage: &dyn Storage) -> Result<Self> {
        for candidate in [PREFERRED_PATH, FALLBACK_PATH] {
            let path = Path::new(candidate);
            if storage.exists(path) {
                let content = storage.read_to_string(path)?;
                return toml::from_str(&content)
                    .with_context(|| format!("Failed to parse {}", candidate));
            }
        }

        anyhow::bail!(
            "No creator config found. Expected {} or {}",
            PREFERRED_PATH,
            FALLBACK_PATH
        )
    }

    /// Load config or return defaults if not found
    pub fn load_or_default(storage: &dyn Storage) -> Self {
        match Self::load(storage) {
            Ok(config) => config,
            Err(e) => {
                log::debug!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    /// Persist the config to .filecreator/config.toml
    pub fn save(&self, storage: &dyn Storage) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        storage.create_dir_all(Path::new(".filecreator"))?;
        storage.write(Path::new(PREFERRED_PATH), &content)
    }

    /// Return a copy of this config with one setting changed
    ///
    /// List settings (`kanban.headers`, `kanban.completed`) take a
    /// comma-separated value.
    pub fn with_setting(&self, key: &str, value: &str) -> Result<Self> {
        let mut next = self.clone();

        match key {
            "date_format" => next.date_format = value.to_string(),
            "date_position" => next.date_position = value.parse()?,
            "file_type" => next.file_type = value.parse()?,
            "ignore_folders" => next.ignore_folders = value.to_string(),
            "auto_embed" => next.auto_embed = parse_bool(key, value)?,
            "embed_target" => next.embed_target = value.trim().to_string(),
            "auto_open" => next.auto_open = parse_bool(key, value)?,
            "kanban.headers" => next.kanban.headers = split_list(value),
            "kanban.completed" => next.kanban.completed = split_list(value),
            _ => {
                let Some((section, field)) = key.split_once('.') else {
                    anyhow::bail!("Unknown setting: {}", key);
                };
                let ty: FileType = section
                    .parse()
                    .with_context(|| format!("Unknown setting: {}", key))?;
                let Some(templates) = next.templates_mut(ty) else {
                    anyhow::bail!("Unknown setting: {}", key);
                };
                match field {
                    "folder" => templates.folder = value.to_string(),
                    "default_template" => templates.default_template = value.trim().to_string(),
                    _ => anyhow::bail!("Unknown setting: {}", key),
                }
            }
        }

        Ok(next)
    }

    /// Template settings for a file type, if that type uses templates
    pub fn templates(&self, file_type: FileType) -> Option<&TemplateConfig> {
        match file_type {
            FileType::Markdown => Some(&self.markdown),
            FileType::Pdf => Some(&self.pdf),
            FileType::Base => Some(&self.base),
            FileType::Drawing => Some(&self.drawing),
            FileType::Kanban => None,
        }
    }

    fn templates_mut(&mut self, file_type: FileType) -> Option<&mut TemplateConfig> {
        match file_type {
            FileType::Markdown => Some(&mut self.markdown),
            FileType::Pdf => Some(&mut self.pdf),
            FileType::Base => Some(&mut self.base),
            FileType::Drawing => Some(&mut self.drawing),
            FileType::Kanban => None,
        }
    }

    /// Template folder for a file type, as configured (not normalized)
    pub fn template_folder(&self, file_type: FileType) -> Option<&str> {
        self.templates(file_type).map(|t| t.folder.as_str())
    }

    /// Default template name for a file type; `none` or blank means no template
    pub fn default_template(&self, file_type: FileType) -> Option<&str> {
        self.templates(file_type)
            .map(|t| t.default_template.trim())
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("none"))
    }

    pub fn ignore_list(&self) -> IgnoreList {
        IgnoreList::parse(&self.ignore_folders)
    }

    /// Configured embed target when auto-embed is on
    pub fn auto_embed_target(&self) -> Option<&str> {
        let target = self.embed_target.trim();
        (self.auto_embed && !target.is_empty()).then_some(target)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => anyhow::bail!("Invalid value for {}: {}. Use 'true' or 'false'.", key, value),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
