//! Template lookup
//!
//! Lists and resolves the templates configured for each file type. A template
//! folder that does not exist is not an error: the listing comes back empty
//! with a condition describing why.

use anyhow::Result;
use log::debug;
use std::path::{Path, PathBuf};

use crate::config::CreatorConfig;
use crate::file_type::FileType;
use crate::folders::vault_path;
use crate::storage::Storage;

/// A template file the user can pick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateReference {
    pub source_path: PathBuf,
    pub name: String,
}

/// Result of listing a template folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateListing {
    pub templates: Vec<TemplateReference>,
    /// Why the listing is empty, if it is
    pub condition: Option<String>,
}

impl TemplateListing {
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }
}

/// List the templates available for a file type
pub fn list_templates(
    storage: &dyn Storage,
    config: &CreatorConfig,
    file_type: FileType,
) -> Result<TemplateListing> {
    let (Some(folder), Some(extension)) = (
        config.template_folder(file_type),
        file_type.template_extension(),
    ) else {
        return Ok(TemplateListing::default());
    };

    let dir = vault_path(folder);
    if !storage.is_dir(&dir) {
        debug!("Template folder {} does not exist", dir.display());
        return Ok(TemplateListing {
            templates: Vec::new(),
            condition: Some(format!("Template folder not found: {}", folder)),
        });
    }

    let mut templates = Vec::new();
    for path in storage.read_dir(&dir)? {
        let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
            continue;
        };
        if name.ends_with(extension) && !storage.is_dir(&path) {
            templates.push(TemplateReference {
                name: name.to_string(),
                source_path: path.clone(),
            });
        }
    }

    templates.sort_by(|a, b| a.name.cmp(&b.name));

    let condition = templates
        .is_empty()
        .then(|| format!("No {} templates found in {}", file_type, folder));

    Ok(TemplateListing { templates, condition })
}

/// Resolve a template name to its path inside the type's template folder
///
/// Returns `None` for types without templates.
pub fn resolve(config: &CreatorConfig, file_type: FileType, name: &str) -> Option<TemplateReference> {
    let folder = config.template_folder(file_type)?;
    Some(TemplateReference {
        source_path: vault_path(folder).join(Path::new(name.trim())),
        name: name.trim().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_list_filters_by_extension() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("00-assets/02-templates/meeting.md"), "m").unwrap();
        storage.write(Path::new("00-assets/02-templates/daily.md"), "d").unwrap();
        storage.write(Path::new("00-assets/02-templates/logo.png"), "x").unwrap();
        storage.write(Path::new("00-assets/02-templates/sub/nested.md"), "n").unwrap();

        let listing = list_templates(&storage, &CreatorConfig::default(), FileType::Markdown).unwrap();

        assert_eq!(listing.names(), vec!["daily.md", "meeting.md"]);
        assert_eq!(
            listing.templates[0].source_path,
            PathBuf::from("00-assets/02-templates/daily.md")
        );
        assert_eq!(listing.condition, None);
    }

    #[test]
    fn test_list_missing_folder_is_a_condition() {
        let storage = MemoryStorage::new();
        let listing = list_templates(&storage, &CreatorConfig::default(), FileType::Pdf).unwrap();

        assert!(listing.templates.is_empty());
        assert_eq!(
            listing.condition.as_deref(),
            Some("Template folder not found: /00-assets/01-pdfs/")
        );
    }

    #[test]
    fn test_list_empty_folder_is_a_condition() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("00-assets/03-bases/readme.md"), "r").unwrap();

        let listing = list_templates(&storage, &CreatorConfig::default(), FileType::Base).unwrap();

        assert!(listing.templates.is_empty());
        assert_eq!(
            listing.condition.as_deref(),
            Some("No base templates found in /00-assets/03-bases/")
        );
    }

    #[test]
    fn test_kanban_has_no_templates() {
        let storage = MemoryStorage::new();
        let listing = list_templates(&storage, &CreatorConfig::default(), FileType::Kanban).unwrap();
        assert_eq!(listing, TemplateListing::default());
        assert!(resolve(&CreatorConfig::default(), FileType::Kanban, "x").is_none());
    }

    #[test]
    fn test_resolve_joins_normalized_folder() {
        let config = CreatorConfig::default();
        let reference = resolve(&config, FileType::Pdf, "blank.pdf").unwrap();
        assert_eq!(reference.source_path, PathBuf::from("00-assets/01-pdfs/blank.pdf"));

        let config = config.with_setting("markdown.folder", "/").unwrap();
        let reference = resolve(&config, FileType::Markdown, "t.md").unwrap();
        assert_eq!(reference.source_path, PathBuf::from("t.md"));
    }
}
