//! Content generation per file type
//!
//! Produces the payload for a new file. Template problems degrade to empty
//! or built-in content for every type except PDF, where a missing template
//! aborts the request before anything is written.

use log::warn;
use std::path::{Path, PathBuf};

use crate::config::CreatorConfig;
use crate::error::CreateError;
use crate::file_type::FileType;
use crate::folders::ensure_in_vault;
use crate::kanban::KanbanSpec;
use crate::notice::Notice;
use crate::request::{CreationRequest, TypeOptions};
use crate::storage::Storage;
use crate::template;
use crate::templates::BLANK_DRAWING;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

/// A file ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub payload: Payload,
}

impl GeneratedFile {
    pub fn is_binary(&self) -> bool {
        matches!(self.payload, Payload::Binary(_))
    }

    /// Write the payload to storage
    pub fn write(&self, storage: &dyn Storage) -> anyhow::Result<()> {
        match &self.payload {
            Payload::Text(text) => storage.write(&self.path, text),
            Payload::Binary(bytes) => storage.write_bytes(&self.path, bytes),
        }
    }
}

/// Generated file plus any warnings raised on the way
#[derive(Debug, Clone)]
pub struct Generated {
    pub file: GeneratedFile,
    pub notices: Vec<Notice>,
}

/// Produce the file for `request` at `path`
pub fn generate(
    storage: &dyn Storage,
    config: &CreatorConfig,
    request: &CreationRequest,
    path: &Path,
) -> Result<Generated, CreateError> {
    let mut notices = Vec::new();
    let template_name = request
        .template
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());

    let payload = match request.file_type {
        FileType::Markdown => {
            let text = match template_name {
                Some(name) => degrade(read_template_text(storage, config, FileType::Markdown, name), &mut notices)?
                    .unwrap_or_default(),
                None => String::new(),
            };
            Payload::Text(text)
        }
        FileType::Pdf => {
            let name = template_name.ok_or_else(|| CreateError::TemplateNotFound {
                file_type: FileType::Pdf,
                path: PathBuf::from(&config.pdf.folder),
            })?;
            Payload::Binary(read_template_bytes(storage, config, FileType::Pdf, name)?)
        }
        FileType::Kanban => {
            let board = match &request.options {
                TypeOptions::Kanban(spec) => spec.render(),
                _ => KanbanSpec::from_config(&config.kanban).render(),
            };
            Payload::Text(board)
        }
        FileType::Base => {
            let buffer = match &request.options {
                TypeOptions::Base { buffer: Some(buffer) } => buffer.clone(),
                _ => {
                    let (seeded, notice) = seed_base_buffer(storage, config, template_name)?;
                    notices.extend(notice);
                    seeded
                }
            };
            Payload::Text(buffer)
        }
        FileType::Drawing => {
            let text = match template_name {
                Some(name) => degrade(read_template_text(storage, config, FileType::Drawing, name), &mut notices)?,
                None => None,
            };
            Payload::Text(text.unwrap_or_else(|| BLANK_DRAWING.to_string()))
        }
    };

    Ok(Generated {
        file: GeneratedFile {
            path: path.to_path_buf(),
            payload,
        },
        notices,
    })
}

/// Initial contents of a base file's edit buffer
///
/// Seeded from the named template when it resolves, otherwise empty.
pub fn seed_base_buffer(
    storage: &dyn Storage,
    config: &CreatorConfig,
    template_name: Option<&str>,
) -> Result<(String, Option<Notice>), CreateError> {
    let Some(name) = template_name else {
        return Ok((String::new(), None));
    };

    match read_template_text(storage, config, FileType::Base, name) {
        Ok(text) => Ok((text, None)),
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            Ok((String::new(), Some(Notice::from(&e))))
        }
        Err(e) => Err(e),
    }
}

/// Turn a recoverable template failure into a notice and no content
fn degrade(result: Result<String, CreateError>, notices: &mut Vec<Notice>) -> Result<Option<String>, CreateError> {
    match result {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.is_recoverable() => {
            warn!("{}", e);
            notices.push(Notice::from(&e));
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn template_path(
    storage: &dyn Storage,
    config: &CreatorConfig,
    file_type: FileType,
    name: &str,
) -> Result<PathBuf, CreateError> {
    let reference = template::resolve(config, file_type, name).ok_or_else(|| CreateError::TemplateNotFound {
        file_type,
        path: PathBuf::from(name),
    })?;
    ensure_in_vault(&reference.source_path)?;

    if !storage.exists(&reference.source_path) || storage.is_dir(&reference.source_path) {
        return Err(CreateError::TemplateNotFound {
            file_type,
            path: reference.source_path,
        });
    }

    Ok(reference.source_path)
}

fn read_template_text(
    storage: &dyn Storage,
    config: &CreatorConfig,
    file_type: FileType,
    name: &str,
) -> Result<String, CreateError> {
    let path = template_path(storage, config, file_type, name)?;
    Ok(storage.read_to_string(&path)?)
}

fn read_template_bytes(
    storage: &dyn Storage,
    config: &CreatorConfig,
    file_type: FileType,
    name: &str,
) -> Result<Vec<u8>, CreateError> {
    let path = template_path(storage, config, file_type, name)?;
    Ok(storage.read_bytes(&path)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn request(file_type: FileType, template: Option<&str>) -> CreationRequest {
        let config = CreatorConfig::default();
        let mut request = CreationRequest::new("New", "/", &config).with_file_type(file_type, &config);
        request.template = template.map(String::from);
        request
    }

    fn text(generated: &Generated) -> &str {
        match &generated.file.payload {
            Payload::Text(text) => text.as_str(),
            Payload::Binary(_) => panic!("expected text payload"),
        }
    }

    #[test]
    fn test_markdown_copies_template_verbatim() {
        let storage = MemoryStorage::new();
        let template = "---\ntags: [meeting]\n---\n\n# {{title}}\n";
        storage
            .write(Path::new("00-assets/02-templates/meeting.md"), template)
            .unwrap();

        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Markdown, Some("meeting.md")),
            Path::new("New.md"),
        )
        .unwrap();

        assert_eq!(text(&generated), template);
        assert!(generated.notices.is_empty());
        assert!(!generated.file.is_binary());
    }

    #[test]
    fn test_markdown_without_template_is_empty() {
        let storage = MemoryStorage::new();
        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Markdown, None),
            Path::new("New.md"),
        )
        .unwrap();

        assert_eq!(text(&generated), "");
        assert!(generated.notices.is_empty());
    }

    #[test]
    fn test_markdown_missing_template_degrades_with_warning() {
        let storage = MemoryStorage::new();
        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Markdown, Some("gone.md")),
            Path::new("New.md"),
        )
        .unwrap();

        assert_eq!(text(&generated), "");
        assert_eq!(generated.notices.len(), 1);
        assert!(generated.notices[0].message.contains("gone.md"));
    }

    #[test]
    fn test_template_outside_vault_is_refused() {
        let storage = MemoryStorage::new();
        storage.write(Path::new("00-assets/x.md"), "secret").unwrap();

        let result = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Markdown, Some("../x.md")),
            Path::new("New.md"),
        );

        assert!(matches!(result, Err(CreateError::OutsideVault(_))));
    }

    #[test]
    fn test_pdf_copies_bytes() {
        let storage = MemoryStorage::new();
        let bytes = vec![0x25, 0x50, 0x44, 0x46, 0x2d, 0x00, 0xc3, 0x28];
        storage
            .write_bytes(Path::new("00-assets/01-pdfs/blank.pdf"), &bytes)
            .unwrap();

        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Pdf, Some("blank.pdf")),
            Path::new("New.pdf"),
        )
        .unwrap();

        assert_eq!(generated.file.payload, Payload::Binary(bytes));
        assert!(generated.file.is_binary());
    }

    #[test]
    fn test_pdf_missing_template_is_fatal() {
        let storage = MemoryStorage::new();
        let result = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Pdf, Some("missing.pdf")),
            Path::new("New.pdf"),
        );

        assert!(matches!(
            result,
            Err(CreateError::TemplateNotFound { file_type: FileType::Pdf, .. })
        ));
    }

    #[test]
    fn test_pdf_without_template_name_is_fatal() {
        let storage = MemoryStorage::new();
        let result = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Pdf, None),
            Path::new("New.pdf"),
        );

        assert!(matches!(result, Err(CreateError::TemplateNotFound { .. })));
    }

    #[test]
    fn test_kanban_uses_request_spec() {
        let storage = MemoryStorage::new();
        let mut req = request(FileType::Kanban, None);
        req.options = TypeOptions::Kanban(KanbanSpec::new(["B", "A"], Vec::<String>::new()));

        let generated = generate(&storage, &CreatorConfig::default(), &req, Path::new("New.md")).unwrap();

        let board = text(&generated);
        assert!(board.starts_with("---\nkanban-plugin: basic\n---\n"));
        assert!(board.find("## B").unwrap() < board.find("## A").unwrap());
    }

    #[test]
    fn test_base_uses_buffer_verbatim() {
        let storage = MemoryStorage::new();
        storage
            .write(Path::new("00-assets/03-bases/tasks.base"), "from template")
            .unwrap();
        let mut req = request(FileType::Base, Some("tasks.base"));
        req.options = TypeOptions::Base {
            buffer: Some("views:\n  - type: table\n  not: [valid".to_string()),
        };

        let generated = generate(&storage, &CreatorConfig::default(), &req, Path::new("New.base")).unwrap();

        assert_eq!(text(&generated), "views:\n  - type: table\n  not: [valid");
    }

    #[test]
    fn test_base_seeds_buffer_from_template() {
        let storage = MemoryStorage::new();
        storage
            .write(Path::new("00-assets/03-bases/tasks.base"), "filters: []\n")
            .unwrap();

        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Base, Some("tasks.base")),
            Path::new("New.base"),
        )
        .unwrap();

        assert_eq!(text(&generated), "filters: []\n");
    }

    #[test]
    fn test_base_missing_template_is_empty() {
        let storage = MemoryStorage::new();
        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Base, Some("gone.base")),
            Path::new("New.base"),
        )
        .unwrap();

        assert_eq!(text(&generated), "");
        assert_eq!(generated.notices.len(), 1);
    }

    #[test]
    fn test_drawing_falls_back_to_blank() {
        let storage = MemoryStorage::new();

        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Drawing, None),
            Path::new("New.excalidraw.md"),
        )
        .unwrap();
        assert_eq!(text(&generated), BLANK_DRAWING);
        assert!(generated.notices.is_empty());

        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Drawing, Some("gone.excalidraw.md")),
            Path::new("New.excalidraw.md"),
        )
        .unwrap();
        assert_eq!(text(&generated), BLANK_DRAWING);
        assert_eq!(generated.notices.len(), 1);
    }

    #[test]
    fn test_drawing_copies_template() {
        let storage = MemoryStorage::new();
        storage
            .write(Path::new("00-assets/04-drawings/grid.excalidraw.md"), "grid drawing")
            .unwrap();

        let generated = generate(
            &storage,
            &CreatorConfig::default(),
            &request(FileType::Drawing, Some("grid.excalidraw.md")),
            Path::new("New.excalidraw.md"),
        )
        .unwrap();

        assert_eq!(text(&generated), "grid drawing");
    }
}
