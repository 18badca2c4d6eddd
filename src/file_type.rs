//! File type dispatch
//!
//! Maps each creatable file type to its extension and to where (if anywhere)
//! its content template comes from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kinds of file the creator can materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Markdown,
    Pdf,
    Kanban,
    Base,
    Drawing,
}

/// Where a file type's content template comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateSource {
    /// Content is synthesized; no template folder
    None,
    /// A template may be chosen; its absence degrades gracefully
    Optional,
    /// Creation fails if no template resolves
    Required,
}

impl FileType {
    pub const ALL: [FileType; 5] = [
        FileType::Markdown,
        FileType::Pdf,
        FileType::Kanban,
        FileType::Base,
        FileType::Drawing,
    ];

    /// Extension appended to the built name, including the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            FileType::Markdown | FileType::Kanban => ".md",
            FileType::Pdf => ".pdf",
            FileType::Base => ".base",
            FileType::Drawing => ".excalidraw.md",
        }
    }

    pub fn template_source(self) -> TemplateSource {
        match self {
            FileType::Kanban => TemplateSource::None,
            FileType::Pdf => TemplateSource::Required,
            FileType::Markdown | FileType::Base | FileType::Drawing => TemplateSource::Optional,
        }
    }

    pub fn template_required(self) -> bool {
        self.template_source() == TemplateSource::Required
    }

    /// Whether the user can browse a template folder for this type
    pub fn requires_template_browse(self) -> bool {
        self.template_source() != TemplateSource::None
    }

    /// Extension a file must have to be listed as a template for this type
    ///
    /// Drawing templates are plain markdown files, so `.excalidraw.md`
    /// templates match as well.
    pub fn template_extension(self) -> Option<&'static str> {
        match self {
            FileType::Markdown | FileType::Drawing => Some(".md"),
            FileType::Pdf => Some(".pdf"),
            FileType::Base => Some(".base"),
            FileType::Kanban => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Markdown => "markdown",
            FileType::Pdf => "pdf",
            FileType::Kanban => "kanban",
            FileType::Base => "base",
            FileType::Drawing => "drawing",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileType::ALL
            .into_iter()
            .find(|ty| ty.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid file type: {}. Use one of: markdown, pdf, kanban, base, drawing.",
                    s
                )
            })
    }
}
