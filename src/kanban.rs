//! Kanban board synthesis

use std::collections::BTreeSet;

use crate::config::KanbanConfig;
use crate::templates::KANBAN_FRONTMATTER;

const SAMPLE_TASK: &str = "Sample task";
const SAMPLE_COMPLETED_TASK: &str = "Sample completed task";

/// Columns of a new board
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KanbanSpec {
    /// Column headers, rendered in this order
    pub headers: Vec<String>,
    /// Headers whose placeholder reads as a completed task
    pub completed: BTreeSet<String>,
}

impl KanbanSpec {
    pub fn new<H, C>(headers: H, completed: C) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            completed: completed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn from_config(config: &KanbanConfig) -> Self {
        Self::new(config.headers.iter().cloned(), config.completed.iter().cloned())
    }

    pub fn is_completed(&self, header: &str) -> bool {
        self.completed.contains(header)
    }

    /// Render the board as markdown
    ///
    /// Completed columns get a different placeholder text, but the checkbox
    /// stays unchecked for every column.
    pub fn render(&self) -> String {
        let mut out = String::from(KANBAN_FRONTMATTER);

        for header in &self.headers {
            let task = if self.is_completed(header) {
                SAMPLE_COMPLETED_TASK
            } else {
                SAMPLE_TASK
            };
            out.push_str(&format!("\n## {}\n\n- [ ] {}\n", header, task));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_preserves_header_order() {
        let board = KanbanSpec::new(["B", "A"], Vec::<String>::new()).render();

        let b = board.find("## B").unwrap();
        let a = board.find("## A").unwrap();
        assert!(b < a);
    }

    #[test]
    fn test_render_exact_output() {
        let board = KanbanSpec::new(["To Do", "Done"], ["Done"]).render();

        assert_eq!(
            board,
            "---\nkanban-plugin: basic\n---\n\n## To Do\n\n- [ ] Sample task\n\n## Done\n\n- [ ] Sample completed task\n"
        );
    }

    #[test]
    fn test_completed_columns_stay_unchecked() {
        let board = KanbanSpec::new(["Done"], ["Done"]).render();
        assert!(!board.contains("- [x]"));
    }

    #[test]
    fn test_no_headers_is_just_frontmatter() {
        assert_eq!(KanbanSpec::default().render(), KANBAN_FRONTMATTER);
    }

    #[test]
    fn test_from_config_defaults() {
        let spec = KanbanSpec::from_config(&KanbanConfig::default());
        assert_eq!(spec.headers, vec!["To Do", "In Progress", "Done"]);
        assert!(spec.is_completed("Done"));
        assert!(!spec.is_completed("To Do"));
    }
}
