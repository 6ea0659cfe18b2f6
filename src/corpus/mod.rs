// Proposal corpus
// Loads the proposal spreadsheet and flattens it into one cached text
// context that every backend prompt carries.

mod loader;

pub use loader::{CorpusError, CorpusLoader};

pub const TITLE_PLACEHOLDER: &str = "(제목 없음)";
pub const BODY_PLACEHOLDER: &str = "(내용 없음)";

/// One row of the source spreadsheet: a single submitted policy idea.
/// Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// 1-based position in the source table.
    pub index: usize,
    pub title: String,
    pub body: String,
}

impl Proposal {
    pub fn new(index: usize, title: Option<String>, body: Option<String>) -> Self {
        Self {
            index,
            title: title.unwrap_or_else(|| TITLE_PLACEHOLDER.to_string()),
            body: body.unwrap_or_else(|| BODY_PLACEHOLDER.to_string()),
        }
    }

    /// Format this proposal as one context block.
    pub fn context_block(&self) -> String {
        format!(
            "[{}번 제안] 제목: {} / 내용: {}",
            self.index, self.title, self.body
        )
    }
}

/// Flatten all proposals into the corpus context, blocks separated by a
/// blank line, in row order.
pub fn build_context(proposals: &[Proposal]) -> String {
    proposals
        .iter()
        .map(Proposal::context_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}
