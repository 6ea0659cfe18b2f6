// Spreadsheet loader with path-keyed memoization
//
// Reads `.xlsx`/`.xls`/`.ods` via calamine and `.csv` via the csv crate.
// The first row is treated as the header; title/body columns are located
// by label and missing columns degrade to placeholders instead of failing.
//
// The cache is keyed by path only, not modification time: edits to the
// file after first load are not observed for the rest of the process.
// This mirrors the load-once contract of the corpus.

use calamine::{open_workbook_auto, Data, Reader};
use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

use super::{build_context, Proposal};

const TITLE_LABELS: &[&str] = &["제목", "title"];
const BODY_LABELS: &[&str] = &["내용", "body", "content"];

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("{0}")]
    Parse(String),

    #[error("no proposal rows found in {}", .0.display())]
    Empty(PathBuf),
}

/// Loads and caches proposal corpora. Constructed once at startup and
/// shared by handle; the cached context is read-only after first build.
pub struct CorpusLoader {
    cache: DashMap<PathBuf, Arc<str>>,
}

impl CorpusLoader {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Load the corpus context for `path`, parsing at most once per path.
    pub fn load(&self, path: &Path) -> Result<Arc<str>, CorpusError> {
        if let Some(cached) = self.cache.get(path) {
            tracing::debug!("Corpus cache hit for {}", path.display());
            return Ok(Arc::clone(&cached));
        }

        if !path.exists() {
            return Err(CorpusError::NotFound(path.to_path_buf()));
        }

        let proposals = read_proposals(path)?;
        if proposals.is_empty() {
            return Err(CorpusError::Empty(path.to_path_buf()));
        }

        tracing::info!(
            "Loaded {} proposals from {}",
            proposals.len(),
            path.display()
        );

        let context: Arc<str> = Arc::from(build_context(&proposals));
        self.cache.insert(path.to_path_buf(), Arc::clone(&context));
        Ok(context)
    }
}

impl Default for CorpusLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_proposals(path: &Path) -> Result<Vec<Proposal>, CorpusError> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);

    if is_csv {
        read_csv(path)
    } else {
        read_spreadsheet(path)
    }
}

fn read_spreadsheet(path: &Path) -> Result<Vec<Proposal>, CorpusError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| CorpusError::Parse(e.to_string()))?;

    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| CorpusError::Parse("workbook has no sheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| CorpusError::Parse(e.to_string()))?;

    let mut rows = range.rows();
    let header: Vec<Option<String>> = match rows.next() {
        Some(cells) => cells.iter().map(cell_text).collect(),
        None => return Ok(Vec::new()),
    };

    Ok(proposals_from_rows(
        &header,
        rows.map(|cells| cells.iter().map(cell_text).collect()),
    ))
}

fn read_csv(path: &Path) -> Result<Vec<Proposal>, CorpusError> {
    let mut reader =
        csv::Reader::from_path(path).map_err(|e| CorpusError::Parse(e.to_string()))?;

    let header: Vec<Option<String>> = reader
        .headers()
        .map_err(|e| CorpusError::Parse(e.to_string()))?
        .iter()
        .map(field_text)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| CorpusError::Parse(e.to_string()))?;
        rows.push(record.iter().map(field_text).collect());
    }

    Ok(proposals_from_rows(&header, rows))
}

/// Map raw rows to proposals using the header to locate the title/body
/// columns. Shared by the spreadsheet and CSV paths.
fn proposals_from_rows<I>(header: &[Option<String>], rows: I) -> Vec<Proposal>
where
    I: IntoIterator<Item = Vec<Option<String>>>,
{
    let title_col = locate_column(header, TITLE_LABELS);
    let body_col = locate_column(header, BODY_LABELS);

    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let field = |col: Option<usize>| col.and_then(|c| row.get(c).cloned().flatten());
            Proposal::new(i + 1, field(title_col), field(body_col))
        })
        .collect()
}

fn locate_column(header: &[Option<String>], labels: &[&str]) -> Option<usize> {
    header.iter().position(|cell| {
        cell.as_deref()
            .map(|text| {
                let text = text.trim().to_lowercase();
                labels.iter().any(|label| text == *label)
            })
            .unwrap_or(false)
    })
}

/// Coerce a spreadsheet cell to trimmed text, numbers included, the way
/// the proposal fields are stringified. Empty and error cells yield None.
fn cell_text(cell: &Data) -> Option<String> {
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(_) | Data::Empty => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn field_text(field: &str) -> Option<String> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
