//! @acp:module "Notebook"
//! @acp:summary "Code and markdown cell extraction from Jupyter notebooks"
//! @acp:domain cli
//! @acp:layer parser
//!
//! Only `cell_type` and `source` are read. Outputs, execution counts and
//! metadata are never deserialized.

use serde::Deserialize;

/// Notebook document, reduced to what the archive needs
#[derive(Debug, Deserialize)]
struct NotebookDocument {
    #[serde(default)]
    cells: Vec<RawCell>,
}

#[derive(Debug, Deserialize)]
struct RawCell {
    #[serde(default)]
    cell_type: Option<String>,
    #[serde(default)]
    source: Option<CellSource>,
}

/// nbformat allows either a list of lines or one string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CellSource {
    Lines(Vec<String>),
    Text(String),
}

impl CellSource {
    fn into_lines(self) -> Vec<String> {
        match self {
            Self::Lines(lines) => lines,
            Self::Text(text) => vec![text],
        }
    }
}

/// Archived cell kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Code,
    Markdown,
}

impl CellKind {
    fn from_cell_type(cell_type: &str) -> Option<Self> {
        match cell_type {
            "code" => Some(Self::Code),
            "markdown" => Some(Self::Markdown),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "Code",
            Self::Markdown => "Markdown",
        }
    }
}

/// @acp:summary "One archived notebook cell"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookCell {
    /// 1-based position among archived cells
    pub index: usize,
    pub kind: CellKind,
    pub source_lines: Vec<String>,
}

impl NotebookCell {
    /// Source lines joined verbatim
    pub fn source(&self) -> String {
        self.source_lines.concat()
    }

    /// Marker line followed by the source
    pub fn render(&self) -> String {
        format!(
            "# --- {} Cell {} ---\n{}\n",
            self.kind.label(),
            self.index,
            self.source()
        )
    }
}

/// @acp:summary "Parse notebook JSON into numbered code/markdown cells"
///
/// Cells of any other type and cells with blank source are dropped without
/// consuming a number, so numbering is contiguous over what gets archived.
pub fn parse_notebook(text: &str) -> serde_json::Result<Vec<NotebookCell>> {
    let document: NotebookDocument = serde_json::from_str(text)?;

    let mut cells = Vec::new();
    for raw in document.cells {
        let Some(kind) = raw.cell_type.as_deref().and_then(CellKind::from_cell_type) else {
            continue;
        };
        let source_lines = raw.source.map(CellSource::into_lines).unwrap_or_default();
        if source_lines.iter().all(|line| line.trim().is_empty()) {
            continue;
        }
        cells.push(NotebookCell {
            index: cells.len() + 1,
            kind,
            source_lines,
        });
    }
    Ok(cells)
}

/// Blocks separated by a blank line
pub fn render_cells(cells: &[NotebookCell]) -> String {
    cells
        .iter()
        .map(NotebookCell::render)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MIXED: &str = r##"{
  "cells": [
    {"cell_type": "markdown", "metadata": {}, "source": ["# Title\n", "intro"]},
    {"cell_type": "code", "execution_count": 1, "metadata": {}, "outputs": [
        {"output_type": "display_data", "data": {"image/png": "iVBORw0KGgo="}}
    ], "source": ["import os\n", "print(os.name)"]},
    {"cell_type": "raw", "metadata": {}, "source": ["raw text"]},
    {"cell_type": "code", "metadata": {}, "outputs": [], "source": "x = 1"},
    {"cell_type": "markdown", "metadata": {}, "source": ["notes"]},
    {"cell_type": "code", "metadata": {}, "outputs": [], "source": ["y = 2"]}
  ],
  "metadata": {},
  "nbformat": 4,
  "nbformat_minor": 5
}"##;

    #[test]
    fn test_raw_cell_skipped_without_consuming_number() {
        let cells = parse_notebook(MIXED).unwrap();

        assert_eq!(cells.len(), 5);
        assert_eq!(
            cells.iter().map(|c| (c.index, c.kind)).collect::<Vec<_>>(),
            vec![
                (1, CellKind::Markdown),
                (2, CellKind::Code),
                (3, CellKind::Code),
                (4, CellKind::Markdown),
                (5, CellKind::Code),
            ]
        );
    }

    #[test]
    fn test_string_and_list_sources_both_accepted() {
        let cells = parse_notebook(MIXED).unwrap();
        assert_eq!(cells[1].source(), "import os\nprint(os.name)");
        assert_eq!(cells[2].source(), "x = 1");
    }

    #[test]
    fn test_render_excludes_outputs() {
        let rendered = render_cells(&parse_notebook(MIXED).unwrap());

        assert!(!rendered.contains("iVBORw0KGgo"));
        assert!(!rendered.contains("raw text"));
        assert_eq!(
            rendered,
            "# --- Markdown Cell 1 ---\n# Title\nintro\n\
             \n# --- Code Cell 2 ---\nimport os\nprint(os.name)\n\
             \n# --- Code Cell 3 ---\nx = 1\n\
             \n# --- Markdown Cell 4 ---\nnotes\n\
             \n# --- Code Cell 5 ---\ny = 2\n"
        );
    }

    #[test]
    fn test_blank_cells_skipped() {
        let text = r#"{"cells": [
            {"cell_type": "code", "source": ["   \n"]},
            {"cell_type": "code", "source": []},
            {"cell_type": "code", "source": ["a = 1"]}
        ]}"#;
        let cells = parse_notebook(text).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].index, 1);
    }

    #[test]
    fn test_missing_cells_key_is_empty() {
        assert!(parse_notebook(r#"{"metadata": {}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(parse_notebook("not a notebook").is_err());
        assert!(parse_notebook(r#"{"cells": 3}"#).is_err());
    }
}
