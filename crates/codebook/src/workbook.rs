//! Workbook output abstraction.
//!
//! Codebooks are written through the small [`Workbook`] trait so the sheet
//! structure stays independent of the file format. The shipped
//! [`DelimitedWorkbook`] renders sheets as tab-separated text with a banner
//! line per sheet, which diffs well and loads into any spreadsheet tool.

use std::fs;
use std::io;
use std::path::Path;

use indexmap::IndexMap;

use codebook_core::text::strip_quotes;

/// A multi-sheet tabular output document.
///
/// Cell and sheet-name values may arrive with surrounding quotes from the
/// net dumps; implementations strip one surrounding pair.
pub trait Workbook {
    /// Creates a sheet with a header row. Creating an existing sheet again
    /// is a no-op.
    fn add_sheet(&mut self, name: &str, header: &[String]);

    /// Creates a headerless sheet.
    fn add_sheet_without_header(&mut self, name: &str);

    fn has_sheet(&self, name: &str) -> bool;

    /// Appends one row to a sheet, creating the sheet headerless when it
    /// does not exist yet.
    fn append_row(&mut self, sheet: &str, values: &[String]);

    fn save(&self, path: &Path) -> io::Result<()>;
}

#[derive(Debug, Default)]
struct Sheet {
    header: Option<Vec<String>>,
    rows: Vec<Vec<String>>,
}

/// In-memory workbook saved as tab-separated text.
///
/// Sheets keep insertion order; each starts with a `## <name>` banner line,
/// followed by the header row (when present) and the data rows.
#[derive(Debug, Default)]
pub struct DelimitedWorkbook {
    sheets: IndexMap<String, Sheet>,
}

impl DelimitedWorkbook {
    pub fn new() -> Self {
        Self::default()
    }
}

fn clean_row(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| strip_quotes(value).to_string())
        .collect()
}

impl Workbook for DelimitedWorkbook {
    fn add_sheet(&mut self, name: &str, header: &[String]) {
        let name = strip_quotes(name);
        if !self.sheets.contains_key(name) {
            self.sheets.insert(
                name.to_string(),
                Sheet {
                    header: Some(clean_row(header)),
                    rows: Vec::new(),
                },
            );
        }
    }

    fn add_sheet_without_header(&mut self, name: &str) {
        let name = strip_quotes(name);
        if !self.sheets.contains_key(name) {
            self.sheets.insert(name.to_string(), Sheet::default());
        }
    }

    fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(strip_quotes(name))
    }

    fn append_row(&mut self, sheet: &str, values: &[String]) {
        let row = clean_row(values);
        self.sheets
            .entry(strip_quotes(sheet).to_string())
            .or_default()
            .rows
            .push(row);
    }

    fn save(&self, path: &Path) -> io::Result<()> {
        let mut output = String::new();
        for (name, sheet) in &self.sheets {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str("## ");
            output.push_str(name);
            output.push('\n');
            if let Some(header) = &sheet.header {
                output.push_str(&header.join("\t"));
                output.push('\n');
            }
            for row in &sheet.rows {
                output.push_str(&row.join("\t"));
                output.push('\n');
            }
        }
        fs::write(path, output)
    }
}
