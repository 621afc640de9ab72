//! Codebook assembly and sheet projection.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

use chrono::Local;

use codebook_core::item::CodebookItem;
use codebook_core::merge::{apply_overrides, merge_group};

use crate::captions::CaptionOverwriter;
use crate::protocol::Protocol;
use crate::variant::CodebookKind;
use crate::workbook::{DelimitedWorkbook, Workbook};

/// One output codebook: a variant kind plus a sheet layout, filled with the
/// merged item map.
#[derive(Debug)]
pub struct Codebook {
    kind: CodebookKind,
    separate_sheets: bool,
    items: BTreeMap<String, Vec<CodebookItem>>,
    max_chunks: usize,
}

impl Codebook {
    pub fn new(kind: CodebookKind, separate_sheets: bool) -> Self {
        Self {
            kind,
            separate_sheets,
            items: BTreeMap::new(),
            max_chunks: 0,
        }
    }

    pub fn kind(&self) -> CodebookKind {
        self.kind
    }

    pub fn separate_sheets(&self) -> bool {
        self.separate_sheets
    }

    /// Takes ownership of an aggregated item map, applies caption overrides,
    /// and merges every same-path group under this variant's policy.
    ///
    /// The widest entry-condition chunk count is remembered; it decides how
    /// many `field_entered_when_<n>` columns the header carries.
    pub fn build(
        &mut self,
        mut items: BTreeMap<String, Vec<CodebookItem>>,
        overwriter: &mut CaptionOverwriter,
    ) {
        for group in items.values_mut() {
            apply_overrides(group, overwriter);
            merge_group(group, self.kind.merge_policy(), overwriter);
        }
        self.max_chunks = items
            .values()
            .flatten()
            .map(CodebookItem::chunk_count)
            .max()
            .unwrap_or(0);
        self.items = items;
    }

    /// `<protocol>_codebook_<smallVersion>_<TYPE>[_sep].tsv`
    pub fn file_name(&self, protocol: &Protocol) -> String {
        let sep = if self.separate_sheets { "_sep" } else { "" };
        format!(
            "{}_codebook_{}_{}{}.tsv",
            protocol.name(),
            protocol.small_version(),
            self.kind.label(),
            sep
        )
    }

    /// Renders and saves the codebook into the output directory.
    pub fn write(&self, protocol: &Protocol, output_dir: &Path) -> io::Result<()> {
        let mut book = DelimitedWorkbook::new();
        self.render(&mut book, protocol);
        book.save(&output_dir.join(self.file_name(protocol)))
    }

    fn render(&self, book: &mut dyn Workbook, protocol: &Protocol) {
        if self.separate_sheets {
            self.render_options_in_sheets(book, protocol);
        } else {
            self.render_single_sheet(book);
        }
    }

    fn render_single_sheet(&self, book: &mut dyn Workbook) {
        book.add_sheet("CODEBOOK", &self.main_header());
        for item in self.items.values().flatten() {
            book.append_row("CODEBOOK", &self.single_sheet_row(item));
        }
    }

    fn render_options_in_sheets(&self, book: &mut dyn Workbook, protocol: &Protocol) {
        if self.kind == CodebookKind::Nki {
            add_info_sheet(book, protocol);
        }
        book.add_sheet("CODEBOOK", &self.main_header());
        for item in self.items.values().flatten() {
            book.append_row("CODEBOOK", &self.separate_sheet_row(item));
            if item.has_options() && !book.has_sheet(item.sheet_ref()) {
                book.add_sheet(item.sheet_ref(), &self.options_header());
                for option in item.options() {
                    book.append_row(item.sheet_ref(), &[option.clone(), option.clone()]);
                }
            }
        }
    }

    fn main_header(&self) -> Vec<String> {
        let mut header: Vec<String> = match (self.kind, self.separate_sheets) {
            (CodebookKind::Nki, false) => {
                to_rows(&["path", "caption", "input_type", "data_type", "options"])
            }
            (CodebookKind::Nki, true) => to_rows(&[
                "id",
                "description_nl",
                "description_en",
                "codesystem",
                "code",
                "description_code",
                "codelist_ref",
                "data_type",
                "input_type",
                "properties",
            ]),
            (CodebookKind::Debug, false) => to_rows(&[
                "netname",
                "id",
                "ntype",
                "log",
                "path",
                "caption",
                "input_type",
                "data_type",
                "options",
                "field_validation",
            ]),
            (CodebookKind::Debug, true) => to_rows(&[
                "netname",
                "id",
                "ntype",
                "log",
                "path",
                "caption",
                "input_type",
                "data_type",
                "codelist_ref",
                "field_validation",
            ]),
            (CodebookKind::Palga | CodebookKind::PalgaWeb, _) => to_rows(&[
                "path",
                "caption",
                "input_type",
                "data_type",
                "options",
                "field_validation",
            ]),
        };
        if self.has_entered_when_columns() {
            for i in 1..=self.max_chunks {
                header.push(format!("field_entered_when_{i}"));
            }
        }
        header
    }

    /// The entry-condition columns appear on the variants that carry the
    /// conditions at all.
    fn has_entered_when_columns(&self) -> bool {
        matches!(self.kind, CodebookKind::Palga | CodebookKind::Debug)
    }

    fn options_header(&self) -> Vec<String> {
        match self.kind {
            CodebookKind::Nki => to_rows(&[
                "value_nl",
                "description_nl",
                "value_en",
                "description_en",
                "codesystem",
                "code",
                "description_code",
            ]),
            _ => to_rows(&["PALGA_VALUE", "PALGA_DESCRIPTION", "CODESYSTEM"]),
        }
    }

    fn single_sheet_row(&self, item: &CodebookItem) -> Vec<String> {
        match self.kind {
            CodebookKind::Nki => to_rows(&[
                item.path(),
                item.caption(),
                item.name(),
                item.data_type(),
                &item.options_string(),
            ]),
            _ => self.registry_row(item, &item.options_string()),
        }
    }

    fn separate_sheet_row(&self, item: &CodebookItem) -> Vec<String> {
        match self.kind {
            CodebookKind::Nki => {
                let codelist_ref = if item.has_options() { item.path() } else { "" };
                let property = format!("{{PALGA_COLNAME={}}}", item.path());
                to_rows(&[
                    item.path(),
                    item.caption(),
                    "",
                    "",
                    "",
                    "",
                    codelist_ref,
                    item.data_type(),
                    item.name(),
                    &property,
                ])
            }
            _ => {
                let sheet_ref = if item.has_options() { item.sheet_ref() } else { "" };
                self.registry_row(item, sheet_ref)
            }
        }
    }

    /// The shared Palga/PalgaWeb/Debug row shape; `options_cell` holds the
    /// joined options or the options-sheet reference depending on layout.
    fn registry_row(&self, item: &CodebookItem, options_cell: &str) -> Vec<String> {
        let mut row = Vec::new();
        if self.kind == CodebookKind::Debug {
            row.extend(to_rows(&[
                item.net(),
                item.node_id(),
                item.node_type(),
                item.log(),
            ]));
        }
        row.extend(to_rows(&[
            item.path(),
            item.caption(),
            item.name(),
            item.data_type(),
            options_cell,
            &item.validation_string(),
        ]));
        if self.has_entered_when_columns() {
            row.extend(item.entry_rule_chunks().iter().cloned());
        }
        row
    }
}

fn add_info_sheet(book: &mut dyn Workbook, protocol: &Protocol) {
    let name = protocol.name();
    let version = protocol.small_version();
    let effective_date = Local::now().format("%Y-%m-%d").to_string();
    book.add_sheet_without_header("INFO");
    let rows = [
        ("Version", version.to_string()),
        ("DatasetName_nl", format!("PALGA Protocol: {name}")),
        (
            "DatasetDescription_nl",
            format!("PALGA Protocol: {name} versie {version}"),
        ),
        ("DatasetName_en", format!("PALGA Protocol: {name}")),
        (
            "DatasetDescription_en",
            format!("PALGA Protocol: {name} version {version}"),
        ),
        ("Effectivedate", effective_date),
    ];
    for (key, value) in rows {
        book.append_row("INFO", &[key.to_string(), value]);
    }
}

fn to_rows(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
