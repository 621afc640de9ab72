//! Codebook items: deduplicatable entries aggregated from eligible concept
//! parts across a whole net collection.

use indexmap::IndexSet;

use crate::text::split_cell_chunks;

/// Collapses a parenthesized dynamic-index segment to a fixed placeholder.
///
/// `Sqa$(temp.genesetnummer)RedenAanvraag` becomes `Sqa$(Var)RedenAanvraag`,
/// so items generated from different runtime instantiations of the same
/// concept unify under one identity key. Uses the last `$(` that still has a
/// `)` behind it, so an unclosed trailing `$(` falls back to an earlier
/// closed segment; paths without the pattern are trimmed. Idempotent.
pub fn normalize_path(path: &str) -> String {
    if let Some(close) = path.rfind(')') {
        if let Some(open) = path[..close].rfind("$(") {
            return format!("{}Var{}", &path[..open + 2], &path[close..]);
        }
    }
    path.trim().to_string()
}

/// One aggregated codebook entry.
///
/// Created once per eligible concept part, then possibly merged with other
/// items sharing its normalized path (the second of a mergeable pair is
/// discarded) and possibly rewritten by merge heuristics.
#[derive(Debug, Clone)]
pub struct CodebookItem {
    path: String,
    caption: String,
    data_type: String,
    name: String,
    options: Vec<String>,
    validation_rules: Vec<String>,
    entry_rule_chunks: Vec<String>,
    log: String,
    node_type: String,
    node_id: String,
    net: String,
}

impl CodebookItem {
    pub fn new(
        path: &str,
        caption: &str,
        data_type: &str,
        name: &str,
        options: Vec<String>,
        validation_rules: Vec<String>,
    ) -> Self {
        Self {
            path: normalize_path(path),
            caption: caption.trim().to_string(),
            data_type: data_type.to_string(),
            name: name.to_string(),
            options,
            validation_rules,
            entry_rule_chunks: Vec::new(),
            log: String::new(),
            node_type: String::new(),
            node_id: String::new(),
            net: String::new(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn set_caption(&mut self, caption: &str) {
        self.caption = caption.to_string();
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn set_data_type(&mut self, data_type: &str) {
        self.data_type = data_type.to_string();
    }

    /// The kind/name tag of the originating part (`radio`, `text_input`, ...).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn log(&self) -> &str {
        &self.log
    }

    pub fn set_log(&mut self, log: &str) {
        self.log = log.to_string();
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn set_node_type(&mut self, node_type: &str) {
        self.node_type = node_type.to_string();
    }

    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    pub fn set_node_id(&mut self, node_id: &str) {
        self.node_id = node_id.to_string();
    }

    pub fn net(&self) -> &str {
        &self.net
    }

    pub fn set_net(&mut self, net: &str) {
        self.net = net.to_string();
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Option values joined with `"; "`.
    pub fn options_string(&self) -> String {
        self.options.join("; ")
    }

    /// Validation rules joined with `"; "`.
    pub fn validation_string(&self) -> String {
        self.validation_rules.join("; ")
    }

    /// Stores the derived entry condition, chunked to the cell limit.
    pub fn set_entry_rule(&mut self, rule: &str) {
        self.entry_rule_chunks = split_cell_chunks(rule);
    }

    pub fn entry_rule_chunks(&self) -> &[String] {
        &self.entry_rule_chunks
    }

    pub fn chunk_count(&self) -> usize {
        self.entry_rule_chunks.len()
    }

    /// The entry condition as one string (chunks concatenated).
    pub fn entry_rule(&self) -> String {
        self.entry_rule_chunks.concat()
    }

    /// The path truncated to the identifier width the secondary per-concept
    /// sheet accepts.
    pub fn sheet_ref(&self) -> &str {
        let mut end = self.path.len().min(31);
        while !self.path.is_char_boundary(end) {
            end -= 1;
        }
        &self.path[..end]
    }

    /// Unions both items' option sets, preserving first-occurrence order.
    ///
    /// Both items end up holding the merged sequence, even when the pair is
    /// ultimately not merged; later output depends on this.
    pub fn merge_options(&mut self, other: &mut CodebookItem) {
        let mut set: IndexSet<String> = IndexSet::new();
        set.extend(self.options.drain(..));
        set.extend(other.options.drain(..));
        let merged: Vec<String> = set.into_iter().collect();
        self.options = merged.clone();
        other.options = merged;
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn normalize_collapses_the_dynamic_segment() {
        assert_eq!(
            normalize_path("Sqa$(temp.genesetnummer)RedenAanvraag"),
            "Sqa$(Var)RedenAanvraag"
        );
    }

    #[test]
    fn normalize_trims_plain_paths() {
        assert_eq!(normalize_path("  concept1 "), "concept1");
        assert_eq!(normalize_path("a.b.c"), "a.b.c");
    }

    #[test]
    fn normalize_uses_the_last_markers() {
        assert_eq!(normalize_path("a$(x)b$(y)c"), "a$(x)b$(Var)c");
    }

    #[test]
    fn normalize_ignores_unclosed_segments() {
        assert_eq!(normalize_path("a$(x"), "a$(x");
        assert_eq!(normalize_path("a)b$(x"), "a)b$(x");
    }

    #[test]
    fn normalize_backtracks_past_an_unclosed_tail() {
        assert_eq!(normalize_path("a$(x)b$(y"), "a$(Var)b$(y");
    }

    #[test]
    fn option_union_is_order_preserving_and_shared() {
        let mut first = CodebookItem::new(
            "p",
            "c",
            "text",
            "t",
            vec!["a".into(), "b".into()],
            vec![],
        );
        let mut second = CodebookItem::new(
            "p",
            "c",
            "text",
            "t",
            vec!["b".into(), "c".into()],
            vec![],
        );
        first.merge_options(&mut second);
        assert_eq!(first.options(), ["a", "b", "c"]);
        assert_eq!(second.options(), ["a", "b", "c"]);

        // Idempotent: a second union changes nothing.
        first.merge_options(&mut second);
        assert_eq!(first.options(), ["a", "b", "c"]);
    }

    #[test]
    fn sheet_ref_truncates_long_paths() {
        let item = CodebookItem::new(&"x".repeat(40), "", "", "", vec![], vec![]);
        assert_eq!(item.sheet_ref().len(), 31);
        let short = CodebookItem::new("short", "", "", "", vec![], vec![]);
        assert_eq!(short.sheet_ref(), "short");
    }

    #[test]
    fn caption_is_trimmed_on_construction() {
        let item = CodebookItem::new("p", "  Caption  ", "", "", vec![], vec![]);
        assert_eq!(item.caption(), "Caption");
    }

    proptest! {
        #[test]
        fn normalize_is_idempotent(path in ".{0,60}") {
            let once = normalize_path(&path);
            prop_assert_eq!(normalize_path(&once), once);
        }
    }
}
