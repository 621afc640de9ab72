//! Merging of codebook items that share a normalized path.
//!
//! Items from different nodes often describe the same concept. A merge pass
//! collapses a group of same-path items pairwise: the option sets are always
//! unioned first, then the pair is merged only when the captions agree and
//! the active policy accepts the remaining fields. Disagreeing captions are
//! reported through a [`CaptionResolver`] so a curator can supply overrides.

use crate::item::CodebookItem;

/// Caption curation hook used during merging.
///
/// Implementations hold path-to-caption overrides and collect the caption
/// conflicts the merge pass could not resolve.
pub trait CaptionResolver {
    /// The curated caption for `path`, when one is available.
    fn overridden_caption(&self, path: &str) -> Option<&str>;

    /// Records a caption seen for `path` during a refused merge.
    fn record_conflict(&mut self, path: &str, caption: &str);
}

/// Replaces item captions with their curated overrides.
///
/// Overrides apply whenever present, also without any conflict; they exist
/// to let a curator supply better labels, not only tie-breakers.
pub fn apply_overrides(items: &mut [CodebookItem], resolver: &dyn CaptionResolver) {
    for item in items.iter_mut() {
        if let Some(caption) = resolver.overridden_caption(item.path()) {
            let caption = caption.to_string();
            item.set_caption(&caption);
        }
    }
}

/// How strictly two same-path items must agree before they merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Items must agree on data type, validation rules, and entry condition.
    Strict,
    /// Items must agree on data type only, after a round of normalization
    /// fixups that reconcile near-equivalent type and input-kind spellings.
    Lenient,
}

impl MergePolicy {
    /// Decides whether the pair may merge. Lenient mode rewrites both items'
    /// type fields while deciding; the rewrites stick even when the answer
    /// is no.
    fn may_merge(self, first: &mut CodebookItem, second: &mut CodebookItem) -> bool {
        match self {
            MergePolicy::Strict => {
                first.data_type().eq_ignore_ascii_case(second.data_type())
                    && first
                        .validation_string()
                        .eq_ignore_ascii_case(&second.validation_string())
                    && first.entry_rule().eq_ignore_ascii_case(&second.entry_rule())
            }
            MergePolicy::Lenient => {
                reconcile_types(first, second);
                first.data_type().eq_ignore_ascii_case(second.data_type())
            }
        }
    }
}

/// Collapses a group of items sharing one normalized path.
///
/// Pairwise and cascading: each survivor is compared against every later
/// item; merged items are removed, so one survivor can absorb a whole run.
/// Option sets are unioned into both members of every compared pair before
/// the merge decision, so even refused pairs end up with the full set.
pub fn merge_group(
    items: &mut Vec<CodebookItem>,
    policy: MergePolicy,
    resolver: &mut dyn CaptionResolver,
) {
    let mut i = 0;
    while i < items.len() {
        let mut j = i + 1;
        while j < items.len() {
            let (head, tail) = items.split_at_mut(j);
            let first = &mut head[i];
            let second = &mut tail[0];
            first.merge_options(second);
            if captions_agree(first, second, resolver) && policy.may_merge(first, second) {
                items.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
}

/// Caption agreement check; on disagreement both captions are reported as a
/// conflict under the shared path and the pair stays unmerged.
fn captions_agree(
    first: &CodebookItem,
    second: &CodebookItem,
    resolver: &mut dyn CaptionResolver,
) -> bool {
    if first.caption().eq_ignore_ascii_case(second.caption()) {
        return true;
    }
    resolver.record_conflict(first.path(), first.caption());
    resolver.record_conflict(first.path(), second.caption());
    false
}

/// Lenient-mode fixups, applied in both directions.
///
/// `number` is respelled `numeric`; `text` widens to `numeric` when paired
/// with it; a `radio` input imposes its kind and data type on its partner;
/// `text_input` wins over `format_variable`.
fn reconcile_types(first: &mut CodebookItem, second: &mut CodebookItem) {
    fix_number(first);
    fix_number(second);
    fix_text_number(first, second);
    fix_text_number(second, first);
    fix_radio(first, second);
    fix_radio(second, first);
    fix_text_format(first, second);
    fix_text_format(second, first);
}

fn fix_number(item: &mut CodebookItem) {
    if item.data_type().eq_ignore_ascii_case("number") {
        item.set_data_type("numeric");
    }
}

fn fix_text_number(first: &mut CodebookItem, second: &CodebookItem) {
    if first.data_type().eq_ignore_ascii_case("text")
        && second.data_type().eq_ignore_ascii_case("numeric")
    {
        first.set_data_type("numeric");
    }
}

fn fix_radio(first: &CodebookItem, second: &mut CodebookItem) {
    if first.name().eq_ignore_ascii_case("radio") && !second.name().eq_ignore_ascii_case("radio") {
        second.set_name("radio");
        let data_type = first.data_type().to_string();
        second.set_data_type(&data_type);
    }
}

fn fix_text_format(first: &CodebookItem, second: &mut CodebookItem) {
    if first.name().eq_ignore_ascii_case("text_input")
        && second.name().eq_ignore_ascii_case("format_variable")
    {
        second.set_name("text_input");
    }
}
