//! Scalar field extraction.
//!
//! Fields look like `key = "value"` or `key = value` and may appear anywhere
//! in a chunk of net text. Lookup is a plain substring search for `key = `,
//! so a short key can land inside a longer one (`operator` matches inside
//! `elementOperator`); callers rely on this and order their reads around it,
//! matching the format's historical readers.

use winnow::{
    Parser,
    combinator::delimited,
    error::{ContextError, ErrMode},
    token::{take_till, take_while},
};

type FieldResult<O> = Result<O, ErrMode<ContextError>>;

fn quoted_value(input: &mut &str) -> FieldResult<String> {
    delimited('"', take_till(0.., '"'), '"')
        .map(str::to_string)
        .parse_next(input)
}

fn bare_value(input: &mut &str) -> FieldResult<String> {
    take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '_')
        .map(str::to_string)
        .parse_next(input)
}

/// Scans for `key = ` occurrences until one is followed by parseable value
/// text; empty when none is.
fn scan(data: &str, key: &str, parser: fn(&mut &str) -> FieldResult<String>) -> String {
    let needle = format!("{key} = ");
    let mut rest = data;
    while let Some(pos) = rest.find(&needle) {
        let mut tail = &rest[pos + needle.len()..];
        if let Ok(value) = parser(&mut tail) {
            return value;
        }
        rest = &rest[pos + needle.len()..];
    }
    String::new()
}

/// The first `key = "<value>"` in `data`, or empty.
pub fn quoted_field(data: &str, key: &str) -> String {
    scan(data, key, quoted_value)
}

/// The first `key = <word>` in `data` (word chars only), or empty.
pub fn bare_field(data: &str, key: &str) -> String {
    scan(data, key, bare_value)
}
