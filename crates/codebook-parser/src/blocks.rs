//! Brace-block extraction and splitting.
//!
//! The format is line-oriented: the depth bookkeeping counts at most one
//! brace step per line (a line containing `{` opens, otherwise a line
//! containing `}` closes), which is how the dumps are laid out. Malformed
//! input degrades to truncated or over-long blocks, never to an error.

/// The lines from the first occurrence of `marker` up to and including the
/// line on which the brace depth returns to zero. Empty when the marker is
/// absent. Each returned line keeps a trailing newline.
pub(crate) fn element_block(data: &str, marker: &str) -> String {
    let Some(start) = data.find(marker) else {
        return String::new();
    };
    let mut output = String::new();
    let mut depth = 0i32;
    for line in data[start..].split('\n') {
        output.push_str(line);
        output.push('\n');
        if line.contains('{') {
            depth += 1;
        } else if line.contains('}') {
            depth -= 1;
        }
        if depth == 0 {
            break;
        }
    }
    output
}

/// Splits a two-level block (`name = { {..}, {..} }`) into its depth-two
/// children. Lines at depth one (the outer braces) are dropped; a closing
/// brace at depth two ends the current child.
pub(crate) fn sibling_blocks(data: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut depth = 0i32;
    for line in data.split('\n') {
        if line.contains('{') {
            depth += 1;
        }
        if depth >= 2 {
            current.push_str(line);
            current.push('\n');
        }
        if depth == 2 && line.contains('}') {
            items.push(std::mem::take(&mut current));
        }
        if line.contains('}') {
            depth -= 1;
        }
    }
    items
}

/// Splits at every `,` followed by optional whitespace and `{`, consuming
/// the separator including the brace. Used for lists whose children contain
/// nested braces of their own.
pub(crate) fn comma_brace_split(data: &str) -> Vec<&str> {
    let bytes = data.as_bytes();
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b',' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'{' {
                pieces.push(&data[start..i]);
                start = j + 1;
                i = j + 1;
                continue;
            }
        }
        i += 1;
    }
    pieces.push(&data[start..]);
    pieces
}
