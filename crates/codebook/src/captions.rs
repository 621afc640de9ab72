//! Caption overrides and conflict tracking.
//!
//! Protocol authors sometimes give the same concept different captions in
//! different nodes. A curator can supply an override file mapping paths to
//! the caption that should win; conflicts that no override resolves are
//! collected and written to a report so the override file can be extended.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use codebook_core::merge::CaptionResolver;

use crate::error::CodebookError;

/// Placeholder recorded for an empty caption in the conflict report.
pub const NO_CAPTION: &str = "<NO CAPTION>";

/// Caption override store and conflict collector for one protocol.
#[derive(Debug)]
pub struct CaptionOverwriter {
    protocol_name: String,
    overrides: HashMap<String, String>,
    conflicts: BTreeMap<String, Vec<String>>,
    has_overrides: bool,
}

impl CaptionOverwriter {
    pub fn new(protocol_name: &str) -> Self {
        Self {
            protocol_name: protocol_name.to_string(),
            overrides: HashMap::new(),
            conflicts: BTreeMap::new(),
            has_overrides: false,
        }
    }

    /// Loads an override file.
    ///
    /// The first line must be `#<protocolName>` (trimmed, case-insensitive)
    /// so a file cannot silently be applied to the wrong protocol. Data
    /// lines are `path<TAB>caption`; the first occurrence of a duplicated
    /// path wins, lines without a tab are skipped with a warning.
    pub fn read_file(&mut self, path: &Path) -> Result<(), CodebookError> {
        let text = decode(&fs::read(path)?);
        let mut lines = text.lines();
        let expected = format!("#{}", self.protocol_name);
        let header = lines.next().unwrap_or_default();
        if !header.trim().eq_ignore_ascii_case(&expected) {
            return Err(CodebookError::OverwriteHeader {
                path: path.display().to_string(),
                expected,
            });
        }
        for line in lines {
            let mut fields = line.split('\t');
            match (fields.next(), fields.next()) {
                (Some(concept), Some(caption)) => {
                    if self.overrides.contains_key(concept) {
                        info!(path = concept; "override file contains duplicates, keeping the first");
                    } else {
                        self.overrides
                            .insert(concept.to_string(), caption.to_string());
                    }
                }
                _ => {
                    if !line.trim().is_empty() {
                        warn!(line; "override line has no tab separator, skipping");
                    }
                }
            }
        }
        self.has_overrides = true;
        Ok(())
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Writes the collected conflicts to
    /// `<protocol>_ConflictingCaptions.txt` in `dir`, one line per path with
    /// the competing captions tab-separated behind it.
    pub fn write_conflicts(&self, dir: &Path) -> io::Result<()> {
        if self.conflicts.is_empty() {
            info!("no conflicting captions were found");
            return Ok(());
        }
        let path = dir.join(format!("{}_ConflictingCaptions.txt", self.protocol_name));
        info!(file = path.display().to_string();
            "found conflicting captions not solved by the override file");
        let mut output = String::new();
        for (concept, captions) in &self.conflicts {
            output.push_str(concept);
            for caption in captions {
                output.push('\t');
                output.push_str(caption);
            }
            output.push('\n');
        }
        fs::write(path, output)
    }
}

impl CaptionResolver for CaptionOverwriter {
    fn overridden_caption(&self, path: &str) -> Option<&str> {
        if !self.has_overrides {
            return None;
        }
        self.overrides.get(path).map(String::as_str)
    }

    fn record_conflict(&mut self, path: &str, caption: &str) {
        let caption = if caption.is_empty() { NO_CAPTION } else { caption };
        let captions = self.conflicts.entry(path.to_string()).or_default();
        if !captions.iter().any(|seen| seen == caption) {
            captions.push(caption.to_string());
        }
    }
}

/// Override files come from spreadsheet exports with inconsistent encodings;
/// anything that is not UTF-8 is read as Latin-1.
fn decode(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_file(content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("overrides.txt");
        fs::write(&path, content).expect("write");
        (dir, path)
    }

    #[test]
    fn header_must_name_the_protocol() {
        let (_dir, path) = write_file(b"#otherprotocol\nc1\tCaption\n");
        let mut overwriter = CaptionOverwriter::new("myprotocol");
        assert!(matches!(
            overwriter.read_file(&path),
            Err(CodebookError::OverwriteHeader { expected, .. }) if expected == "#myprotocol"
        ));
    }

    #[test]
    fn first_duplicate_wins_and_untabbed_lines_are_skipped() {
        let (_dir, path) =
            write_file(b"#p\nc1\tFirst\nno separator here\nc1\tSecond\nc2\tOther\n");
        let mut overwriter = CaptionOverwriter::new("p");
        overwriter.read_file(&path).expect("read");
        assert_eq!(overwriter.overridden_caption("c1"), Some("First"));
        assert_eq!(overwriter.overridden_caption("c2"), Some("Other"));
        assert_eq!(overwriter.overridden_caption("no separator here"), None);
    }

    #[test]
    fn latin1_files_are_decoded() {
        // "Grootte in µm" with a Latin-1 micro sign.
        let (_dir, path) = write_file(b"#p\nc1\tGrootte in \xb5m\n");
        let mut overwriter = CaptionOverwriter::new("p");
        overwriter.read_file(&path).expect("read");
        assert_eq!(overwriter.overridden_caption("c1"), Some("Grootte in \u{b5}m"));
    }

    #[test]
    fn overrides_are_inactive_without_a_file() {
        let overwriter = CaptionOverwriter::new("p");
        assert_eq!(overwriter.overridden_caption("c1"), None);
    }

    #[test]
    fn conflicts_deduplicate_and_mark_empty_captions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut overwriter = CaptionOverwriter::new("p");
        overwriter.record_conflict("c1", "One");
        overwriter.record_conflict("c1", "One");
        overwriter.record_conflict("c1", "");
        overwriter.record_conflict("c0", "Zero");
        overwriter.write_conflicts(dir.path()).expect("write");
        let report =
            fs::read_to_string(dir.path().join("p_ConflictingCaptions.txt")).expect("read");
        assert_eq!(report, "c0\tZero\nc1\tOne\t<NO CAPTION>\n");
    }

    #[test]
    fn no_report_is_written_without_conflicts() {
        let dir = tempfile::tempdir().expect("tempdir");
        let overwriter = CaptionOverwriter::new("p");
        overwriter.write_conflicts(dir.path()).expect("write");
        assert!(!dir.path().join("p_ConflictingCaptions.txt").exists());
    }
}
