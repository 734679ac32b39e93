//! Local roster file parser.
//!
//! # Format
//!
//! ```text
//! ranks[] = {
//!     "Alice", "76561198000000001", "Private",
//!     "Bob", "76561198000000002", "Sergeant"
//! };
//! ```
//!
//! Blank lines are dropped. Scanning stops at the first line starting with
//! [`SECTION_END`], wherever it appears. Lines after a [`SECTION_START`] line
//! are records: the first three quoted values are `(name, id, rank)`, any
//! further quoted values are ignored. Markers match at column 0 only.
//!
//! # API pattern
//!
//! - [`parse_roster`] — pure, works on text
//! - [`load_roster_at`] — reads the file, then parses

use std::path::Path;

use crate::error::RosterError;
use crate::quoted::quoted_values;
use crate::types::MemberRecord;

/// Line prefix opening the roster section.
pub const SECTION_START: &str = "ranks[] = {";

/// Line prefix closing the roster section and ending the scan.
pub const SECTION_END: &str = "};";

/// Parse the member records out of roster text.
///
/// Returns [`RosterError::SourceEmpty`] when the text has no non-blank lines
/// and [`RosterError::MalformedLine`] for a section line with fewer than
/// three quoted values. A text without a roster section parses to an empty
/// list; deciding whether that is acceptable is up to the caller.
pub fn parse_roster(text: &str) -> Result<Vec<MemberRecord>, RosterError> {
    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
        .collect();
    if lines.is_empty() {
        return Err(RosterError::SourceEmpty);
    }

    let mut in_section = false;
    let mut members = Vec::new();
    for (line_no, line) in lines {
        if line.starts_with(SECTION_END) {
            tracing::info!(line = line_no, "end of roster section");
            break;
        }

        if in_section {
            let record = parse_line(line_no, line)?;
            tracing::debug!(line = line_no, member = %record, "parsed roster line");
            members.push(record);
        }

        if line.starts_with(SECTION_START) {
            tracing::info!(line = line_no, "roster section found");
            in_section = true;
        }
    }

    Ok(members)
}

/// Read `path` and parse it with [`parse_roster`].
pub fn load_roster_at(path: &Path) -> Result<Vec<MemberRecord>, RosterError> {
    tracing::info!(path = %path.display(), "reading local roster");
    let text = std::fs::read_to_string(path).map_err(|source| RosterError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_roster(&text)
}

fn parse_line(line_no: usize, line: &str) -> Result<MemberRecord, RosterError> {
    match quoted_values(line).as_slice() {
        [name, id, rank, ..] => Ok(MemberRecord::local(*name, *id, *rank)),
        values => Err(RosterError::MalformedLine {
            line: line_no,
            found: values.len(),
            content: line.trim().to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_member_section() {
        let members = parse_roster("ranks[] = {\n\"Alice\",\"id1\",\"Private\"\n};").expect("parse");
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id.as_str(), "id1");
        assert_eq!(members[0].display_name, "Alice");
        assert_eq!(members[0].rank, "Private");
        assert!(members[0].full_name.is_empty());
        assert!(members[0].email.is_empty());
        assert!(members[0].contact_id.is_empty());
    }

    #[test]
    fn extra_quoted_values_are_ignored() {
        let text = "ranks[] = {\n\"Alice\",\"id1\",\"Private\",\"extra\",\"more\"\n};";
        let members = parse_roster(text).expect("parse");
        assert_eq!(members[0].rank, "Private");
    }

    #[test]
    fn content_after_end_marker_is_not_scanned() {
        let text = "ranks[] = {\n\"A\",\"1\",\"R\"\n};\nranks[] = {\n\"B\",\"2\",\"R\"\n};\n";
        let members = parse_roster(text).expect("parse");
        assert_eq!(members.len(), 1);
    }

    #[test]
    fn blank_only_text_is_source_empty() {
        let err = parse_roster("\n   \n\t\n").unwrap_err();
        assert!(matches!(err, RosterError::SourceEmpty));
    }

    #[test]
    fn missing_section_parses_to_empty_list() {
        let members = parse_roster("class Foo {\n\"a\",\"b\",\"c\"\n").expect("parse");
        assert!(members.is_empty());
    }

    #[test]
    fn short_line_reports_line_number() {
        let text = "ranks[] = {\n\n\"Alice\",\"id1\"\n};";
        let err = parse_roster(text).unwrap_err();
        match err {
            RosterError::MalformedLine { line, found, .. } => {
                assert_eq!(line, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
