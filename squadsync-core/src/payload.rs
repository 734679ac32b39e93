//! Remote member payload parser.
//!
//! The members endpoint is read as a flat list of quoted values rather than
//! decoded as a document. The first [`METADATA_SLOTS`] values describe the
//! squad, then every member occupies [`RECORD_STRIDE`] consecutive values in
//! which each field value sits at an even offset (see [`offset`]), followed
//! by a companion value that is skipped.
//!
//! These constants are tied to the service's response layout. If the layout
//! changes, change the constants.

use crate::error::RosterError;
use crate::quoted::quoted_values;
use crate::types::{MemberId, MemberRecord};

/// Leading values that carry no member data.
pub const METADATA_SLOTS: usize = 3;

/// Values consumed by one member record.
pub const RECORD_STRIDE: usize = 12;

/// Position of each field relative to the start of a record.
pub mod offset {
    pub const ID: usize = 0;
    pub const DISPLAY_NAME: usize = 2;
    pub const FULL_NAME: usize = 4;
    pub const EMAIL: usize = 6;
    pub const CONTACT_ID: usize = 8;
    pub const RANK: usize = 10;
}

/// Parse a raw members payload into records, in payload order.
pub fn parse_members(payload: &str) -> Result<Vec<MemberRecord>, RosterError> {
    let values = quoted_values(payload);
    let needed = offset::RANK + 1;

    let mut members = Vec::new();
    let mut index = METADATA_SLOTS;
    while index < values.len() {
        let available = values.len() - index;
        if available < needed {
            return Err(RosterError::TruncatedPayload {
                index,
                needed,
                available,
            });
        }

        let slot = |field: usize| values[index + field].to_owned();
        let record = MemberRecord {
            id: MemberId(slot(offset::ID)),
            display_name: slot(offset::DISPLAY_NAME),
            full_name: slot(offset::FULL_NAME),
            email: slot(offset::EMAIL),
            contact_id: slot(offset::CONTACT_ID),
            rank: slot(offset::RANK),
        };
        tracing::debug!(index, member = %record, "parsed remote member");
        members.push(record);

        index += RECORD_STRIDE;
    }

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote_all(values: &[&str]) -> String {
        values
            .iter()
            .map(|v| format!("\"{v}\""))
            .collect::<Vec<_>>()
            .join(",")
    }

    #[test]
    fn single_record_after_metadata() {
        let payload = quote_all(&[
            "meta1", "meta2", "meta3", "id1", "x", "Alice", "x", "full", "x", "mail", "x", "icq",
            "x", "Private", "x",
        ]);
        let members = parse_members(&payload).expect("parse");
        assert_eq!(members.len(), 1);
        let m = &members[0];
        assert_eq!(m.id.as_str(), "id1");
        assert_eq!(m.display_name, "Alice");
        assert_eq!(m.full_name, "full");
        assert_eq!(m.email, "mail");
        assert_eq!(m.contact_id, "icq");
        assert_eq!(m.rank, "Private");
    }

    #[test]
    fn metadata_only_is_empty_roster() {
        assert!(parse_members(&quote_all(&["a", "b", "c"])).expect("parse").is_empty());
        assert!(parse_members("").expect("parse").is_empty());
    }

    #[test]
    fn final_companion_slot_is_optional() {
        // A record needs values up to the rank; the trailing companion may be absent.
        let payload = quote_all(&[
            "m", "m", "m", "id1", "x", "Alice", "x", "", "x", "", "x", "", "x", "Private",
        ]);
        assert_eq!(parse_members(&payload).expect("parse").len(), 1);
    }

    #[test]
    fn partial_record_is_truncated_payload() {
        let payload = quote_all(&["m", "m", "m", "id1", "x", "Alice"]);
        match parse_members(&payload).unwrap_err() {
            RosterError::TruncatedPayload {
                index,
                needed,
                available,
            } => {
                assert_eq!(index, 3);
                assert_eq!(needed, 11);
                assert_eq!(available, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
