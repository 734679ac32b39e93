//! Member records and their identity.
//!
//! A [`MemberRecord`] compares equal to another iff their `(id, display_name,
//! rank)` triples match. `full_name`, `email` and `contact_id` only travel to
//! the remote service; the local roster never fills them in.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Opaque member identifier (the remote service's `uuid`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// MemberRecord
// ---------------------------------------------------------------------------

/// One squad member, from either source.
///
/// Serializes with the remote service's field names, which is also the body
/// of a create request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    #[serde(rename = "uuid")]
    pub id: MemberId,
    #[serde(rename = "username")]
    pub display_name: String,
    #[serde(rename = "name")]
    pub full_name: String,
    pub email: String,
    #[serde(rename = "icq")]
    pub contact_id: String,
    #[serde(rename = "remark")]
    pub rank: String,
}

/// Borrowed `(id, display_name, rank)` triple that decides membership identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompositeKey<'a> {
    pub id: &'a MemberId,
    pub display_name: &'a str,
    pub rank: &'a str,
}

impl MemberRecord {
    /// A record as the local roster describes it: name, id and rank only.
    pub fn local(
        display_name: impl Into<String>,
        id: impl Into<MemberId>,
        rank: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            full_name: String::new(),
            email: String::new(),
            contact_id: String::new(),
            rank: rank.into(),
        }
    }

    pub fn key(&self) -> CompositeKey<'_> {
        CompositeKey {
            id: &self.id,
            display_name: &self.display_name,
            rank: &self.rank,
        }
    }
}

impl PartialEq for MemberRecord {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for MemberRecord {}

impl Hash for MemberRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for MemberRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.display_name, self.id, self.rank)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn remote(id: &str, name: &str, rank: &str) -> MemberRecord {
        MemberRecord {
            id: MemberId::from(id),
            display_name: name.to_string(),
            full_name: "Full Name".to_string(),
            email: "someone@example.com".to_string(),
            contact_id: "123456".to_string(),
            rank: rank.to_string(),
        }
    }

    #[test]
    fn contact_metadata_does_not_affect_equality() {
        let local = MemberRecord::local("Alice", "id1", "Private");
        assert_eq!(local, remote("id1", "Alice", "Private"));
    }

    #[test]
    fn rank_change_breaks_equality() {
        let local = MemberRecord::local("Alice", "id1", "Private");
        assert_ne!(local, remote("id1", "Alice", "Sergeant"));
    }

    #[test]
    fn hash_follows_composite_key() {
        let mut set = HashSet::new();
        set.insert(MemberRecord::local("Alice", "id1", "Private"));
        assert!(set.contains(&remote("id1", "Alice", "Private")));
    }

    #[test]
    fn serializes_with_wire_names() {
        let yaml = serde_yaml::to_string(&MemberRecord::local("Alice", "id1", "Private"))
            .expect("serialize");
        assert!(yaml.contains("uuid: id1"));
        assert!(yaml.contains("username: Alice"));
        assert!(yaml.contains("remark: Private"));
        assert!(yaml.contains("icq:"));
    }

    #[test]
    fn display_shows_name_id_and_rank() {
        let rec = MemberRecord::local("Alice", "id1", "Private");
        assert_eq!(rec.to_string(), "Alice (id1) [Private]");
    }
}
