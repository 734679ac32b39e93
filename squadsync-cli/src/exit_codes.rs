//! Process exit codes.
//!
//! | code | meaning |
//! |------|---------|
//! | 0 | pass completed (rejected mutations included) |
//! | 1 | configuration or usage error, or any other failure |
//! | 2 | local roster has no non-blank lines |
//! | 3 | local roster unreadable or malformed |
//! | 4 | local roster has no members |
//! | 5 | remote roster fetch failed or payload malformed |

use squadsync_core::{ConfigError, RosterError};
use squadsync_sync::SyncError;

pub const EXIT_SUCCESS: u8 = 0;

/// Missing or invalid settings, or bad command-line usage. Also the fallback
/// for unclassified errors.
pub const EXIT_CONFIG: u8 = 1;

pub const EXIT_ROSTER_BLANK: u8 = 2;

pub const EXIT_ROSTER_UNREADABLE: u8 = 3;

pub const EXIT_ROSTER_NO_MEMBERS: u8 = 4;

pub const EXIT_REMOTE_FETCH: u8 = 5;

/// Map an error chain to its exit code. The first recognised cause wins.
pub fn classify(err: &anyhow::Error) -> u8 {
    for cause in err.chain() {
        if let Some(sync) = cause.downcast_ref::<SyncError>() {
            return match sync {
                SyncError::Fetch(_) | SyncError::Payload(_) => EXIT_REMOTE_FETCH,
                SyncError::EmptyRoster { .. } => EXIT_ROSTER_NO_MEMBERS,
                SyncError::Roster(roster) => roster_code(roster),
            };
        }
        if let Some(roster) = cause.downcast_ref::<RosterError>() {
            return roster_code(roster);
        }
        if cause.downcast_ref::<ConfigError>().is_some() {
            return EXIT_CONFIG;
        }
    }
    EXIT_CONFIG
}

fn roster_code(err: &RosterError) -> u8 {
    match err {
        RosterError::SourceEmpty => EXIT_ROSTER_BLANK,
        RosterError::SourceUnavailable { .. } | RosterError::MalformedLine { .. } => {
            EXIT_ROSTER_UNREADABLE
        }
        RosterError::TruncatedPayload { .. } => EXIT_REMOTE_FETCH,
    }
}
