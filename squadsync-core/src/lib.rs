//! squadsync core library — member records, roster parsers, configuration.
//!
//! - [`types`] — [`MemberRecord`] and its composite identity
//! - [`quoted`] — the quoted-value scanner shared by both parsers
//! - [`roster`] — local roster file parser
//! - [`payload`] — remote member payload parser
//! - [`config`] — config file loading and settings resolution
//! - [`error`] — [`RosterError`], [`ConfigError`]

pub mod config;
pub mod error;
pub mod payload;
pub mod quoted;
pub mod roster;
pub mod types;

pub use config::{ConfigFile, Overrides, Settings};
pub use error::{ConfigError, RosterError};
pub use types::{CompositeKey, MemberId, MemberRecord};
