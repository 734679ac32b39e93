//! # squadsync-client
//!
//! Blocking HTTPS client for the squad members API.
//!
//! [`SquadClient`] talks to the service; [`MemberService`] is the surface the
//! reconciliation driver depends on. No retries, no pagination.

mod client;
mod error;

pub use client::{MemberService, SquadClient, API_KEY_HEADER};
pub use error::ClientError;
