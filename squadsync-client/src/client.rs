//! Squad members API client.
//!
//! Endpoints, all authenticated with the [`API_KEY_HEADER`] header:
//!
//! ```text
//! GET    {base}/squads/{squad}/members          -> raw member payload
//! POST   {base}/squads/{squad}/members          <- {uuid, username, name, email, icq, remark}
//! DELETE {base}/squads/{squad}/members/{uuid}
//! ```

use squadsync_core::{MemberId, MemberRecord, Settings};
use url::Url;

use crate::error::ClientError;

/// Header carrying the squad API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Operations the reconciliation driver needs from the remote side.
pub trait MemberService {
    /// Fetch the raw member payload. Anything but HTTP 200 is an error.
    fn list_members(&self) -> Result<String, ClientError>;

    /// Create one member and return the response status, whatever it is.
    fn create_member(&self, record: &MemberRecord) -> Result<u16, ClientError>;

    /// Delete one member by id and return the response status, whatever it is.
    fn delete_member(&self, id: &MemberId) -> Result<u16, ClientError>;
}

/// Squad members API client (blocking).
#[derive(Clone)]
pub struct SquadClient {
    agent: ureq::Agent,
    members_url: Url,
    api_key: String,
}

impl SquadClient {
    /// Client for `{base_url}/squads/{squad_id}/members`. The squad id is
    /// percent-encoded as a single path segment.
    pub fn new(
        base_url: &str,
        squad_id: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };
        let mut members_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        members_url
            .path_segments_mut()
            .map_err(|()| invalid("cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(["squads", squad_id, "members"]);
        tracing::debug!(url = %members_url, "members endpoint");

        let agent = ureq::AgentBuilder::new()
            .user_agent(&format!("squadsync/{}", env!("CARGO_PKG_VERSION")))
            .build();

        Ok(Self {
            agent,
            members_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(&settings.base_url, &settings.squad_id, settings.api_key.clone())
    }

    pub fn members_url(&self) -> &str {
        self.members_url.as_str()
    }

    fn member_url(&self, id: &MemberId) -> String {
        let mut url = self.members_url.clone();
        // `new` rejected cannot-be-a-base URLs, so segments are always editable.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(id.as_str());
        }
        url.into()
    }

    /// Collapse a mutation result to its status code; only transport
    /// failures are errors.
    fn mutation_status(
        method: &'static str,
        url: String,
        result: Result<ureq::Response, ureq::Error>,
    ) -> Result<u16, ClientError> {
        match result {
            Ok(resp) => Ok(resp.status()),
            Err(ureq::Error::Status(status, _)) => Ok(status),
            Err(ureq::Error::Transport(source)) => Err(ClientError::Transport {
                method,
                url,
                source: Box::new(source),
            }),
        }
    }
}

impl MemberService for SquadClient {
    fn list_members(&self) -> Result<String, ClientError> {
        let url = self.members_url.to_string();
        let result = self
            .agent
            .get(&url)
            .set(API_KEY_HEADER, &self.api_key)
            .call();

        let resp = match result {
            Ok(resp) => resp,
            Err(ureq::Error::Status(status, resp)) => {
                tracing::info!(status, "member list response");
                return Err(ClientError::Status {
                    method: "GET",
                    url,
                    status,
                    body: resp.into_string().unwrap_or_default(),
                });
            }
            Err(ureq::Error::Transport(source)) => {
                return Err(ClientError::Transport {
                    method: "GET",
                    url,
                    source: Box::new(source),
                });
            }
        };

        let status = resp.status();
        tracing::info!(status, "member list response");
        // Redirects are followed, so a non-200 here is a 1xx/2xx/3xx oddity.
        if status != 200 {
            return Err(ClientError::Status {
                method: "GET",
                url,
                status,
                body: resp.into_string().unwrap_or_default(),
            });
        }

        resp.into_string()
            .map_err(|source| ClientError::Body { url, source })
    }

    fn create_member(&self, record: &MemberRecord) -> Result<u16, ClientError> {
        let url = self.members_url.to_string();
        tracing::debug!(url = %url, payload = ?record, "posting member");
        let result = self
            .agent
            .post(&url)
            .set(API_KEY_HEADER, &self.api_key)
            .send_json(record);
        Self::mutation_status("POST", url, result)
    }

    fn delete_member(&self, id: &MemberId) -> Result<u16, ClientError> {
        let url = self.member_url(id);
        tracing::debug!(url = %url, "deleting member");
        let result = self
            .agent
            .delete(&url)
            .set(API_KEY_HEADER, &self.api_key)
            .call();
        Self::mutation_status("DELETE", url, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_url_trims_trailing_slash() {
        let client = SquadClient::new("https://example.test/api/v1/", "42", "key").unwrap();
        assert_eq!(
            client.members_url(),
            "https://example.test/api/v1/squads/42/members"
        );
    }

    #[test]
    fn member_url_appends_id() {
        let client = SquadClient::new("https://example.test/api/v1", "42", "key").unwrap();
        assert_eq!(
            client.member_url(&MemberId::from("765611")),
            "https://example.test/api/v1/squads/42/members/765611"
        );
    }

    #[test]
    fn ids_are_encoded_as_one_path_segment() {
        let client = SquadClient::new("https://example.test/api/v1", "4 2", "key").unwrap();
        assert_eq!(client.members_url(), "https://example.test/api/v1/squads/4%202/members");
        assert_eq!(
            client.member_url(&MemberId::from("a?b/c#d")),
            "https://example.test/api/v1/squads/4%202/members/a%3Fb%2Fc%23d"
        );
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        let err = SquadClient::new("not a url", "42", "key").err().expect("invalid url");
        assert!(matches!(err, ClientError::InvalidUrl { .. }), "got: {err}");
        let err = SquadClient::new("mailto:squad@example.test", "42", "key")
            .err()
            .expect("cannot-be-a-base url");
        assert!(err.to_string().contains("cannot be a base"));
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        // Port 9 (discard) on localhost is closed in test environments.
        let client = SquadClient::new("http://127.0.0.1:9", "42", "key").unwrap();
        let err = client.list_members().unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }), "got: {err}");
        assert!(err.status().is_none());
    }
}
