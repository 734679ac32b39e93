//! Wire behaviour of `SquadClient` against a mock squad service.

use httpmock::prelude::*;
use serde_json::json;
use squadsync_client::{ClientError, MemberService, SquadClient, API_KEY_HEADER};
use squadsync_core::{MemberId, MemberRecord};

const KEY: &str = "test-key";

fn client_for(server: &MockServer) -> SquadClient {
    SquadClient::new(&server.base_url(), "42", KEY).expect("client")
}

#[test]
fn list_members_sends_key_and_returns_body() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/squads/42/members")
            .header(API_KEY_HEADER, KEY);
        then.status(200).body(r#"{"a":"b","c":[]}"#);
    });

    let body = client_for(&server).list_members().expect("list");
    mock.assert();
    assert_eq!(body, r#"{"a":"b","c":[]}"#);
}

#[test]
fn list_members_non_success_is_status_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/squads/42/members");
        then.status(403).body("forbidden");
    });

    let err = client_for(&server).list_members().unwrap_err();
    match &err {
        ClientError::Status { status, body, .. } => {
            assert_eq!(*status, 403);
            assert_eq!(body, "forbidden");
        }
        other => panic!("expected status error, got: {other}"),
    }
    assert!(err.to_string().contains("HTTP 403"));
}

#[test]
fn list_members_rejects_non_200_success() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/squads/42/members");
        then.status(204);
    });

    let err = client_for(&server).list_members().unwrap_err();
    assert_eq!(err.status(), Some(204));
}

#[test]
fn create_member_posts_wire_fields() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/squads/42/members")
            .header(API_KEY_HEADER, KEY)
            .json_body(json!({
                "uuid": "id1",
                "username": "Alice",
                "name": "",
                "email": "",
                "icq": "",
                "remark": "Private"
            }));
        then.status(201);
    });

    let status = client_for(&server)
        .create_member(&MemberRecord::local("Alice", "id1", "Private"))
        .expect("create");
    mock.assert();
    assert_eq!(status, 201);
}

#[test]
fn create_member_rejection_is_a_status_not_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/squads/42/members");
        then.status(422).body("duplicate");
    });

    let status = client_for(&server)
        .create_member(&MemberRecord::local("Alice", "id1", "Private"))
        .expect("create");
    assert_eq!(status, 422);
}

#[test]
fn delete_member_targets_member_path() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/squads/42/members/id1")
            .header(API_KEY_HEADER, KEY);
        then.status(200);
    });

    let status = client_for(&server)
        .delete_member(&MemberId::from("id1"))
        .expect("delete");
    mock.assert_calls(1);
    assert_eq!(status, 200);
}

#[test]
fn delete_member_not_found_is_reported_as_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/squads/42/members/gone");
        then.status(404);
    });

    let status = client_for(&server)
        .delete_member(&MemberId::from("gone"))
        .expect("delete");
    assert_eq!(status, 404);
}

#[test]
fn delete_member_escapes_id_in_path() {
    let server = MockServer::start();
    let truncated = server.mock(|when, then| {
        when.method(DELETE).path("/squads/42/members/a");
        then.status(200);
    });
    let any_delete = server.mock(|when, then| {
        when.method(DELETE);
        then.status(200);
    });

    let status = client_for(&server)
        .delete_member(&MemberId::from("a?b"))
        .expect("delete");
    assert_eq!(status, 200);
    truncated.assert_calls(0);
    any_delete.assert_calls(1);
}
