use axum::http::{StatusCode, header};
use axum_test::TestServer;
use serde_json::{Value, json};

use gymdash_auth_types::identity::SessionSecret;
use gymdash_domain::role::RoleType;
use gymdash_roles::domain::types::RoleAssignment;
use gymdash_roles::router::build_router;
use gymdash_roles::state::AppState;
use gymdash_testing::auth::{MockSession, TEST_SESSION_SECRET};

use crate::helpers::{InMemoryProfileRepo, InMemoryRoleRepo, role_row};

fn server(rows: Vec<RoleAssignment>) -> (TestServer, InMemoryRoleRepo, InMemoryProfileRepo) {
    server_with_profiles(rows, &[])
}

fn server_with_profiles(
    rows: Vec<RoleAssignment>,
    profiles: &[(&str, &str)],
) -> (TestServer, InMemoryRoleRepo, InMemoryProfileRepo) {
    let roles = InMemoryRoleRepo::new(rows);
    let profiles = InMemoryProfileRepo::new(profiles);
    let state = AppState {
        roles: roles.clone(),
        profiles: profiles.clone(),
    };
    let router = build_router(state, SessionSecret::new(TEST_SESSION_SECRET));
    (TestServer::new(router).unwrap(), roles, profiles)
}

fn admin_rows() -> Vec<RoleAssignment> {
    vec![role_row("usr_admin", Some("admin@gym.com"), RoleType::Admin)]
}

fn admin() -> MockSession {
    MockSession::new("usr_admin").with_email("admin@gym.com")
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_healthy_and_ready() {
    let (server, _, _) = server(vec![]);
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_echo_request_id() {
    let (server, _, _) = server(vec![]);
    let response = server.get("/healthz").await;
    assert!(response.headers().contains_key("x-request-id"));
}

// ── Session ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_missing_session() {
    let (server, _, _) = server(vec![]);
    let response = server.get("/roles/@me").await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_reject_expired_session() {
    let (server, _, _) = server(admin_rows());
    let response = server
        .get("/roles/@me")
        .add_header(header::AUTHORIZATION, admin().with_ttl(-120).bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_accept_session_cookie() {
    let (server, _, _) = server(admin_rows());
    let response = server
        .get("/roles/@me")
        .add_header(header::COOKIE, admin().cookie())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["role"], "admin");
}

// ── GET /roles/@me, /roles/@me/access ────────────────────────────────────────

#[tokio::test]
async fn should_resolve_relinked_identity_over_http() {
    let (server, roles, _) = server(vec![role_row("usr_OLD", Some("a@x.com"), RoleType::Admin)]);
    let session = MockSession::new("usr_123").with_email("A@x.com");

    let response = server
        .get("/roles/@me")
        .add_header(header::AUTHORIZATION, session.bearer())
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "role": "admin" }));
    assert_eq!(roles.snapshot()[0].user_id, "usr_123");
}

#[tokio::test]
async fn should_report_access_for_elevated_member() {
    let (server, _, _) = server(vec![role_row("usr_1", None, RoleType::Socio)]);
    let response = server
        .get("/roles/@me/access")
        .add_header(header::AUTHORIZATION, MockSession::new("usr_1").bearer())
        .await;
    response.assert_json(&json!({ "has_access": true }));
}

#[tokio::test]
async fn should_report_no_access_and_user_role_for_plain_member() {
    let (server, _, _) = server(admin_rows());
    let session = MockSession::new("usr_plain").with_email("plain@gym.com");

    server
        .get("/roles/@me/access")
        .add_header(header::AUTHORIZATION, session.bearer())
        .await
        .assert_json(&json!({ "has_access": false }));
    server
        .get("/roles/@me")
        .add_header(header::AUTHORIZATION, session.bearer())
        .await
        .assert_json(&json!({ "role": "user" }));
}

// ── POST /migrations/legacy-data ─────────────────────────────────────────────

#[tokio::test]
async fn should_migrate_legacy_profile_once() {
    let (server, _, profiles) = server_with_profiles(vec![], &[("usr_OLD", "a@x.com")]);
    let session = MockSession::new("usr_123").with_email("a@x.com");

    server
        .post("/migrations/legacy-data")
        .add_header(header::AUTHORIZATION, session.bearer())
        .await
        .assert_json(&json!({ "migrated": true, "rows": 1 }));
    server
        .post("/migrations/legacy-data")
        .add_header(header::AUTHORIZATION, session.bearer())
        .await
        .assert_json(&json!({ "migrated": false, "rows": 0 }));
    assert_eq!(profiles.user_ids(), ["usr_123"]);
}

#[tokio::test]
async fn should_require_email_for_legacy_migration() {
    let (server, _, _) = server(vec![]);
    let response = server
        .post("/migrations/legacy-data")
        .add_header(header::AUTHORIZATION, MockSession::new("usr_123").bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

// ── Administration ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_assign_role_as_admin() {
    let (server, roles, _) = server(admin_rows());

    let response = server
        .post("/roles")
        .add_header(header::AUTHORIZATION, admin().bearer())
        .json(&json!({
            "user_id": "usr_owner",
            "email": "Owner@Gym.com",
            "role_type": "empresario",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user_id"], "usr_owner");
    assert_eq!(body["email"], "owner@gym.com");
    assert_eq!(body["role_type"], "empresario");
    assert_eq!(body["is_active"], true);
    assert_eq!(roles.snapshot().len(), 2);
}

#[tokio::test]
async fn should_reject_unknown_role_type() {
    let (server, _, _) = server(admin_rows());
    let response = server
        .post("/roles")
        .add_header(header::AUTHORIZATION, admin().bearer())
        .json(&json!({ "user_id": "usr_owner", "role_type": "superuser" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_ROLE_TYPE");
}

#[tokio::test]
async fn should_forbid_assignment_by_non_admin() {
    let (server, roles, _) = server(vec![role_row("usr_owner", None, RoleType::Empresario)]);
    let response = server
        .post("/roles")
        .add_header(header::AUTHORIZATION, MockSession::new("usr_owner").bearer())
        .json(&json!({ "user_id": "usr_owner", "role_type": "admin" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(roles.snapshot().len(), 1);
}

#[tokio::test]
async fn should_forbid_non_admin_before_validating_body() {
    let (server, roles, _) = server(vec![role_row("usr_owner", None, RoleType::Empresario)]);
    let response = server
        .post("/roles")
        .add_header(header::AUTHORIZATION, MockSession::new("usr_owner").bearer())
        .json(&json!({ "role_type": "superuser" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
    assert_eq!(roles.snapshot().len(), 1);
}

#[tokio::test]
async fn should_report_missing_fields_to_admin() {
    let (server, _, _) = server(admin_rows());
    let response = server
        .post("/roles")
        .add_header(header::AUTHORIZATION, admin().bearer())
        .json(&json!({ "role_type": "socio" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_list_roles_with_pagination() {
    let (server, _, _) = server(vec![
        role_row("usr_admin", Some("admin@gym.com"), RoleType::Admin),
        role_row("usr_2", None, RoleType::Socio),
        role_row("usr_3", None, RoleType::Socio),
    ]);

    let response = server
        .get("/roles?per-page=2&page=1")
        .add_header(header::AUTHORIZATION, admin().bearer())
        .await;

    response.assert_status_ok();
    let body: Vec<Value> = response.json();
    assert_eq!(body.len(), 2);
}

#[tokio::test]
async fn should_reject_malformed_page_query() {
    let (server, _, _) = server(admin_rows());
    let response = server
        .get("/roles?page=abc")
        .add_header(header::AUTHORIZATION, admin().bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_QUERY");
}

#[tokio::test]
async fn should_forbid_non_admin_before_validating_query() {
    let (server, _, _) = server(vec![role_row("usr_2", None, RoleType::Socio)]);
    let response = server
        .get("/roles?page=abc")
        .add_header(header::AUTHORIZATION, MockSession::new("usr_2").bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["kind"], "FORBIDDEN");
}

#[tokio::test]
async fn should_deactivate_role_as_admin() {
    let target = role_row("usr_2", None, RoleType::Socio);
    let id = target.id;
    let mut rows = admin_rows();
    rows.push(target);
    let (server, roles, _) = server(rows);

    let response = server
        .delete(&format!("/roles/{id}"))
        .add_header(header::AUTHORIZATION, admin().bearer())
        .await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert!(!roles.snapshot()[1].is_active);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_role_id() {
    let (server, _, _) = server(admin_rows());
    let response = server
        .delete(&format!("/roles/{}", uuid::Uuid::now_v7()))
        .add_header(header::AUTHORIZATION, admin().bearer())
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "ROLE_NOT_FOUND");
}
