//! Integration tests for the typed resource groups: paths, query
//! parameters, request bodies and response decoding.

#![allow(clippy::expect_used)]

use carddesk_client::{CardStatus, NewCard, NewUser};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

mod common;
use common::{anonymous_client, logged_in_client};

fn user_json(id: i64, email: &str) -> Value {
    json!({
        "id": id,
        "name": "Ada Lovelace",
        "email": email,
        "permissions": ["cards:review"],
        "created_at": "2026-08-01T09:00:00Z"
    })
}

fn card_json(id: i64, status: &str) -> Value {
    json!({
        "id": id,
        "title": "Team offsite supplies",
        "description": "Q3 budget",
        "status": status,
        "created_at": "2026-08-01T09:00:00Z",
        "updated_at": "2026-08-02T10:30:00Z"
    })
}

/// Matches only requests whose query string has no `status` key.
struct NoStatusParam;

impl Match for NoStatusParam {
    fn matches(&self, request: &Request) -> bool {
        !request.url.query_pairs().any(|(key, _)| key == "status")
    }
}

#[tokio::test]
async fn lists_users_typed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            user_json(1, "ada@example.com"),
            user_json(2, "grace@example.com")
        ])))
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let users = client.users().list().await.expect("list should succeed");
    assert_eq!(users.len(), 2);
    assert_eq!(users[1].email, "grace@example.com");
    assert_eq!(users[0].permissions, vec!["cards:review"]);
}

#[tokio::test]
async fn gets_user_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(user_json(7, "ada@example.com")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let user = client.users().get(7).await.expect("get should succeed");
    assert_eq!(user.id, 7);
}

#[tokio::test]
async fn update_permissions_puts_the_new_set() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/users/7/permissions"))
        .and(body_json(json!({"permissions": ["cards:review", "users:admin"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 7,
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "permissions": ["cards:review", "users:admin"],
            "created_at": "2026-08-01T09:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let user = client
        .users()
        .update_permissions(7, vec!["cards:review".into(), "users:admin".into()])
        .await
        .expect("update should succeed");
    assert_eq!(user.permissions, vec!["cards:review", "users:admin"]);
}

#[tokio::test]
async fn deletes_a_user() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    client.users().delete(7).await.expect("delete should succeed");
}

#[tokio::test]
async fn register_posts_the_new_account() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .and(body_json(json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "password": "hunter2"
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(user_json(2, "grace@example.com")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = anonymous_client(&server.uri());
    let user = client
        .auth()
        .register(&NewUser::new("Grace Hopper", "grace@example.com", "hunter2"))
        .await
        .expect("register should succeed");
    assert_eq!(user.email, "grace@example.com");
}

#[tokio::test]
async fn list_cards_with_filter_sends_status_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("status", "approved"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([card_json(41, "approved")])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let cards = client
        .cards()
        .list(Some(CardStatus::Approved))
        .await
        .expect("filtered list should succeed");
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].status, CardStatus::Approved);
}

#[tokio::test]
async fn list_cards_without_filter_omits_status_param() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(NoStatusParam)
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            card_json(41, "pending"),
            card_json(42, "rejected")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let cards = client
        .cards()
        .list(None)
        .await
        .expect("unfiltered list should succeed");
    assert_eq!(cards.len(), 2);
}

#[tokio::test]
async fn creates_a_card_with_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/cards"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "title": "Team offsite supplies",
            "description": "Q3 budget"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(card_json(41, "pending")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let card = client
        .cards()
        .create(&NewCard::new("Team offsite supplies").description("Q3 budget"))
        .await
        .expect("create should succeed");
    assert_eq!(card.id, 41);
    assert_eq!(card.status, CardStatus::Pending);
}

#[tokio::test]
async fn updates_card_status_with_notes() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/cards/41/status"))
        .and(body_json(json!({"status": "approved", "notes": "looks legit"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 41,
            "title": "Team offsite supplies",
            "status": "approved",
            "notes": "looks legit",
            "created_at": "2026-08-01T09:00:00Z",
            "updated_at": "2026-08-02T10:30:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let card = client
        .cards()
        .update_status(41, CardStatus::Approved, Some("looks legit"))
        .await
        .expect("status update should succeed");
    assert_eq!(card.status, CardStatus::Approved);
    assert_eq!(card.notes.as_deref(), Some("looks legit"));
}

#[tokio::test]
async fn updates_card_status_without_notes_omits_the_field() {
    let server = MockServer::start().await;
    // body_json matches exactly, so a stray "notes" key would not match.
    Mock::given(method("PUT"))
        .and(path("/cards/41/status"))
        .and(body_json(json!({"status": "rejected"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(card_json(41, "rejected")))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    let card = client
        .cards()
        .update_status(41, CardStatus::Rejected, None)
        .await
        .expect("status update should succeed");
    assert_eq!(card.status, CardStatus::Rejected);
}

#[tokio::test]
async fn deletes_a_card() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/cards/41"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (client, _store) = logged_in_client(&server.uri(), "tok-123");
    client.cards().delete(41).await.expect("delete should succeed");
}
