mod common;

use admin_console::model::{Operation, Product, ResourceKind, User, UserDraft, UserId};
use admin_console::remote::{FailureCause, HttpResourceClient, RequestFailed};
use common::FakeApi;
use serde_json::json;
use std::time::Duration;
use store_framework::RemoteCollection;

fn users_client(api: &FakeApi) -> HttpResourceClient<User> {
    HttpResourceClient::new(reqwest::Client::new(), api.base_url())
}

#[tokio::test]
async fn test_full_crud_round_against_server() {
    let api = FakeApi::start(vec![
        json!({"id": 1, "name": "Alice", "email": "alice@example.com"}),
        json!({"id": 2, "name": "Bob"}),
    ])
    .await;
    let client = users_client(&api);

    // 1. List
    let users = client.list().await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "alice@example.com");
    assert_eq!(users[1].email, ""); // defaulted

    // 2. Create: the server assigns the id
    let carol = client
        .create(UserDraft::new("Carol", "carol@example.com"))
        .await
        .unwrap();
    assert_eq!(carol.id, UserId(3));
    assert_eq!(carol.name, "Carol");

    // 3. Update
    let mut draft = UserDraft::new("Carol", "carol@example.org");
    draft.phone = "555-0100".into();
    let updated = client.update(carol.id, draft).await.unwrap();
    assert_eq!(updated.email, "carol@example.org");
    assert_eq!(updated.phone, "555-0100");

    // 4. Delete
    client.delete(UserId(1)).await.unwrap();

    assert_eq!(
        api.requests().await,
        vec!["GET /users", "POST /users", "PUT /users/3", "DELETE /users/1"]
    );
    assert_eq!(api.users().await.len(), 2);
}

#[tokio::test]
async fn test_error_status_becomes_request_failed() {
    let api = FakeApi::start(vec![]).await;
    api.fail_with(500).await;

    let err = users_client(&api).list().await.unwrap_err();

    assert_eq!(err.kind, ResourceKind::Users);
    assert_eq!(err.operation, Operation::List);
    assert!(matches!(err.cause, FailureCause::Status(500)));
}

#[tokio::test]
async fn test_update_of_unknown_record_reports_status() {
    let api = FakeApi::start(vec![json!({"id": 1, "name": "Alice"})]).await;

    let err: RequestFailed = users_client(&api)
        .update(UserId(42), UserDraft::new("Nobody", ""))
        .await
        .unwrap_err();

    assert_eq!(err.operation, Operation::Update);
    assert!(matches!(err.cause, FailureCause::Status(404)));
}

#[tokio::test]
async fn test_malformed_body_is_a_decode_failure() {
    let api = FakeApi::start(vec![]).await;
    let client: HttpResourceClient<Product> =
        HttpResourceClient::new(reqwest::Client::new(), api.base_url());

    let err = client.list().await.unwrap_err();

    assert_eq!(err.kind, ResourceKind::Products);
    assert!(matches!(err.cause, FailureCause::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_a_transport_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
        .unwrap();
    let client: HttpResourceClient<User> = HttpResourceClient::new(http, format!("http://{}", addr));

    let err = client.delete(UserId(1)).await.unwrap_err();

    assert_eq!(err.operation, Operation::Delete);
    assert!(matches!(err.cause, FailureCause::Transport(_)));
}
