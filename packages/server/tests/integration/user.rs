use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn get_user_returns_id_and_username_only() {
    let app = TestApp::spawn().await;
    let id = app.register("alice").await;

    let res = app.client().get(&routes::user(id)).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!({"id": id, "username": "alice"}));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.client().get(&routes::user(999)).await;

    assert_eq!(res.status, 404);
    assert_eq!(res.body["code"], "NOT_FOUND");
    assert_eq!(res.body["error"], "User not found");
}

#[tokio::test]
async fn non_integer_id_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app.client().get("/users/abc").await;

    assert_eq!(res.status, 404);
}

#[tokio::test]
async fn list_users_is_ordered_by_id() {
    let app = TestApp::spawn().await;
    let alice = app.register("alice").await;
    let bob = app.register("bob").await;

    let res = app.client().get(routes::USERS).await;

    assert_eq!(res.status, 200);
    assert_eq!(
        res.body,
        json!([
            {"id": alice, "username": "alice"},
            {"id": bob, "username": "bob"},
        ])
    );
}

#[tokio::test]
async fn list_users_is_empty_on_fresh_database() {
    let app = TestApp::spawn().await;

    let res = app.client().get(routes::USERS).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!([]));
}
