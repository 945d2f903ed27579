use sea_orm::{EntityTrait, PaginatorTrait};

use blog_server::entity::{blog_post, review, user};
use blog_server::seed::{self, SeedCounts, SeedError};
use serde_json::json;

use crate::common::{TestApp, routes};

const COUNTS: SeedCounts = SeedCounts {
    users: 3,
    posts: 5,
    reviews: 8,
};

#[tokio::test]
async fn seeding_inserts_requested_rows() {
    let app = TestApp::spawn().await;
    let data = seed::generate(COUNTS, 11).unwrap();

    seed::insert(&app.db, &data).await.unwrap();

    assert_eq!(user::Entity::find().count(&app.db).await.unwrap(), 3);
    assert_eq!(blog_post::Entity::find().count(&app.db).await.unwrap(), 5);
    assert_eq!(review::Entity::find().count(&app.db).await.unwrap(), 8);
}

#[tokio::test]
async fn seeded_users_can_log_in() {
    let app = TestApp::spawn().await;
    let data = seed::generate(COUNTS, 11).unwrap();
    seed::insert(&app.db, &data).await.unwrap();

    let res = app
        .client()
        .post(
            routes::LOGIN,
            &json!({"username": data.users[0].username, "password": seed::SEED_PASSWORD}),
        )
        .await;

    assert_eq!(res.status, 200, "{}", res.text);
}

#[tokio::test]
async fn seeding_refuses_non_empty_database() {
    let app = TestApp::spawn().await;
    app.register("alice").await;
    let data = seed::generate(COUNTS, 11).unwrap();

    let err = seed::insert(&app.db, &data).await.unwrap_err();

    assert!(matches!(err, SeedError::NotEmpty(1)));
    assert_eq!(blog_post::Entity::find().count(&app.db).await.unwrap(), 0);
}
