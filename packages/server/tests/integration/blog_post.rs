use serde_json::json;

use crate::common::{TestApp, routes};

mod create {
    use super::*;

    #[tokio::test]
    async fn logged_in_user_creates_post_as_author() {
        let app = TestApp::spawn().await;
        let (client, user_id) = app.logged_in("alice").await;

        let res = client
            .post(
                routes::BLOG_POSTS,
                &json!({"title": "  Hello  ", "content": "First post"}),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "Blog post created successfully");
        let id = res.id();

        let res = client.get(&routes::blog_post(id)).await;
        assert_eq!(res.status, 200);
        assert_eq!(
            res.body,
            json!({"id": id, "title": "Hello", "content": "First post", "user_id": user_id})
        );
    }

    #[tokio::test]
    async fn anonymous_create_is_unauthenticated() {
        let app = TestApp::spawn().await;

        let res = app
            .client()
            .post(
                routes::BLOG_POSTS,
                &json!({"title": "Hello", "content": "First post"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn missing_title_is_rejected_and_nothing_is_stored() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;
        client.create_blog_post("Existing").await;

        let res = client
            .post(routes::BLOG_POSTS, &json!({"content": "No title"}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["error"], "Blog post creation failed");
        assert_eq!(
            res.body["errors"]["title"],
            json!(["This field is required."])
        );

        let list = client.get(routes::BLOG_POSTS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn overlong_fields_are_rejected() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;

        let res = client
            .post(
                routes::BLOG_POSTS,
                &json!({"title": "t".repeat(101), "content": "c".repeat(1001)}),
            )
            .await;

        assert_eq!(res.status, 400);
        let errors = res.body["errors"].as_object().unwrap();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("content"));
    }

    #[tokio::test]
    async fn fields_at_the_limit_are_accepted() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;

        let res = client
            .post(
                routes::BLOG_POSTS,
                &json!({"title": "t".repeat(100), "content": "c".repeat(1000)}),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
    }
}

mod read {
    use super::*;

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.client().get(&routes::blog_post(42)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["error"], "Blog post not found");
    }

    #[tokio::test]
    async fn list_returns_every_post_in_id_order() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;
        let first = client.create_blog_post("First").await;
        let second = client.create_blog_post("Second").await;

        let res = app.client().get(routes::BLOG_POSTS).await;

        assert_eq!(res.status, 200);
        let ids: Vec<i64> = res
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![first as i64, second as i64]);
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn update_replaces_title_and_content() {
        let app = TestApp::spawn().await;
        let (client, user_id) = app.logged_in("alice").await;
        let id = client.create_blog_post("Old").await;

        let res = client
            .put(
                &routes::blog_post(id),
                &json!({"title": "New", "content": "Rewritten"}),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Blog post updated successfully");

        let res = client.get(&routes::blog_post(id)).await;
        assert_eq!(
            res.body,
            json!({"id": id, "title": "New", "content": "Rewritten", "user_id": user_id})
        );
    }

    #[tokio::test]
    async fn unknown_post_is_not_found_even_with_invalid_body() {
        let app = TestApp::spawn().await;

        let res = app
            .client()
            .put(&routes::blog_post(999), &json!({"title": ""}))
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn invalid_body_leaves_post_unchanged() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;
        let id = client.create_blog_post("Keep me").await;

        let res = client
            .put(&routes::blog_post(id), &json!({"title": "", "content": "x"}))
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Update failed");

        let res = client.get(&routes::blog_post(id)).await;
        assert_eq!(res.body["title"], "Keep me");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_post_and_its_reviews() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;
        let doomed = client.create_blog_post("Doomed").await;
        let kept = client.create_blog_post("Kept").await;
        let doomed_review = client.create_review(doomed, 4).await;
        let kept_review = client.create_review(kept, 2).await;

        let res = client.delete(&routes::blog_post(doomed)).await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["message"], "Blog post deleted successfully");

        assert_eq!(client.get(&routes::blog_post(doomed)).await.status, 404);
        assert_eq!(client.get(&routes::review(doomed_review)).await.status, 404);
        assert_eq!(client.get(&routes::blog_post(kept)).await.status, 200);
        assert_eq!(client.get(&routes::review(kept_review)).await.status, 200);
    }

    #[tokio::test]
    async fn deleting_unknown_post_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.client().delete(&routes::blog_post(7)).await;

        assert_eq!(res.status, 404);
    }
}
