use serde_json::json;

use crate::common::{PASSWORD, TestApp, routes};

#[tokio::test]
async fn index_says_hello() {
    let app = TestApp::spawn().await;

    let res = app.client().get(routes::INDEX).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.text, "Hello, world!");
}

mod registration {
    use super::*;

    fn body(username: &str, email: &str) -> serde_json::Value {
        json!({
            "username": username,
            "email": email,
            "password": PASSWORD,
            "confirm": PASSWORD,
        })
    }

    #[tokio::test]
    async fn new_user_can_register_with_valid_fields() {
        let app = TestApp::spawn().await;

        let res = app
            .client()
            .post(routes::REGISTER, &body("alice", "alice@example.com"))
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["message"], "User registered successfully");
        assert!(res.body["id"].is_number());
    }

    #[tokio::test]
    async fn padded_email_is_trimmed_before_validation() {
        let app = TestApp::spawn().await;

        let res = app
            .client()
            .post(routes::REGISTER, &body("alice", "  alice@example.com "))
            .await;
        assert_eq!(res.status, 201, "{}", res.text);

        let res = app
            .client()
            .post(routes::REGISTER, &body("bob", "alice@example.com"))
            .await;
        assert_eq!(res.status, 400);
        assert!(res.body["errors"]["email"].is_array());
    }

    #[tokio::test]
    async fn stored_password_is_not_plaintext() {
        use blog_server::entity::user;
        use sea_orm::EntityTrait;

        let app = TestApp::spawn().await;
        let id = app.register("alice").await;

        let stored = user::Entity::find_by_id(id)
            .one(&app.db)
            .await
            .unwrap()
            .unwrap();
        assert_ne!(stored.password, PASSWORD);
        assert!(stored.password.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn taken_username_and_email_are_reported_per_field() {
        let app = TestApp::spawn().await;
        app.register("alice").await;

        let res = app
            .client()
            .post(routes::REGISTER, &body("alice", "alice@example.com"))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["error"], "Registration failed");
        assert!(res.body["errors"]["username"].is_array());
        assert!(res.body["errors"]["email"].is_array());
    }

    #[tokio::test]
    async fn mismatched_confirmation_cites_confirm_field() {
        let app = TestApp::spawn().await;

        let res = app
            .client()
            .post(
                routes::REGISTER,
                &json!({
                    "username": "alice",
                    "email": "alice@example.com",
                    "password": PASSWORD,
                    "confirm": "different",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(
            res.body["errors"]["confirm"],
            json!(["Field must be equal to password."])
        );
    }

    #[tokio::test]
    async fn invalid_email_and_short_password_are_rejected_together() {
        let app = TestApp::spawn().await;

        let res = app
            .client()
            .post(
                routes::REGISTER,
                &json!({
                    "username": "alice",
                    "email": "not-an-email",
                    "password": "abc",
                    "confirm": "abc",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        let errors = res.body["errors"].as_object().unwrap();
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("password"));
        assert!(!errors.contains_key("username"));
    }
}

mod login {
    use super::*;

    #[tokio::test]
    async fn correct_credentials_log_in() {
        let app = TestApp::spawn().await;
        app.register("alice").await;

        let res = app
            .client()
            .post(
                routes::LOGIN,
                &json!({"username": "alice", "password": PASSWORD}),
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Logged in successfully");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_look_identical() {
        let app = TestApp::spawn().await;
        app.register("alice").await;
        let client = app.client();

        let wrong_password = client
            .post(
                routes::LOGIN,
                &json!({"username": "alice", "password": "wrong-password"}),
            )
            .await;
        let unknown_user = client
            .post(
                routes::LOGIN,
                &json!({"username": "nobody", "password": PASSWORD}),
            )
            .await;

        assert_eq!(wrong_password.status, 401);
        assert_eq!(unknown_user.status, 401);
        assert_eq!(wrong_password.body["code"], "INVALID_CREDENTIALS");
        assert_eq!(wrong_password.text, unknown_user.text);
    }

    #[tokio::test]
    async fn missing_fields_are_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.client().post(routes::LOGIN, &json!({})).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["error"], "Login failed");
        assert!(res.body["errors"]["username"].is_array());
        assert!(res.body["errors"]["password"].is_array());
    }

    #[tokio::test]
    async fn broken_json_is_a_malformed_request() {
        let app = TestApp::spawn().await;

        let res = app.client().post_raw(routes::LOGIN, "{not json").await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "MALFORMED_REQUEST");
    }
}

mod logout {
    use super::*;

    #[tokio::test]
    async fn logout_ends_the_session() {
        let app = TestApp::spawn().await;
        let (client, _) = app.logged_in("alice").await;

        let res = client.post(routes::LOGOUT, &json!({})).await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Logged out successfully");

        let res = client
            .post(
                routes::BLOG_POSTS,
                &json!({"title": "After logout", "content": "..."}),
            )
            .await;
        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn logout_without_session_succeeds() {
        let app = TestApp::spawn().await;

        let res = app.client().post(routes::LOGOUT, &json!({})).await;

        assert_eq!(res.status, 200);
    }
}
