use serde_json::json;

use crate::common::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME, TestApp, routes};

mod login {
    use super::*;

    #[tokio::test]
    async fn valid_credentials_return_a_token_and_profile() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({
                    "username": DEFAULT_ADMIN_USERNAME,
                    "password": DEFAULT_ADMIN_PASSWORD,
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert!(res.body["token"].is_string());
        assert_eq!(res.body["admin"]["username"], DEFAULT_ADMIN_USERNAME);
        assert_eq!(res.body["admin"]["role"], "superadmin");
        assert!(res.body["admin"]["password"].is_null());
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized_and_issues_no_token() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": DEFAULT_ADMIN_USERNAME, "password": "nope"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
        assert!(res.body["token"].is_null());
    }

    #[tokio::test]
    async fn unknown_username_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": "ghost", "password": "whatever"}),
            )
            .await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn empty_fields_are_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(routes::LOGIN, &json!({"username": "", "password": ""}))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod verify {
    use super::*;

    #[tokio::test]
    async fn login_then_verify_returns_the_same_identity() {
        let app = TestApp::spawn().await;
        let token = app.login_default_admin().await;

        let res = app.get_with_token(routes::VERIFY, &token).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["valid"], true);
        assert_eq!(res.body["admin"]["username"], DEFAULT_ADMIN_USERNAME);
        assert_eq!(res.body["admin"]["role"], "superadmin");
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::VERIFY).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_MISSING");
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let app = TestApp::spawn().await;

        let res = app.get_with_token(routes::VERIFY, "not-a-jwt").await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let app = TestApp::spawn().await;
        let forged =
            server::utils::jwt::sign(1, "admin", "superadmin", "Administrator", "other", 24)
                .unwrap();

        let res = app.get_with_token(routes::VERIFY, &forged).await;

        assert_eq!(res.status, 401);
        assert_eq!(res.body["code"], "TOKEN_INVALID");
    }
}

mod forgot_password {
    use super::*;

    #[tokio::test]
    async fn resets_the_password_for_a_matching_username_email_pair() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::FORGOT_PASSWORD,
                &json!({
                    "username": DEFAULT_ADMIN_USERNAME,
                    "email": "admin@example.org",
                    "newPassword": "brand-new",
                    "confirmPassword": "brand-new",
                }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text);

        // Old password no longer works, new one does.
        let old = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": DEFAULT_ADMIN_USERNAME, "password": DEFAULT_ADMIN_PASSWORD}),
            )
            .await;
        assert_eq!(old.status, 401);

        let new = app
            .post_without_token(
                routes::LOGIN,
                &json!({"username": DEFAULT_ADMIN_USERNAME, "password": "brand-new"}),
            )
            .await;
        assert_eq!(new.status, 200, "{}", new.text);
    }

    #[tokio::test]
    async fn unmatched_pair_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::FORGOT_PASSWORD,
                &json!({
                    "username": DEFAULT_ADMIN_USERNAME,
                    "email": "someone-else@example.org",
                    "newPassword": "brand-new",
                    "confirmPassword": "brand-new",
                }),
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::FORGOT_PASSWORD,
                &json!({
                    "username": DEFAULT_ADMIN_USERNAME,
                    "email": "admin@example.org",
                    "newPassword": "12345",
                    "confirmPassword": "12345",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post_without_token(
                routes::FORGOT_PASSWORD,
                &json!({
                    "username": DEFAULT_ADMIN_USERNAME,
                    "email": "admin@example.org",
                    "newPassword": "brand-new",
                    "confirmPassword": "different",
                }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}
