//! Authentication endpoints.
//!
//! Login and registration normally answer with `requireOTP: true` and the
//! email the one-time code was sent to; `verify_otp` completes the flow and
//! returns the access token. Servers may skip the OTP step entirely, in
//! which case the first response already carries the token and user.

use serde::Serialize;

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::{LoginResponse, MessageResponse, OtpPurpose, RegisterRequest, VerifyResponse};

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct VerifyBody<'a> {
    email: &'a str,
    otp: &'a str,
    purpose: OtpPurpose,
}

#[derive(Serialize)]
struct EmailBody<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetBody<'a> {
    email: &'a str,
    otp: &'a str,
    new_password: &'a str,
}

/// Signs in a user or team lead.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    client
        .post("/api/auth/login", &CredentialsBody { email, password })
        .await
}

/// Signs in an administrator.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn admin_login(
    client: &ApiClient,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    client
        .post("/api/auth/admin/login", &CredentialsBody { email, password })
        .await
}

/// Creates a new account. The server emails an OTP to confirm it.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn register(
    client: &ApiClient,
    request: &RegisterRequest,
) -> Result<LoginResponse, ApiError> {
    client.post("/api/auth/register", request).await
}

/// Confirms a one-time code for the given flow.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn verify_otp(
    client: &ApiClient,
    email: &str,
    otp: &str,
    purpose: OtpPurpose,
) -> Result<VerifyResponse, ApiError> {
    client
        .post(
            "/api/auth/verify-otp",
            &VerifyBody {
                email,
                otp,
                purpose,
            },
        )
        .await
}

/// Starts a password reset by emailing a one-time code.
/// Answers with the same challenge shape as login.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn forgot_password(client: &ApiClient, email: &str) -> Result<LoginResponse, ApiError> {
    client
        .post("/api/auth/forgot-password", &EmailBody { email })
        .await
}

/// Completes a password reset with the emailed code.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn reset_password(
    client: &ApiClient,
    email: &str,
    otp: &str,
    new_password: &str,
) -> Result<MessageResponse, ApiError> {
    client
        .post(
            "/api/auth/reset-password",
            &ResetBody {
                email,
                otp,
                new_password,
            },
        )
        .await
}

/// Invalidates the server-side session for the attached token.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn logout(client: &ApiClient) -> Result<MessageResponse, ApiError> {
    client
        .post("/api/auth/logout", &serde_json::json!({}))
        .await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::types::Role;

    /// Login answers with the OTP challenge shape.
    #[tokio::test]
    async fn test_login_returns_otp_challenge() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(body_json(
                json!({"email": "asha@example.com", "password": "secret1"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "requireOTP": true,
                "data": {"email": "asha@example.com"}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let resp = login(&client, "asha@example.com", "secret1").await.unwrap();

        assert!(resp.require_otp);
        assert_eq!(resp.data.unwrap().email, "asha@example.com");
    }

    /// Verify sends the purpose so the server knows which flow to complete.
    #[tokio::test]
    async fn test_verify_otp_sends_purpose() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/verify-otp"))
            .and(body_json(json!({
                "email": "asha@example.com",
                "otp": "4821",
                "purpose": "login"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "accessToken": "token-abc",
                "user": {
                    "id": "u-1",
                    "name": "Asha Verma",
                    "email": "asha@example.com",
                    "phoneNumber": "9876543210",
                    "role": "user",
                    "registrationStatus": "approved"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let resp = verify_otp(&client, "asha@example.com", "4821", OtpPurpose::Login)
            .await
            .unwrap();

        assert_eq!(resp.access_token, "token-abc");
        assert_eq!(resp.user.role, Role::User);
    }

    /// Reset sends the code alongside the new password in one call.
    #[tokio::test]
    async fn test_reset_password_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/reset-password"))
            .and(body_json(json!({
                "email": "asha@example.com",
                "otp": "4821",
                "newPassword": "fresh-pass"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Password updated"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let resp = reset_password(&client, "asha@example.com", "4821", "fresh-pass")
            .await
            .unwrap();
        assert_eq!(resp.message, "Password updated");
    }

    /// Logout posts with the bearer token attached.
    #[tokio::test]
    async fn test_logout_uses_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/auth/logout"))
            .and(wiremock::matchers::header(
                "authorization",
                "Bearer token-abc",
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "bye"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_token(Some("token-abc".to_string()));
        logout(&client).await.unwrap();
    }
}
