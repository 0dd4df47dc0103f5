//! Wire types for the Campaignwala REST API.
//!
//! The server speaks camelCase JSON; structs here carry
//! `serde(rename_all = "camelCase")` so Rust field names stay idiomatic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role, ordered user < TL < admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "TL")]
    TeamLead,
    #[serde(rename = "user")]
    User,
}

impl Role {
    /// Label used in the UI (role badge, member table).
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::TeamLead => "Team Lead",
            Role::User => "User",
        }
    }

    /// Whether this role can see and manage the team screen.
    pub fn manages_team(self) -> bool {
        matches!(self, Role::Admin | Role::TeamLead)
    }
}

/// Approval gate assigned by the server at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Pending,
    Approved,
}

impl RegistrationStatus {
    pub fn is_approved(self) -> bool {
        matches!(self, RegistrationStatus::Approved)
    }
}

/// Server-owned account record; the client holds a cached copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
    pub registration_status: RegistrationStatus,
}

/// What an OTP challenge is protecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OtpPurpose {
    Registration,
    Login,
    PasswordReset,
}

/// Response to credential submission (login, admin login, register,
/// forgot-password). When `require_otp` is set the server has mailed a code
/// to `data.email`; otherwise `access_token` + `user` complete the session
/// directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(rename = "requireOTP")]
    pub require_otp: bool,
    #[serde(default)]
    pub data: Option<OtpTarget>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
}

/// Where the OTP was sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpTarget {
    pub email: String,
}

/// Successful OTP verification: the session material.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResponse {
    pub access_token: String,
    pub user: User,
}

/// Plain acknowledgement body (`{"message": ...}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Wallet balance lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub balance: f64,
    pub currency: String,
}

impl WalletBalance {
    /// Display string: currency code then amount with two decimals.
    pub fn display(&self) -> String {
        format!("{} {:.2}", self.currency, self.balance)
    }
}

/// One notification row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Body for `POST /api/auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Body for `PUT /api/users/profile`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub phone_number: String,
}

/// Body for `POST /api/team/members`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMemberRequest {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user_json() -> &'static str {
        r#"{
            "id": "u-102",
            "name": "Asha Verma",
            "email": "asha@example.com",
            "phoneNumber": "9876543210",
            "role": "TL",
            "registrationStatus": "approved"
        }"#
    }

    #[test]
    fn test_user_decodes_camel_case_and_tl_role() {
        let user: User = serde_json::from_str(sample_user_json()).unwrap();
        assert_eq!(user.phone_number, "9876543210");
        assert_eq!(user.role, Role::TeamLead);
        assert!(user.registration_status.is_approved());
    }

    #[test]
    fn test_role_round_trips_wire_names() {
        for (role, wire) in [
            (Role::Admin, "\"admin\""),
            (Role::TeamLead, "\"TL\""),
            (Role::User, "\"user\""),
        ] {
            assert_eq!(serde_json::to_string(&role).unwrap(), wire);
            assert_eq!(serde_json::from_str::<Role>(wire).unwrap(), role);
        }
    }

    #[test]
    fn test_login_response_otp_pending_shape() {
        let body = r#"{"requireOTP": true, "data": {"email": "asha@example.com"}}"#;
        let resp: LoginResponse = serde_json::from_str(body).unwrap();
        assert!(resp.require_otp);
        assert_eq!(resp.data.unwrap().email, "asha@example.com");
        assert!(resp.access_token.is_none());
        assert!(resp.user.is_none());
    }

    #[test]
    fn test_login_response_direct_session_shape() {
        let body = format!(
            r#"{{"requireOTP": false, "accessToken": "tok-1", "user": {}}}"#,
            sample_user_json()
        );
        let resp: LoginResponse = serde_json::from_str(&body).unwrap();
        assert!(!resp.require_otp);
        assert_eq!(resp.access_token.as_deref(), Some("tok-1"));
        assert!(resp.user.is_some());
    }

    #[test]
    fn test_otp_purpose_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_string(&OtpPurpose::PasswordReset).unwrap(),
            "\"password-reset\""
        );
        assert_eq!(
            serde_json::to_string(&OtpPurpose::Registration).unwrap(),
            "\"registration\""
        );
    }

    #[test]
    fn test_wallet_balance_display() {
        let balance = WalletBalance {
            balance: 1240.5,
            currency: "INR".to_string(),
        };
        assert_eq!(balance.display(), "INR 1240.50");
    }
}
