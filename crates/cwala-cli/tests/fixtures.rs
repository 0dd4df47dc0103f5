//! JSON fixture helpers for integration tests.

#![allow(dead_code)]

use serde_json::{Value, json};
use wiremock::ResponseTemplate;

/// A user body in the API's camelCase wire shape.
pub fn user_json(id: &str, name: &str, email: &str, role: &str, status: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "email": email,
        "phoneNumber": "9876543210",
        "role": role,
        "registrationStatus": status,
    })
}

/// A session.json body the client would have cached after sign-in.
pub fn session_json(token: &str) -> Value {
    json!({
        "access_token": token,
        "user": user_json("u-1", "Asha Verma", "asha@example.com", "TL", "approved"),
        "wallet_balance": { "balance": 1240.5, "currency": "INR" },
        "read_notifications": [],
    })
}

/// 200 response with a JSON body.
pub fn json_response(body: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

/// Error response in the server's `{"message": ...}` shape.
pub fn error_response(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "message": message }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_wire_shape() {
        let user = user_json("u-1", "Asha", "a@b.com", "TL", "approved");
        assert_eq!(user["phoneNumber"], "9876543210");
        assert_eq!(user["registrationStatus"], "approved");
    }

    /// The session fixture must stay loadable by the client itself.
    #[test]
    fn test_session_json_parses_as_cache() {
        let value = session_json("cw-access-token-abcdef");
        let cache: cwala_core::session::SessionCache = serde_json::from_value(value).unwrap();
        assert!(cache.is_authenticated());
        assert_eq!(cache.access_token.as_deref(), Some("cw-access-token-abcdef"));
    }
}
