//! Team member administration (admins and team leads only).

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::{AddMemberRequest, MessageResponse, User};

/// Lists the members visible to the signed-in user.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn list_members(client: &ApiClient) -> Result<Vec<User>, ApiError> {
    client.get("/api/team/members").await
}

/// Adds a member. The server emails an invite with a temporary password.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn add_member(client: &ApiClient, request: &AddMemberRequest) -> Result<User, ApiError> {
    client.post("/api/team/members", request).await
}

/// Removes a member by id.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn remove_member(client: &ApiClient, id: &str) -> Result<MessageResponse, ApiError> {
    client.delete(&format!("/api/team/members/{id}")).await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::types::Role;

    /// Member list decodes into users.
    #[tokio::test]
    async fn test_list_members() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/team/members"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "u-2",
                    "name": "Ravi Kumar",
                    "email": "ravi@example.com",
                    "phoneNumber": "9000000001",
                    "role": "user",
                    "registrationStatus": "approved"
                },
                {
                    "id": "u-3",
                    "name": "Meera Shah",
                    "email": "meera@example.com",
                    "phoneNumber": "9000000002",
                    "role": "user",
                    "registrationStatus": "pending"
                }
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let members = list_members(&client).await.unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members[0].name, "Ravi Kumar");
        assert!(!members[1].registration_status.is_approved());
    }

    /// Adding a member posts camelCase fields including the role.
    #[tokio::test]
    async fn test_add_member_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/team/members"))
            .and(body_json(json!({
                "name": "Ravi Kumar",
                "email": "ravi@example.com",
                "phoneNumber": "9000000001",
                "role": "user"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "u-2",
                "name": "Ravi Kumar",
                "email": "ravi@example.com",
                "phoneNumber": "9000000001",
                "role": "user",
                "registrationStatus": "pending"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let user = add_member(
            &client,
            &AddMemberRequest {
                name: "Ravi Kumar".to_string(),
                email: "ravi@example.com".to_string(),
                phone_number: "9000000001".to_string(),
                role: Role::User,
            },
        )
        .await
        .unwrap();

        assert_eq!(user.id, "u-2");
    }

    /// Removal hits the member's id path.
    #[tokio::test]
    async fn test_remove_member_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/team/members/u-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "removed"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let resp = remove_member(&client, "u-2").await.unwrap();
        assert_eq!(resp.message, "removed");
    }
}
