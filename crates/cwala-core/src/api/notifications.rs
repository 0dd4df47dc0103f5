//! Notifications endpoint.

use super::client::ApiClient;
use super::errors::ApiError;
use super::types::Notification;

/// Fetches notifications, newest first as the server orders them.
///
/// # Errors
/// Returns an error if the operation fails.
pub async fn fetch_notifications(client: &ApiClient) -> Result<Vec<Notification>, ApiError> {
    client.get("/api/notifications").await
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_fetch_notifications() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/notifications"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "n-1",
                    "title": "New lead assigned",
                    "message": "A credit card lead was assigned to you.",
                    "createdAt": "2025-11-02T09:30:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let notifications = fetch_notifications(&client).await.unwrap();

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].title, "New lead assigned");
    }
}
