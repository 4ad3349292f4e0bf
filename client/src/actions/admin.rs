use shared::{Admin, ApiError, ApiResponse, MessageResponse, UpdateAdminRequest};

use super::item_path;
use crate::http::HttpClient;

const ADMINS: &str = "/admin";

#[derive(Clone)]
pub struct AdminActions {
    http: HttpClient,
}

impl AdminActions {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Admin>>, ApiError> {
        self.http.get(ADMINS, "Failed to load admins").await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse<Admin>, ApiError> {
        self.http.get(&item_path(ADMINS, id)?, "Failed to load admin").await
    }

    pub async fn update(&self, id: &str, request: &UpdateAdminRequest) -> Result<ApiResponse<Admin>, ApiError> {
        self.http
            .put(&item_path(ADMINS, id)?, request, "Failed to update admin")
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.http.delete(&item_path(ADMINS, id)?, "Failed to delete admin").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::config::ClientConfig;
    use crate::http::Method;
    use crate::session::SessionTokens;
    use crate::testing::MockTransport;

    fn actions(transport: &MockTransport) -> AdminActions {
        AdminActions::new(HttpClient::new(
            ClientConfig::with_base_url("http://api.test"),
            Rc::new(transport.clone()),
            Rc::new(SessionTokens::with_token("tok")),
        ))
    }

    #[tokio::test]
    async fn test_list_and_get() -> anyhow::Result<()> {
        let transport = MockTransport::new();
        transport.respond(
            200,
            r#"{"data":[{"_id":"a1","name":"Root","email":"root@example.com","role":"owner"}]}"#,
        );
        transport.respond(200, r#"{"data":{"id":"a1","name":"Root","email":"root@example.com"}}"#);
        let admins = actions(&transport);

        let list = admins.list().await?.into_data();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].role.as_deref(), Some("owner"));

        let one = admins.get("a1").await?.into_data();
        assert_eq!(one.email, "root@example.com");

        let requests = transport.requests();
        assert_eq!(requests[0].url, "http://api.test/admin");
        assert_eq!(requests[1].url, "http://api.test/admin/a1");
        assert!(requests.iter().all(|r| r.method == Method::Get));
        Ok(())
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() -> anyhow::Result<()> {
        let transport = MockTransport::new();
        transport.respond(200, r#"{"data":{"id":"a1","name":"Renamed","email":"root@example.com"},"message":"Updated"}"#);

        let response = actions(&transport)
            .update(
                "a1",
                &UpdateAdminRequest {
                    name: Some("Renamed".to_string()),
                    ..UpdateAdminRequest::default()
                },
            )
            .await?;

        assert_eq!(response.message.as_deref(), Some("Updated"));
        let request = transport.last_request().unwrap();
        assert_eq!(request.method, Method::Put);
        assert_eq!(request.body.as_deref(), Some(r#"{"name":"Renamed"}"#));
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_with_blank_id_never_hits_network() {
        let transport = MockTransport::new();

        let error = actions(&transport).delete(" ").await.unwrap_err();

        assert_eq!(error.message(), "Invalid id for admin");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete_rejection_message() {
        let transport = MockTransport::new();
        transport.respond(403, r#"{"error":"Cannot delete yourself"}"#);

        let error = actions(&transport).delete("a1").await.unwrap_err();
        assert_eq!(error.to_string(), "Cannot delete yourself");
        assert_eq!(transport.last_request().unwrap().method, Method::Delete);
    }
}
