use log::info;
use shared::{
    ApiError, LoginRequest, LoginResponse, MessageResponse, PasswordResetRequest, RegisterRequest,
    ResetPasswordRequest,
};

use crate::http::HttpClient;

#[derive(Clone)]
pub struct AuthActions {
    http: HttpClient,
}

impl AuthActions {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<MessageResponse, ApiError> {
        self.http.post("/auth/register", request, "Registration failed").await
    }

    /// Sign in and start the session with the returned token
    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let response: LoginResponse = self.http.post("/auth/login", request, "Login failed").await?;
        self.http.tokens().set_token(&response.token);
        info!("Session started for {}", request.email);
        Ok(response)
    }

    /// End the session; later requests go out without a token
    pub fn logout(&self) {
        self.http.tokens().clear_token();
        info!("Session ended");
    }

    pub fn is_signed_in(&self) -> bool {
        self.http.tokens().has_session()
    }

    /// Ask the backend to email a password reset link
    pub async fn request_password_reset(&self, request: &PasswordResetRequest) -> Result<MessageResponse, ApiError> {
        self.http
            .post("/updatepassword", request, "Could not send the reset email")
            .await
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<MessageResponse, ApiError> {
        self.http
            .post("/admin/reset-password", request, "Could not reset the password")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use crate::config::ClientConfig;
    use crate::session::{SessionTokens, TokenStore};
    use crate::testing::MockTransport;
    use shared::ApiErrorKind;

    fn actions(transport: &MockTransport, tokens: &SessionTokens) -> AuthActions {
        AuthActions::new(HttpClient::new(
            ClientConfig::with_base_url("http://api.test"),
            Rc::new(transport.clone()),
            Rc::new(tokens.clone()),
        ))
    }

    fn credentials() -> LoginRequest {
        LoginRequest {
            email: "root@example.com".to_string(),
            password: "wrong".to_string(),
        }
    }

    #[tokio::test]
    async fn test_login_rejection_is_the_backend_message() {
        let transport = MockTransport::new();
        transport.respond(401, r#"{"error":"Invalid credentials"}"#);
        let tokens = SessionTokens::new();

        let error = actions(&transport, &tokens).login(&credentials()).await.unwrap_err();

        assert_eq!(error.to_string(), "Invalid credentials");
        assert_eq!(error.kind(), &ApiErrorKind::Rejected { status: 401 });
        assert!(!tokens.has_session());
    }

    #[tokio::test]
    async fn test_login_starts_and_logout_ends_session() -> anyhow::Result<()> {
        let transport = MockTransport::new();
        transport.respond(200, r#"{"token":"jwt-abc","message":"Welcome back"}"#);
        transport.respond(200, r#"{"message":"ok"}"#);
        transport.respond(200, r#"{"message":"ok"}"#);
        let tokens = SessionTokens::new();
        let auth = actions(&transport, &tokens);

        let response = auth.login(&credentials()).await?;

        assert_eq!(response.message.as_deref(), Some("Welcome back"));
        assert_eq!(tokens.get_token().as_deref(), Some("jwt-abc"));
        assert!(auth.is_signed_in());

        let request = transport.last_request().unwrap();
        assert_eq!(request.url, "http://api.test/auth/login");
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap())?;
        assert_eq!(body["email"], "root@example.com");

        let _: MessageResponse = auth.http.get("/plans", "Could not load plans").await?;
        let signed = transport.last_request().unwrap();
        assert_eq!(signed.header("Authorization"), Some("Bearer jwt-abc"));

        auth.logout();
        assert!(!auth.is_signed_in());
        assert_eq!(tokens.get_token(), None);

        let _: MessageResponse = auth.http.get("/plans", "Could not load plans").await?;
        let anonymous = transport.last_request().unwrap();
        assert_eq!(anonymous.url, "http://api.test/plans");
        assert_eq!(anonymous.header("Authorization"), None);
        Ok(())
    }

    #[tokio::test]
    async fn test_password_reset_endpoints() -> anyhow::Result<()> {
        let transport = MockTransport::new();
        transport.respond(200, r#"{"message":"Reset link sent"}"#);
        transport.respond(400, r#"{"message":"Token expired"}"#);
        let auth = actions(&transport, &SessionTokens::new());

        let sent = auth
            .request_password_reset(&PasswordResetRequest {
                email: "root@example.com".to_string(),
            })
            .await?;
        assert_eq!(sent.message.as_deref(), Some("Reset link sent"));

        let error = auth
            .reset_password(&ResetPasswordRequest {
                token: "old".to_string(),
                new_password: "new-password".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(error.message(), "Token expired");

        let urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec!["http://api.test/updatepassword", "http://api.test/admin/reset-password"]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_register_network_failure_uses_default_message() {
        let transport = MockTransport::new();
        transport.fail("offline");

        let error = actions(&transport, &SessionTokens::new())
            .register(&RegisterRequest {
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                password: "analytical".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "Registration failed");
        assert_eq!(error.kind(), &ApiErrorKind::Network);
    }
}
