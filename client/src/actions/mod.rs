//! One action module per backend resource.
//!
//! Each operation returns the decoded response payload untouched on success
//! and the adapter's [`ApiError`] on failure. The error's `Display` is the
//! message to show, so forms can print it directly.

use shared::ApiError;

use crate::http::HttpClient;

pub mod admin;
pub mod auth;
pub mod notification;
pub mod plan;

pub use admin::AdminActions;
pub use auth::AuthActions;
pub use notification::NotificationActions;
pub use plan::PlanActions;

/// All resource modules sharing one HTTP client and session
#[derive(Clone)]
pub struct Api {
    pub auth: AuthActions,
    pub admins: AdminActions,
    pub notifications: NotificationActions,
    pub plans: PlanActions,
}

impl Api {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthActions::new(http.clone()),
            admins: AdminActions::new(http.clone()),
            notifications: NotificationActions::new(http.clone()),
            plans: PlanActions::new(http),
        }
    }
}

/// `/{collection}/{id}`, refusing blank ids before anything hits the network
pub(crate) fn item_path(collection: &str, id: &str) -> Result<String, ApiError> {
    let id = id.trim();
    if id.is_empty() || id.contains('/') {
        return Err(ApiError::validation(format!("Invalid id for {}", collection.trim_matches('/'))));
    }
    Ok(format!("{}/{}", collection.trim_end_matches('/'), id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ApiErrorKind;

    #[test]
    fn test_item_path() {
        assert_eq!(item_path("/plans", "abc").unwrap(), "/plans/abc");
        assert_eq!(item_path("/notifications/admin", " 42 ").unwrap(), "/notifications/admin/42");

        let error = item_path("/admin", "  ").unwrap_err();
        assert_eq!(error.kind(), &ApiErrorKind::Validation);
        assert_eq!(error.message(), "Invalid id for admin");
        assert!(item_path("/admin", "../etc").is_err());
    }
}
