use shared::{
    ApiError, ApiResponse, CreateNotificationRequest, MessageResponse, Notification,
    UpdateNotificationRequest,
};

use super::item_path;
use crate::http::HttpClient;

const NOTIFICATIONS: &str = "/notifications";
const BY_ADMIN: &str = "/notifications/admin";

#[derive(Clone)]
pub struct NotificationActions {
    http: HttpClient,
}

impl NotificationActions {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &CreateNotificationRequest) -> Result<ApiResponse<Notification>, ApiError> {
        self.http
            .post(NOTIFICATIONS, request, "Failed to create notification")
            .await
    }

    /// Notifications of the signed-in admin
    pub async fn list(&self) -> Result<ApiResponse<Vec<Notification>>, ApiError> {
        self.http.get(NOTIFICATIONS, "Failed to load notifications").await
    }

    /// Every admin's notifications
    pub async fn list_all_admin(&self) -> Result<ApiResponse<Vec<Notification>>, ApiError> {
        self.http
            .get(&format!("{}/all", BY_ADMIN), "Failed to load notifications")
            .await
    }

    pub async fn list_for_admin(&self, admin_id: &str) -> Result<ApiResponse<Vec<Notification>>, ApiError> {
        self.http
            .get(&item_path(BY_ADMIN, admin_id)?, "Failed to load notifications")
            .await
    }

    pub async fn update(
        &self,
        id: &str,
        request: &UpdateNotificationRequest,
    ) -> Result<ApiResponse<Notification>, ApiError> {
        self.http
            .put(&item_path(NOTIFICATIONS, id)?, request, "Failed to update notification")
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.http
            .delete(&item_path(NOTIFICATIONS, id)?, "Failed to delete notification")
            .await
    }
}
