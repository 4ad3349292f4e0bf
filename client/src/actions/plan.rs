use shared::{ApiError, ApiResponse, CreatePlanRequest, MessageResponse, Plan, UpdatePlanRequest};

use super::item_path;
use crate::http::HttpClient;

const PLANS: &str = "/plans";

#[derive(Clone)]
pub struct PlanActions {
    http: HttpClient,
}

impl PlanActions {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &CreatePlanRequest) -> Result<ApiResponse<Plan>, ApiError> {
        self.http.post(PLANS, request, "Failed to create plan").await
    }

    pub async fn list(&self) -> Result<ApiResponse<Vec<Plan>>, ApiError> {
        self.http.get(PLANS, "Failed to load plans").await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse<Plan>, ApiError> {
        self.http.get(&item_path(PLANS, id)?, "Failed to load plan").await
    }

    pub async fn update(&self, id: &str, request: &UpdatePlanRequest) -> Result<ApiResponse<Plan>, ApiError> {
        self.http
            .put(&item_path(PLANS, id)?, request, "Failed to update plan")
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<MessageResponse, ApiError> {
        self.http.delete(&item_path(PLANS, id)?, "Failed to delete plan").await
    }
}
