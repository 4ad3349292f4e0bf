use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};

pub mod error;
pub mod forms;
pub mod schedule;

pub use error::{ApiError, ApiErrorKind};
pub use forms::{FormError, FormPhase, FormState, Validate};
pub use schedule::{ScheduleError, TimeField, TimeRange, Weekday, WeeklySchedule};

/// Envelope wrapping every successful resource response: `{ data, message? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Body of responses that only carry a human-readable outcome
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// Lifecycle of the latest request issued against a resource collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Fulfilled,
    Rejected,
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending)
    }
}

/// Backend records addressable by an opaque string id
pub trait Identified {
    fn id(&self) -> &str;
}

/// An administrator account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Partial update of an administrator; omitted fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to a successful login; the token starts the session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(default)]
    pub admin: Option<Admin>,
    #[serde(default)]
    pub message: Option<String>,
}

/// "Forgot password" request, sends a reset link to the address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

/// A subscription plan offered to customers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub monthly_price: f64,
    pub yearly_price: f64,
    #[serde(default)]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePlanRequest {
    pub name: String,
    pub monthly_price: f64,
    pub yearly_price: f64,
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlanRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl From<CreatePlanRequest> for UpdatePlanRequest {
    fn from(request: CreatePlanRequest) -> Self {
        Self {
            name: Some(request.name),
            monthly_price: Some(request.monthly_price),
            yearly_price: Some(request.yearly_price),
            details: Some(request.details),
        }
    }
}

/// A notification delivered on the days and hours of its schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub schedule: WeeklySchedule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationRequest {
    pub title: String,
    pub message: String,
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNotificationRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<WeeklySchedule>,
}

impl From<CreateNotificationRequest> for UpdateNotificationRequest {
    fn from(request: CreateNotificationRequest) -> Self {
        Self {
            title: Some(request.title),
            message: Some(request.message),
            schedule: Some(request.schedule),
        }
    }
}

impl Identified for Admin {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Plan {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for Notification {
    fn id(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_admin_accepts_mongo_style_id() {
        let admin: Admin = serde_json::from_value(json!({
            "_id": "65f0c0ffee",
            "name": "Root",
            "email": "root@example.com"
        }))
        .unwrap();

        assert_eq!(admin.id, "65f0c0ffee");
        assert_eq!(admin.role, None);
    }

    #[test]
    fn test_plan_request_uses_camel_case() {
        let request = CreatePlanRequest {
            name: "Pro".to_string(),
            monthly_price: 9.99,
            yearly_price: 99.0,
            details: vec!["a".into(), "b".into(), "c".into()],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["monthlyPrice"], json!(9.99));
        assert_eq!(value["yearlyPrice"], json!(99.0));
        assert!(value.get("monthly_price").is_none());
    }

    #[test]
    fn test_update_plan_request_skips_missing_fields() {
        let request = UpdatePlanRequest {
            name: Some("Team".to_string()),
            ..UpdatePlanRequest::default()
        };

        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "name": "Team" }));
    }

    #[test]
    fn test_reset_password_request_wire_names() {
        let request = ResetPasswordRequest {
            token: "t0k".to_string(),
            new_password: "hunter22".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "token": "t0k", "newPassword": "hunter22" })
        );
    }

    #[test]
    fn test_envelope_with_optional_message() {
        let response: ApiResponse<Vec<Plan>> = serde_json::from_value(json!({
            "data": [{
                "id": "p1",
                "name": "Basic",
                "monthlyPrice": 5.0,
                "yearlyPrice": 50.0,
                "details": ["one", "two", "three"]
            }]
        }))
        .unwrap();

        assert_eq!(response.message, None);
        assert_eq!(response.into_data()[0].details.len(), 3);
    }

    #[test]
    fn test_notification_without_schedule_defaults_to_empty() {
        let notification: Notification = serde_json::from_value(json!({
            "id": "n1",
            "title": "Maintenance",
            "message": "Down for an hour",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert!(notification.schedule.is_empty());
        assert!(notification.created_at.is_some());
    }

    #[test]
    fn test_login_response_token_alias() {
        let response: LoginResponse =
            serde_json::from_value(json!({ "accessToken": "abc" })).unwrap();
        assert_eq!(response.token, "abc");
        assert!(response.admin.is_none());
    }

    #[test]
    fn test_request_status_helpers() {
        assert_eq!(RequestStatus::default(), RequestStatus::Idle);
        assert!(RequestStatus::Pending.is_pending());
        assert!(!RequestStatus::Rejected.is_pending());
        assert_eq!(serde_json::to_value(RequestStatus::Fulfilled).unwrap(), json!("fulfilled"));
    }
}
