use super::{validate_email, FormError, Validate};
use crate::{Admin, UpdateAdminRequest};

/// Inline edit of another admin's profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminFormData {
    pub name: String,
    pub email: String,
    pub role: String,
}

impl AdminFormData {
    pub fn from_admin(admin: &Admin) -> Self {
        Self {
            name: admin.name.clone(),
            email: admin.email.clone(),
            role: admin.role.clone().unwrap_or_default(),
        }
    }
}

impl Validate for AdminFormData {
    type Payload = UpdateAdminRequest;

    fn validate(&self) -> Result<UpdateAdminRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let email = validate_email(&self.email)?;
        let role = self.role.trim();
        Ok(UpdateAdminRequest {
            name: Some(name.to_string()),
            email: Some(email),
            role: (!role.is_empty()).then(|| role.to_string()),
        })
    }
}
