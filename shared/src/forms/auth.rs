use super::{validate_email, validate_new_password, FormError, Validate};
use crate::{LoginRequest, PasswordResetRequest, RegisterRequest, ResetPasswordRequest};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFormData {
    pub email: String,
    pub password: String,
}

impl Validate for LoginFormData {
    type Payload = LoginRequest;

    fn validate(&self) -> Result<LoginRequest, FormError> {
        let email = validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(FormError::MissingPassword);
        }
        Ok(LoginRequest {
            email,
            password: self.password.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFormData {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterFormData {
    type Payload = RegisterRequest;

    fn validate(&self) -> Result<RegisterRequest, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        Ok(RegisterRequest {
            name: name.to_string(),
            email: validate_email(&self.email)?,
            password: validate_new_password(&self.password)?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordFormData {
    pub email: String,
}

impl Validate for ForgotPasswordFormData {
    type Payload = PasswordResetRequest;

    fn validate(&self) -> Result<PasswordResetRequest, FormError> {
        Ok(PasswordResetRequest {
            email: validate_email(&self.email)?,
        })
    }
}

/// New password form reached from the emailed reset link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordFormData {
    pub token: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl Validate for ResetPasswordFormData {
    type Payload = ResetPasswordRequest;

    fn validate(&self) -> Result<ResetPasswordRequest, FormError> {
        let token = self.token.trim();
        if token.is_empty() {
            return Err(FormError::MissingResetToken);
        }
        let new_password = validate_new_password(&self.new_password)?;
        if new_password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(ResetPasswordRequest {
            token: token.to_string(),
            new_password,
        })
    }
}
