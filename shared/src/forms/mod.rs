//! Client-side form state machines.
//!
//! Every form goes editing -> validating -> submitting and back. Validation
//! happens inside [`FormState::begin_submit`] and only the first failing rule
//! is reported.

use thiserror::Error;

use crate::error::ApiError;
use crate::schedule::ScheduleError;

pub mod admin;
pub mod auth;
pub mod notification;
pub mod plan;

pub use admin::AdminFormData;
pub use auth::{ForgotPasswordFormData, LoginFormData, RegisterFormData, ResetPasswordFormData};
pub use notification::NotificationFormData;
pub use plan::{PlanDetail, PlanFormData, MIN_PLAN_DETAILS};

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Plan name is required")]
    MissingPlanName,
    #[error("Monthly price must be a valid number")]
    InvalidMonthlyPrice,
    #[error("Yearly price must be a valid number")]
    InvalidYearlyPrice,
    #[error("At least {required} features are required")]
    TooFewDetails { required: usize },
    #[error("Name is required")]
    MissingName,
    #[error("Email is required")]
    MissingEmail,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password is required")]
    MissingPassword,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Reset token is missing or expired")]
    MissingResetToken,
    #[error("Title is required")]
    MissingTitle,
    #[error("Message is required")]
    MissingMessage,
    #[error("Select at least one day")]
    NoDaysSelected,
    #[error(transparent)]
    Schedule(#[from] ScheduleError),
    #[error("A submission is already in progress")]
    Busy,
}

/// Turns raw form fields into a typed request payload
pub trait Validate {
    type Payload;

    fn validate(&self) -> Result<Self::Payload, FormError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
}

/// Field data plus the lifecycle around submitting it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState<D> {
    pub data: D,
    phase: FormPhase,
    error: Option<String>,
    success: Option<String>,
    /// Bumped on every success so a timer can tell which banner it owns
    success_id: u64,
}

impl<D: Validate + Default> FormState<D> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            phase: FormPhase::Editing,
            error: None,
            success: None,
            success_id: 0,
        }
    }

    /// Start over with `data`, keeping the banner counter so pending
    /// dismissals from before the reset stay inert
    pub fn replace(&mut self, data: D) {
        let success_id = self.success_id;
        *self = Self::new(data);
        self.success_id = success_id;
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_deref()
    }

    /// Apply a user edit. Inputs are inert while submitting, so edits are
    /// dropped in that phase.
    pub fn edit(&mut self, update: impl FnOnce(&mut D)) {
        if self.is_submitting() {
            return;
        }
        update(&mut self.data);
        self.error = None;
        self.success = None;
    }

    /// Validate and, if valid, enter `Submitting` and hand back the payload.
    /// An invalid form stays in `Editing` with the first failing message.
    pub fn begin_submit(&mut self) -> Result<D::Payload, FormError> {
        if self.is_submitting() {
            return Err(FormError::Busy);
        }
        self.success = None;
        match self.data.validate() {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                self.error = None;
                Ok(payload)
            }
            Err(error) => {
                self.error = Some(error.to_string());
                Err(error)
            }
        }
    }

    /// Submission succeeded: clear the fields. Returns the id of the new
    /// banner for [`FormState::dismiss_success`].
    pub fn succeed(&mut self, message: Option<String>) -> u64 {
        self.data = D::default();
        self.phase = FormPhase::Editing;
        self.error = None;
        self.success = message;
        self.success_id += 1;
        self.success_id
    }

    /// Hide the banner shown by the success with `id`. A newer banner is left alone.
    pub fn dismiss_success(&mut self, id: u64) -> bool {
        if id != self.success_id || self.success.is_none() {
            return false;
        }
        self.success = None;
        true
    }

    /// Submission failed: keep the fields and show the error
    pub fn fail(&mut self, error: &ApiError) {
        self.phase = FormPhase::Editing;
        self.error = Some(error.message().to_string());
    }
}

pub(crate) fn validate_email(email: &str) -> Result<String, FormError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(FormError::MissingEmail);
    }
    match email.split_once('@') {
        Some((local, domain))
            if !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.') =>
        {
            Ok(email.to_string())
        }
        _ => Err(FormError::InvalidEmail),
    }
}

pub(crate) fn validate_new_password(password: &str) -> Result<String, FormError> {
    if password.is_empty() {
        return Err(FormError::MissingPassword);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort { min: MIN_PASSWORD_LEN });
    }
    Ok(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_rules() {
        assert_eq!(validate_email("  admin@example.com "), Ok("admin@example.com".to_string()));
        assert_eq!(validate_email("   "), Err(FormError::MissingEmail));
        for bad in ["admin", "@example.com", "admin@localhost", "admin@.com", "admin@example."] {
            assert_eq!(validate_email(bad), Err(FormError::InvalidEmail), "{}", bad);
        }
    }

    #[test]
    fn test_new_password_rules() {
        assert_eq!(validate_new_password(""), Err(FormError::MissingPassword));
        assert_eq!(
            validate_new_password("abc"),
            Err(FormError::PasswordTooShort { min: MIN_PASSWORD_LEN })
        );
        assert!(validate_new_password("abcdef").is_ok());
    }

    #[test]
    fn test_success_message_survives_until_dismissed() {
        let mut form = FormState::new(LoginFormData {
            email: "admin@example.com".to_string(),
            password: "secret".to_string(),
        });
        form.begin_submit().unwrap();
        let id = form.succeed(Some("Welcome back".to_string()));
        assert_eq!(form.success(), Some("Welcome back"));
        assert_eq!(form.data, LoginFormData::default());

        assert!(form.dismiss_success(id));
        assert_eq!(form.success(), None);
        assert_eq!(form.phase(), FormPhase::Editing);
    }

    fn submitted(form: &mut FormState<LoginFormData>) {
        form.edit(|data| {
            data.email = "admin@example.com".to_string();
            data.password = "secret".to_string();
        });
        form.begin_submit().unwrap();
    }

    #[test]
    fn test_older_dismissal_leaves_newer_banner() {
        let mut form = FormState::new(LoginFormData::default());
        submitted(&mut form);
        let first = form.succeed(Some("Saved".to_string()));

        submitted(&mut form);
        let second = form.succeed(Some("Saved again".to_string()));

        // the first banner's timer fires while the second is showing
        assert!(!form.dismiss_success(first));
        assert_eq!(form.success(), Some("Saved again"));

        assert!(form.dismiss_success(second));
        assert_eq!(form.success(), None);
    }

    #[test]
    fn test_replace_keeps_pending_dismissals_inert() {
        let mut form = FormState::new(LoginFormData::default());
        submitted(&mut form);
        let stale = form.succeed(Some("Saved".to_string()));

        form.replace(LoginFormData::default());
        assert_eq!(form.success(), None);
        submitted(&mut form);
        form.succeed(Some("Saved again".to_string()));

        assert!(!form.dismiss_success(stale));
        assert_eq!(form.success(), Some("Saved again"));
    }
}
