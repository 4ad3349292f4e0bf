use super::{FormError, Validate};
use crate::schedule::WeeklySchedule;
use crate::{CreateNotificationRequest, Notification};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationFormData {
    pub title: String,
    pub message: String,
    pub schedule: WeeklySchedule,
}

impl NotificationFormData {
    pub fn from_notification(notification: &Notification) -> Self {
        Self {
            title: notification.title.clone(),
            message: notification.message.clone(),
            schedule: notification.schedule.clone(),
        }
    }
}

impl Validate for NotificationFormData {
    type Payload = CreateNotificationRequest;

    fn validate(&self) -> Result<CreateNotificationRequest, FormError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(FormError::MissingTitle);
        }
        let message = self.message.trim();
        if message.is_empty() {
            return Err(FormError::MissingMessage);
        }
        if self.schedule.is_empty() {
            return Err(FormError::NoDaysSelected);
        }
        self.schedule.validate()?;

        Ok(CreateNotificationRequest {
            title: title.to_string(),
            message: message.to_string(),
            schedule: self.schedule.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleError, TimeField, Weekday};

    #[test]
    fn test_notification_needs_a_valid_schedule() {
        let mut form = NotificationFormData {
            title: "Standup".to_string(),
            message: "Daily sync".to_string(),
            schedule: WeeklySchedule::new(),
        };
        assert_eq!(form.validate(), Err(FormError::NoDaysSelected));

        form.schedule = form.schedule.set_time(Weekday::Monday, TimeField::Start, "09:30");
        assert_eq!(
            form.validate(),
            Err(FormError::Schedule(ScheduleError::Incomplete(Weekday::Monday)))
        );
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Monday needs both a start and an end time"
        );

        form.schedule = form.schedule.set_time(Weekday::Monday, TimeField::End, "09:45");
        let request = form.validate().unwrap();
        assert!(request.schedule.is_enabled(Weekday::Monday));
    }

    #[test]
    fn test_title_and_message_are_required() {
        let mut form = NotificationFormData::default();
        assert_eq!(form.validate(), Err(FormError::MissingTitle));

        form.title = "Title".to_string();
        assert_eq!(form.validate(), Err(FormError::MissingMessage));
    }
}
