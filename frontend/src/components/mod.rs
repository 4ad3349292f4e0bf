pub mod admin_list;
pub mod form_message;
pub mod header;
pub mod login_form;
pub mod notification_form;
pub mod notification_list;
pub mod password_reset;
pub mod plan_form;
pub mod plan_list;
pub mod register_form;
pub mod schedule_editor;
