pub mod use_form;
pub mod use_mounted;
pub mod use_store;
