pub mod api;
pub mod context;
pub mod logging;
pub mod token_storage;
