//! Application error type shared by the auth utilities

mod app_error;

pub use app_error::{AppError, AppResult, ErrorResponse};
