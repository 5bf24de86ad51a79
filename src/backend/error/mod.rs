//! Backend error handling
//!
//! Defines [`BackendError`] and its conversion into HTTP responses.

pub mod conversion;
pub mod types;

pub use conversion::bad_request;
pub use types::BackendError;
