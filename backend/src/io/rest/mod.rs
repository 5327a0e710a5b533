//! # REST API Interface Layer
//!
//! HTTP endpoints of the allowance tracker, mounted under `/v1`. Handlers
//! translate DTOs from the `shared` crate into domain commands, call a
//! service, and wrap the outcome in the `{status, date, data | error}`
//! envelope.

pub mod activity_apis;
pub mod auth_apis;
pub mod auth_middleware;
pub mod historic_apis;
pub mod list_apis;
pub mod mappers;
pub mod member_apis;
pub mod relation_apis;
pub mod response;
pub mod user_apis;

pub use auth_middleware::require_auth;
pub use response::{ApiError, ApiJson, ApiQuery, ApiResult};
