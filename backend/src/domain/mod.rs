//! # Domain Module
//!
//! Business rules of the allowance tracker: the activity catalog, task lists
//! with their scored activities, family members, history reports and user
//! authentication.
//!
//! Services depend only on the storage traits, never on a concrete backend.
//! Lists embed copies of catalog activities, and [`RelationService`] keeps
//! those copies in step with the catalog.

pub mod activity_service;
pub mod aggregation;
pub mod auth_service;
pub mod commands;
pub mod error;
pub mod historic_service;
pub mod list_service;
pub mod member_service;
pub mod models;
pub mod relation_service;
pub mod user_service;

#[cfg(test)]
pub(crate) mod test_utils;

pub use activity_service::ActivityService;
pub use auth_service::AuthService;
pub use error::{DomainError, DomainResult};
pub use historic_service::HistoricService;
pub use list_service::ListService;
pub use member_service::MemberService;
pub use relation_service::RelationService;
pub use user_service::UserService;
