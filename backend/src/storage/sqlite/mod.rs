//! SQLite storage backend built on sqlx.
//!
//! Timestamps are stored as RFC 3339 text in UTC with a fixed precision, so
//! ordering by the text column matches chronological order.

pub mod activity_repository;
pub mod connection;
pub mod list_repository;
pub mod member_repository;
pub mod user_repository;

pub use activity_repository::ActivityRepository;
pub use connection::DbConnection;
pub use list_repository::ListRepository;
pub use member_repository::MemberRepository;
pub use user_repository::UserRepository;

use chrono::{DateTime, SecondsFormat, Utc};

use super::error::{StorageError, StorageResult};

pub(crate) fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> StorageResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StorageError::Corrupt(format!("bad timestamp '{}': {}", raw, e)))
}
