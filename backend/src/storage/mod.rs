//! # Storage Module
//!
//! Persistence for the allowance tracker. The domain layer only sees the
//! traits in [`traits`]; [`sqlite`] provides the SQLite implementation.

pub mod error;
pub mod sqlite;
pub mod traits;

pub use error::{StorageError, StorageResult};
pub use sqlite::{ActivityRepository, DbConnection, ListRepository, MemberRepository, UserRepository};
pub use traits::{ActivityStorage, ListStorage, MemberStorage, UserStorage};
