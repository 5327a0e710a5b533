//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.
//!
//! Every trait follows the same small contract: point lookup returning
//! `Option`, finders returning ordered `Vec`s, `save` as an upsert by ID,
//! and `delete` reporting whether a row was actually removed.

use async_trait::async_trait;

use super::error::StorageResult;
use crate::domain::models::{Activity, ListStatus, Member, Page, Paged, TaskList, User};

/// Trait defining the interface for activity catalog storage operations
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Retrieve a specific activity by ID
    async fn get_activity(&self, activity_id: &str) -> StorageResult<Option<Activity>>;

    /// Find the activity with an exact description
    async fn find_activity_by_description(&self, description: &str) -> StorageResult<Option<Activity>>;

    /// List activities ordered by creation time
    async fn list_activities(&self, page: Page) -> StorageResult<Paged<Activity>>;

    /// Insert or replace an activity
    async fn save_activity(&self, activity: &Activity) -> StorageResult<Activity>;

    /// Returns true if the activity was found and deleted
    async fn delete_activity(&self, activity_id: &str) -> StorageResult<bool>;
}

/// Trait defining the interface for task list storage operations
#[async_trait]
pub trait ListStorage: Send + Sync {
    /// Retrieve a specific list by ID
    async fn get_list(&self, list_id: &str) -> StorageResult<Option<TaskList>>;

    /// List all lists ordered by creation time
    async fn list_lists(&self, page: Page) -> StorageResult<Paged<TaskList>>;

    /// Lists of a member, optionally restricted to one status
    async fn find_lists_by_member(
        &self,
        family_member_name: &str,
        status: Option<ListStatus>,
    ) -> StorageResult<Vec<TaskList>>;

    /// Every list, of any status, with at least one entry for the activity
    async fn find_lists_with_activity(&self, activity_id: &str) -> StorageResult<Vec<TaskList>>;

    /// Insert or replace a list, embedded activities included
    async fn save_list(&self, list: &TaskList) -> StorageResult<TaskList>;

    /// Returns true if the list was found and deleted
    async fn delete_list(&self, list_id: &str) -> StorageResult<bool>;
}

/// Trait defining the interface for family member storage operations
#[async_trait]
pub trait MemberStorage: Send + Sync {
    async fn get_member(&self, member_id: &str) -> StorageResult<Option<Member>>;

    async fn find_member_by_name(&self, name: &str) -> StorageResult<Option<Member>>;

    /// List members ordered by name
    async fn list_members(&self, page: Page) -> StorageResult<Paged<Member>>;

    async fn save_member(&self, member: &Member) -> StorageResult<Member>;

    async fn delete_member(&self, member_id: &str) -> StorageResult<bool>;
}

/// Trait defining the interface for user account storage operations
#[async_trait]
pub trait UserStorage: Send + Sync {
    async fn get_user(&self, user_id: &str) -> StorageResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;

    async fn save_user(&self, user: &User) -> StorageResult<User>;

    async fn delete_user(&self, user_id: &str) -> StorageResult<bool>;
}
