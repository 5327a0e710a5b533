//! Shared fixtures for domain service tests.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::domain::models::{Activity, ListStatus, Member, TaskList};
use crate::domain::relation_service::RelationService;
use crate::storage::{
    ActivityRepository, ActivityStorage, DbConnection, ListRepository, ListStorage, MemberRepository,
    MemberStorage, UserRepository, UserStorage,
};

/// Every repository over one fresh in-memory database
pub struct TestStores {
    pub activities: Arc<dyn ActivityStorage>,
    pub lists: Arc<dyn ListStorage>,
    pub members: Arc<dyn MemberStorage>,
    pub users: Arc<dyn UserStorage>,
}

impl TestStores {
    pub async fn new() -> Self {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        Self {
            activities: Arc::new(ActivityRepository::new(db.clone())),
            lists: Arc::new(ListRepository::new(db.clone())),
            members: Arc::new(MemberRepository::new(db.clone())),
            users: Arc::new(UserRepository::new(db)),
        }
    }

    pub fn relation_service(&self) -> RelationService {
        RelationService::new(self.lists.clone(), self.activities.clone())
    }

    pub async fn activity(&self, description: &str) -> Activity {
        let activity = Activity::new(description, Utc::now());
        self.activities.save_activity(&activity).await.expect("Failed to save activity")
    }

    pub async fn list(&self, member: &str, status: ListStatus) -> TaskList {
        let list = TaskList::new(member, status, Utc::now());
        self.lists.save_list(&list).await.expect("Failed to save list")
    }

    /// A closed list that already holds one scored entry
    pub async fn closed_list_with(&self, member: &str, activity: &Activity, value: f64) -> TaskList {
        let mut list = TaskList::new(member, ListStatus::Closed, Utc::now());
        list.activities.push(activity.instantiate(value));
        self.lists.save_list(&list).await.expect("Failed to save list")
    }

    pub async fn member(&self, name: &str, allowance_value: f64) -> Member {
        let now = Utc::now();
        let member = Member {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            birth_date: NaiveDate::from_ymd_opt(2015, 1, 1).expect("valid date"),
            allowance_value,
            created_at: now,
            updated_at: now,
        };
        self.members.save_member(&member).await.expect("Failed to save member")
    }
}
