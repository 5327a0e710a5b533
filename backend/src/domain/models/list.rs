use chrono::{DateTime, Utc};

use super::activity::ActivityInstance;

pub use shared::ListStatus;

/// A family member's scored list of activities.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskList {
    pub id: String,
    pub family_member_name: String,
    pub status: ListStatus,
    pub activities: Vec<ActivityInstance>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskList {
    pub fn new(family_member_name: &str, status: ListStatus, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            family_member_name: family_member_name.trim().to_string(),
            status,
            activities: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.status.is_closed()
    }

    pub fn references_activity(&self, activity_id: &str) -> bool {
        self.activities.iter().any(|a| a.activity_id == activity_id)
    }

    /// Drop every entry for `activity_id`. Returns how many were removed.
    pub fn remove_activity(&mut self, activity_id: &str) -> usize {
        let before = self.activities.len();
        self.activities.retain(|a| a.activity_id != activity_id);
        before - self.activities.len()
    }

    /// Rewrite the description snapshot of every entry for `activity_id`.
    /// Scores are kept.
    pub fn refresh_activity_description(&mut self, activity_id: &str, description: &str) -> usize {
        let mut refreshed = 0;
        for instance in self.activities.iter_mut().filter(|a| a.activity_id == activity_id) {
            instance.description = description.to_string();
            refreshed += 1;
        }
        refreshed
    }

    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
