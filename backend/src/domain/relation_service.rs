//! Relationship maintenance between the activity catalog and task lists.
//!
//! Lists hold copies of activities, so every catalog change has to be pushed
//! into the lists that reference the activity. Closed lists are history and
//! are never touched by these cascades.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::relations::{AttachActivityCommand, CascadeReport, DetachActivityCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{round_cents, Activity, ActivityValidationError, TaskList};
use crate::storage::{ActivityStorage, ListStorage};

#[derive(Clone)]
pub struct RelationService {
    lists: Arc<dyn ListStorage>,
    activities: Arc<dyn ActivityStorage>,
}

impl RelationService {
    pub fn new(lists: Arc<dyn ListStorage>, activities: Arc<dyn ActivityStorage>) -> Self {
        Self { lists, activities }
    }

    /// Non-closed lists containing at least one entry for the activity.
    pub async fn find_lists_referencing_activity(&self, activity_id: &str) -> DomainResult<Vec<TaskList>> {
        let lists = self.lists.find_lists_with_activity(activity_id).await?;
        Ok(lists.into_iter().filter(|list| !list.is_closed()).collect())
    }

    /// Strip the activity out of each given list and persist it.
    ///
    /// Best effort: a list that fails to save is recorded in the report and
    /// the remaining lists are still processed.
    pub async fn remove_activity_from_lists(&self, lists: Vec<TaskList>, activity_id: &str) -> CascadeReport {
        let mut report = CascadeReport::new(activity_id);
        let now = Utc::now();

        for mut list in lists {
            if list.remove_activity(activity_id) == 0 {
                continue;
            }
            list.touch(now);
            match self.lists.save_list(&list).await {
                Ok(_) => report.updated.push(list.id),
                Err(e) => {
                    warn!("Failed to remove activity {} from list {}: {}", activity_id, list.id, e);
                    report.failed.push((list.id, e.to_string()));
                }
            }
        }

        info!(
            "Removed activity {} from {} lists ({} failed)",
            activity_id,
            report.updated.len(),
            report.failed.len()
        );
        report
    }

    /// Push the activity's current description into every non-closed list
    /// that references it. Same best-effort semantics as removal.
    pub async fn refresh_activity_in_lists(&self, activity: &Activity) -> DomainResult<CascadeReport> {
        let lists = self.find_lists_referencing_activity(&activity.id).await?;
        let mut report = CascadeReport::new(&activity.id);
        let now = Utc::now();

        for mut list in lists {
            if list.refresh_activity_description(&activity.id, &activity.description) == 0 {
                continue;
            }
            list.touch(now);
            match self.lists.save_list(&list).await {
                Ok(_) => report.updated.push(list.id),
                Err(e) => {
                    warn!("Failed to refresh activity {} in list {}: {}", activity.id, list.id, e);
                    report.failed.push((list.id, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Find and remove in one step. The activity does not need to exist in
    /// the catalog any more, so dangling entries can be cleaned up.
    pub async fn remove_activity_from_all_lists(&self, activity_id: &str) -> DomainResult<CascadeReport> {
        let lists = self.find_lists_referencing_activity(activity_id).await?;
        Ok(self.remove_activity_from_lists(lists, activity_id).await)
    }

    /// Append a scored copy of a catalog activity to a list.
    pub async fn attach_activity_to_list(&self, command: AttachActivityCommand) -> DomainResult<TaskList> {
        info!("Attaching activity {} to list {}", command.activity_id, command.list_id);

        let mut list = self
            .lists
            .get_list(&command.list_id)
            .await?
            .ok_or_else(|| DomainError::not_found("List", &command.list_id))?;
        let activity = self
            .activities
            .get_activity(&command.activity_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Activity", &command.activity_id))?;

        if list.is_closed() {
            return Err(DomainError::Validation(format!(
                "List {} is closed and cannot be changed",
                list.id
            )));
        }
        if !command.value.is_finite() {
            return Err(ActivityValidationError::InvalidValue.into());
        }
        if list.references_activity(&activity.id) {
            return Err(ActivityValidationError::AlreadyInList.into());
        }

        list.activities.push(activity.instantiate(round_cents(command.value)));
        list.touch(Utc::now());
        Ok(self.lists.save_list(&list).await?)
    }

    /// Remove every entry for an activity from a single list, whatever its status.
    pub async fn detach_activity_from_list(&self, command: DetachActivityCommand) -> DomainResult<TaskList> {
        info!("Detaching activity {} from list {}", command.activity_id, command.list_id);

        let mut list = self
            .lists
            .get_list(&command.list_id)
            .await?
            .ok_or_else(|| DomainError::not_found("List", &command.list_id))?;

        if list.remove_activity(&command.activity_id) > 0 {
            list.touch(Utc::now());
            list = self.lists.save_list(&list).await?;
        }
        Ok(list)
    }
}
