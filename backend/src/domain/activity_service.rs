use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::commands::activities::{
    CreateActivityCommand, DeleteActivityResult, UpdateActivityCommand, UpdateActivityResult,
};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{Activity, ActivityValidationError, Page, Paged};
use crate::domain::relation_service::RelationService;
use crate::storage::ActivityStorage;

/// Service for the activity catalog
#[derive(Clone)]
pub struct ActivityService {
    activities: Arc<dyn ActivityStorage>,
    relations: RelationService,
}

impl ActivityService {
    pub fn new(activities: Arc<dyn ActivityStorage>, relations: RelationService) -> Self {
        Self { activities, relations }
    }

    /// Create a new catalog activity
    pub async fn insert(&self, command: CreateActivityCommand) -> DomainResult<Activity> {
        info!("Creating activity: {}", command.description);

        Activity::validate_description(&command.description)?;
        let description = command.description.trim();
        if self.activities.find_activity_by_description(description).await?.is_some() {
            return Err(ActivityValidationError::DuplicateDescription.into());
        }

        let activity = Activity::new(description, Utc::now());
        let saved = self.activities.save_activity(&activity).await?;
        info!("Created activity {} with ID {}", saved.description, saved.id);
        Ok(saved)
    }

    /// Change an activity's description and push it into open lists.
    pub async fn update(&self, command: UpdateActivityCommand) -> DomainResult<UpdateActivityResult> {
        info!("Updating activity {}: {}", command.id, command.description);

        let mut activity = self
            .activities
            .get_activity(&command.id)
            .await?
            .ok_or_else(|| DomainError::not_found("Activity", &command.id))?;

        Activity::validate_description(&command.description)?;
        let description = command.description.trim();
        if let Some(existing) = self.activities.find_activity_by_description(description).await? {
            if existing.id != activity.id {
                return Err(ActivityValidationError::DuplicateDescription.into());
            }
        }

        activity.description = description.to_string();
        activity.updated_at = Utc::now();

        let cascade = self.relations.refresh_activity_in_lists(&activity).await?;
        if !cascade.is_complete() {
            warn!(
                "Activity {} refreshed with {} list failures",
                activity.id,
                cascade.failed.len()
            );
        }

        let activity = match self.activities.save_activity(&activity).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!(
                    "Activity {} not saved after refreshing {} lists; they now show '{}': {}",
                    activity.id,
                    cascade.updated.len(),
                    activity.description,
                    e
                );
                return Err(e.into());
            }
        };
        Ok(UpdateActivityResult { activity, cascade })
    }

    /// Remove an activity from the catalog after stripping it out of open lists.
    pub async fn delete(&self, activity_id: &str) -> DomainResult<DeleteActivityResult> {
        info!("Deleting activity {}", activity_id);

        if self.activities.get_activity(activity_id).await?.is_none() {
            return Err(DomainError::not_found("Activity", activity_id));
        }

        let cascade = self.relations.remove_activity_from_all_lists(activity_id).await?;
        if !self.activities.delete_activity(activity_id).await? {
            return Err(DomainError::not_found("Activity", activity_id));
        }

        Ok(DeleteActivityResult {
            activity_id: activity_id.to_string(),
            cascade,
        })
    }

    pub async fn get(&self, activity_id: &str) -> DomainResult<Option<Activity>> {
        Ok(self.activities.get_activity(activity_id).await?)
    }

    pub async fn find_by_description(&self, description: &str) -> DomainResult<Option<Activity>> {
        Ok(self.activities.find_activity_by_description(description.trim()).await?)
    }

    pub async fn list(&self, page: Page) -> DomainResult<Paged<Activity>> {
        let activities = self.activities.list_activities(page).await?;
        info!("Found {} activities", activities.count);
        Ok(activities)
    }
}
