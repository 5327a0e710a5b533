use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reusable task definition from the activity catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Activity {
    pub const MIN_DESCRIPTION_LEN: usize = 5;

    pub fn new(description: &str, now: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            description: description.trim().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Snapshot this activity into a list entry with the given score.
    pub fn instantiate(&self, value: f64) -> ActivityInstance {
        ActivityInstance {
            activity_id: self.id.clone(),
            description: self.description.clone(),
            value,
        }
    }

    pub fn validate_description(description: &str) -> Result<(), ActivityValidationError> {
        if description.trim().chars().count() < Self::MIN_DESCRIPTION_LEN {
            return Err(ActivityValidationError::DescriptionTooShort);
        }
        Ok(())
    }
}

/// Scored occurrence of an activity, embedded in a list.
///
/// The description is a copy taken when the activity was attached. Catalog
/// edits only reach it through the relation service's refresh cascade, and
/// closed lists never see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityInstance {
    pub activity_id: String,
    pub description: String,
    pub value: f64,
}

impl ActivityInstance {
    /// Penalized entries count as failed.
    pub fn is_failed(&self) -> bool {
        self.value < 0.0
    }
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ActivityValidationError {
    #[error("Description must have at least 5 characters")]
    DescriptionTooShort,
    #[error("An activity with this description already exists")]
    DuplicateDescription,
    #[error("Activity is already part of this list")]
    AlreadyInList,
    #[error("Activity value must be a finite number")]
    InvalidValue,
}
