//! Domain-level command and result types.
//!
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the DTOs from the
//! `shared` crate onto them.

pub mod activities {
    use super::relations::CascadeReport;
    use crate::domain::models::Activity;

    #[derive(Debug, Clone)]
    pub struct CreateActivityCommand {
        pub description: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateActivityCommand {
        pub id: String,
        pub description: String,
    }

    /// Result of updating an activity, with the description refresh report.
    #[derive(Debug, Clone)]
    pub struct UpdateActivityResult {
        pub activity: Activity,
        pub cascade: CascadeReport,
    }

    /// Result of deleting an activity, with the list cleanup report.
    #[derive(Debug, Clone)]
    pub struct DeleteActivityResult {
        pub activity_id: String,
        pub cascade: CascadeReport,
    }
}

pub mod relations {
    #[derive(Debug, Clone)]
    pub struct AttachActivityCommand {
        pub list_id: String,
        pub activity_id: String,
        pub value: f64,
    }

    #[derive(Debug, Clone)]
    pub struct DetachActivityCommand {
        pub list_id: String,
        pub activity_id: String,
    }

    /// Outcome of a batch operation over every list referencing an activity.
    ///
    /// Lists that failed to persist are reported, never retried.
    #[derive(Debug, Clone, Default, PartialEq)]
    pub struct CascadeReport {
        pub activity_id: String,
        pub updated: Vec<String>,
        /// `(list_id, reason)` pairs
        pub failed: Vec<(String, String)>,
    }

    impl CascadeReport {
        pub fn new(activity_id: &str) -> Self {
            Self {
                activity_id: activity_id.to_string(),
                ..Default::default()
            }
        }

        pub fn is_complete(&self) -> bool {
            self.failed.is_empty()
        }
    }
}

pub mod lists {
    use crate::domain::models::TaskList;

    #[derive(Debug, Clone)]
    pub struct CreateListCommand {
        pub family_member_name: String,
        pub status: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateListStatusCommand {
        pub id: String,
        pub status: String,
    }

    /// A list together with its aggregates.
    #[derive(Debug, Clone)]
    pub struct ListDetails {
        pub list: TaskList,
        pub discount: f64,
        pub failed_activities: usize,
    }
}

pub mod members {
    #[derive(Debug, Clone)]
    pub struct CreateMemberCommand {
        pub name: String,
        /// DD/MM/YYYY
        pub birth_date: String,
        pub allowance_value: f64,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateMemberCommand {
        pub id: String,
        pub name: String,
        pub birth_date: String,
        pub allowance_value: f64,
    }
}

pub mod users {
    #[derive(Debug, Clone)]
    pub struct RegisterUserCommand {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateUserCommand {
        pub user_id: String,
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub email: String,
        pub password: String,
    }
}

pub mod historic {
    use crate::domain::models::TaskList;

    #[derive(Debug, Clone)]
    pub struct ClosedHistory {
        pub lists: Vec<TaskList>,
        /// Failure count per list, positionally aligned with `lists`
        pub total_failed_activities: Vec<usize>,
    }

    #[derive(Debug, Clone)]
    pub struct InProgressHistory {
        pub lists: Vec<TaskList>,
        pub total_discount: f64,
        /// None when no member has this name
        pub allowance_value: Option<f64>,
        pub remaining_allowance: Option<f64>,
    }
}
