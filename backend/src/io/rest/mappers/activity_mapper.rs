use crate::domain::commands::activities::{CreateActivityCommand, DeleteActivityResult, UpdateActivityCommand};
use crate::domain::commands::relations::CascadeReport;
use crate::domain::models::Activity as DomainActivity;
use shared::{
    Activity as SharedActivity, CascadeFailure, CascadeResponse, CreateActivityRequest, DeleteActivityResponse,
    UpdateActivityRequest,
};

/// Mapper between activity DTOs and the domain catalog types.
pub struct ActivityMapper;

impl ActivityMapper {
    pub fn to_dto(domain: DomainActivity) -> SharedActivity {
        SharedActivity {
            id: domain.id,
            description: domain.description,
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_create_command(dto: CreateActivityRequest) -> CreateActivityCommand {
        CreateActivityCommand {
            description: dto.description,
        }
    }

    pub fn to_update_command(dto: UpdateActivityRequest) -> UpdateActivityCommand {
        UpdateActivityCommand {
            id: dto.id,
            description: dto.description,
        }
    }

    pub fn to_cascade_dto(report: CascadeReport) -> CascadeResponse {
        CascadeResponse {
            activity_id: report.activity_id,
            updated_lists: report.updated,
            failed_lists: report
                .failed
                .into_iter()
                .map(|(list_id, reason)| CascadeFailure { list_id, reason })
                .collect(),
        }
    }

    pub fn to_delete_dto(result: DeleteActivityResult) -> DeleteActivityResponse {
        DeleteActivityResponse {
            id: result.activity_id,
            cascade: Self::to_cascade_dto(result.cascade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_cascade_report_to_dto() {
        let report = CascadeReport {
            activity_id: "a1".into(),
            updated: vec!["l1".into(), "l3".into()],
            failed: vec![("l2".into(), "database is locked".into())],
        };

        let dto = ActivityMapper::to_cascade_dto(report);
        assert_eq!(dto.updated_lists, vec!["l1", "l3"]);
        assert_eq!(
            dto.failed_lists,
            vec![CascadeFailure {
                list_id: "l2".into(),
                reason: "database is locked".into()
            }]
        );
    }

    #[test]
    fn test_activity_to_dto_keeps_fields() {
        let activity = DomainActivity::new("Dishes", Utc::now());
        let dto = ActivityMapper::to_dto(activity.clone());
        assert_eq!(dto.id, activity.id);
        assert_eq!(dto.description, "Dishes");
        assert_eq!(dto.created_at, activity.created_at.to_rfc3339());
    }
}
