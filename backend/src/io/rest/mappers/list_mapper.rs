use crate::domain::commands::historic::{ClosedHistory, InProgressHistory};
use crate::domain::commands::lists::{CreateListCommand, ListDetails, UpdateListStatusCommand};
use crate::domain::commands::relations::{AttachActivityCommand, DetachActivityCommand};
use crate::domain::models::{ActivityInstance as DomainInstance, TaskList as DomainList};
use shared::{
    ActivityInstance as SharedInstance, AttachActivityRequest, ClosedHistoryResponse, CreateListRequest,
    DetachActivityRequest, InProgressHistoryResponse, TaskList as SharedList, TaskListDetails,
    UpdateListStatusRequest,
};

/// Mapper for lists, their activity entries, and the reports built on them.
pub struct ListMapper;

impl ListMapper {
    pub fn to_dto(domain: DomainList) -> SharedList {
        SharedList {
            id: domain.id,
            family_member_name: domain.family_member_name,
            status: domain.status,
            activities: domain.activities.into_iter().map(Self::to_instance_dto).collect(),
            created_at: domain.created_at.to_rfc3339(),
            updated_at: domain.updated_at.to_rfc3339(),
        }
    }

    pub fn to_instance_dto(domain: DomainInstance) -> SharedInstance {
        SharedInstance {
            activity_id: domain.activity_id,
            description: domain.description,
            value: domain.value,
        }
    }

    pub fn to_details_dto(details: ListDetails) -> TaskListDetails {
        TaskListDetails {
            list: Self::to_dto(details.list),
            discount: details.discount,
            failed_activities: details.failed_activities,
        }
    }

    pub fn to_closed_history_dto(history: ClosedHistory) -> ClosedHistoryResponse {
        ClosedHistoryResponse {
            lists: history.lists.into_iter().map(Self::to_dto).collect(),
            total_failed_activities: history.total_failed_activities,
        }
    }

    pub fn to_in_progress_history_dto(history: InProgressHistory) -> InProgressHistoryResponse {
        InProgressHistoryResponse {
            lists: history.lists.into_iter().map(Self::to_dto).collect(),
            total_discount: history.total_discount,
            allowance_value: history.allowance_value,
            remaining_allowance: history.remaining_allowance,
        }
    }

    pub fn to_create_command(dto: CreateListRequest) -> CreateListCommand {
        CreateListCommand {
            family_member_name: dto.family_member_name,
            status: dto.status,
        }
    }

    pub fn to_update_status_command(dto: UpdateListStatusRequest) -> UpdateListStatusCommand {
        UpdateListStatusCommand {
            id: dto.id,
            status: dto.status,
        }
    }

    pub fn to_attach_command(dto: AttachActivityRequest) -> AttachActivityCommand {
        AttachActivityCommand {
            list_id: dto.id,
            activity_id: dto.activity_id,
            value: dto.value,
        }
    }

    pub fn to_detach_command(list_id: String, dto: DetachActivityRequest) -> DetachActivityCommand {
        DetachActivityCommand {
            list_id,
            activity_id: dto.activity_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ListStatus;
    use chrono::Utc;

    #[test]
    fn test_details_flatten_into_list_json() {
        let mut list = DomainList::new("Maria", ListStatus::InProgress, Utc::now());
        list.activities.push(DomainInstance {
            activity_id: "a1".into(),
            description: "Dishes".into(),
            value: -2.0,
        });

        let dto = ListMapper::to_details_dto(ListDetails {
            list,
            discount: -2.0,
            failed_activities: 1,
        });
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["familyMemberName"], "Maria");
        assert_eq!(json["status"], "Em andamento");
        assert_eq!(json["activities"][0]["activityId"], "a1");
        assert_eq!(json["discount"], -2.0);
        assert_eq!(json["failedActivities"], 1);
    }
}
