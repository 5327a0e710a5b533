use std::sync::Arc;
use tracing::info;

use crate::domain::aggregation::{compute_total_discount, count_failed_activities_per_list, remaining_allowance};
use crate::domain::commands::historic::{ClosedHistory, InProgressHistory};
use crate::domain::error::DomainResult;
use crate::domain::models::ListStatus;
use crate::storage::{ListStorage, MemberStorage};

/// Per-member reports over closed and running lists
#[derive(Clone)]
pub struct HistoricService {
    lists: Arc<dyn ListStorage>,
    members: Arc<dyn MemberStorage>,
}

impl HistoricService {
    pub fn new(lists: Arc<dyn ListStorage>, members: Arc<dyn MemberStorage>) -> Self {
        Self { lists, members }
    }

    pub async fn closed(&self, member_name: &str) -> DomainResult<ClosedHistory> {
        info!("Building closed history for {}", member_name);
        let lists = self
            .lists
            .find_lists_by_member(member_name, Some(ListStatus::Closed))
            .await?;
        let total_failed_activities = count_failed_activities_per_list(&lists);
        Ok(ClosedHistory {
            lists,
            total_failed_activities,
        })
    }

    pub async fn in_progress(&self, member_name: &str) -> DomainResult<InProgressHistory> {
        info!("Building in-progress history for {}", member_name);
        let lists = self
            .lists
            .find_lists_by_member(member_name, Some(ListStatus::InProgress))
            .await?;
        let total_discount = compute_total_discount(&lists);
        let allowance_value = self
            .members
            .find_member_by_name(member_name)
            .await?
            .map(|member| member.allowance_value);

        Ok(InProgressHistory {
            lists,
            total_discount,
            allowance_value,
            remaining_allowance: allowance_value.map(|allowance| remaining_allowance(allowance, total_discount)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::relations::AttachActivityCommand;
    use crate::domain::test_utils::TestStores;

    #[tokio::test]
    async fn test_closed_history_counts_failures_per_list() {
        let stores = TestStores::new().await;
        let service = HistoricService::new(stores.lists.clone(), stores.members.clone());
        let dishes = stores.activity("Dishes").await;
        let first = stores.closed_list_with("Maria", &dishes, -1.0).await;
        let second = stores.closed_list_with("Maria", &dishes, 3.0).await;
        stores.closed_list_with("Pedro", &dishes, -1.0).await;
        stores.list("Maria", ListStatus::Open).await;

        let history = service.closed("Maria").await.unwrap();
        let ids: Vec<_> = history.lists.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, vec![first.id, second.id]);
        assert_eq!(history.total_failed_activities, vec![1, 0]);
    }

    #[tokio::test]
    async fn test_in_progress_history() {
        let stores = TestStores::new().await;
        let service = HistoricService::new(stores.lists.clone(), stores.members.clone());
        let relations = stores.relation_service();
        stores.member("Maria", 50.0).await;
        let dishes = stores.activity("Dishes").await;
        let bed = stores.activity("Make the bed").await;
        let homework = stores.activity("Homework").await;
        let list = stores.list("Maria", ListStatus::InProgress).await;
        for (activity, value) in [(&dishes, -10.0), (&bed, 5.0), (&homework, -3.0)] {
            relations
                .attach_activity_to_list(AttachActivityCommand {
                    list_id: list.id.clone(),
                    activity_id: activity.id.clone(),
                    value,
                })
                .await
                .unwrap();
        }

        let history = service.in_progress("Maria").await.unwrap();
        assert_eq!(history.lists.len(), 1);
        assert_eq!(history.total_discount, -13.0);
        assert_eq!(history.allowance_value, Some(50.0));
        assert_eq!(history.remaining_allowance, Some(37.0));
    }

    #[tokio::test]
    async fn test_in_progress_history_for_unknown_member() {
        let stores = TestStores::new().await;
        let service = HistoricService::new(stores.lists.clone(), stores.members.clone());

        let history = service.in_progress("Nobody").await.unwrap();
        assert!(history.lists.is_empty());
        assert_eq!(history.total_discount, 0.0);
        assert_eq!(history.allowance_value, None);
        assert_eq!(history.remaining_allowance, None);
    }
}
