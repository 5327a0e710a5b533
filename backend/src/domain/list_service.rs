use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use crate::domain::aggregation::{compute_discount, count_failed_activities};
use crate::domain::commands::lists::{CreateListCommand, ListDetails, UpdateListStatusCommand};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::{ListStatus, Page, Paged, TaskList};
use crate::storage::{ListStorage, MemberStorage, StorageError};

/// Service for creating task lists and moving them through their statuses
#[derive(Clone)]
pub struct ListService {
    lists: Arc<dyn ListStorage>,
    members: Arc<dyn MemberStorage>,
}

impl ListService {
    pub fn new(lists: Arc<dyn ListStorage>, members: Arc<dyn MemberStorage>) -> Self {
        Self { lists, members }
    }

    pub async fn create(&self, command: CreateListCommand) -> DomainResult<TaskList> {
        info!("Creating list for {} with status {}", command.family_member_name, command.status);

        let status = parse_status(&command.status)?;
        let member_name = command.family_member_name.trim();
        if self.members.find_member_by_name(member_name).await?.is_none() {
            return Err(DomainError::Validation(format!("No member named {}", member_name)));
        }

        if status == ListStatus::InProgress {
            self.ensure_no_other_in_progress(member_name, None).await?;
        }

        let list = TaskList::new(member_name, status, Utc::now());
        let saved = self.lists.save_list(&list).await.map_err(in_progress_conflict)?;
        info!("Created list {} for {}", saved.id, saved.family_member_name);
        Ok(saved)
    }

    pub async fn get(&self, list_id: &str) -> DomainResult<Option<TaskList>> {
        Ok(self.lists.get_list(list_id).await?)
    }

    /// A list with its discount and failure count.
    pub async fn get_details(&self, list_id: &str) -> DomainResult<ListDetails> {
        let list = self
            .lists
            .get_list(list_id)
            .await?
            .ok_or_else(|| DomainError::not_found("List", list_id))?;

        Ok(ListDetails {
            discount: compute_discount(&list),
            failed_activities: count_failed_activities(&list),
            list,
        })
    }

    pub async fn list(&self, page: Page) -> DomainResult<Paged<TaskList>> {
        Ok(self.lists.list_lists(page).await?)
    }

    pub async fn find_lists(&self, family_member_name: &str, status: Option<ListStatus>) -> DomainResult<Vec<TaskList>> {
        Ok(self.lists.find_lists_by_member(family_member_name.trim(), status).await?)
    }

    /// Move a list to another status. Closed lists are final.
    pub async fn update_status(&self, command: UpdateListStatusCommand) -> DomainResult<TaskList> {
        info!("Updating list {} to status {}", command.id, command.status);

        let status = parse_status(&command.status)?;
        let mut list = self
            .lists
            .get_list(&command.id)
            .await?
            .ok_or_else(|| DomainError::not_found("List", &command.id))?;

        if list.status == status {
            return Ok(list);
        }
        if list.is_closed() {
            warn!("Rejected status change on closed list {}", list.id);
            return Err(DomainError::Validation(format!(
                "List {} is closed and cannot change status",
                list.id
            )));
        }
        if status == ListStatus::InProgress {
            self.ensure_no_other_in_progress(&list.family_member_name, Some(&list.id)).await?;
        }

        list.status = status;
        list.touch(Utc::now());
        self.lists.save_list(&list).await.map_err(in_progress_conflict)
    }

    pub async fn delete(&self, list_id: &str) -> DomainResult<()> {
        info!("Deleting list {}", list_id);
        if !self.lists.delete_list(list_id).await? {
            return Err(DomainError::not_found("List", list_id));
        }
        Ok(())
    }

    async fn ensure_no_other_in_progress(&self, member_name: &str, except_list: Option<&str>) -> DomainResult<()> {
        let in_progress = self
            .lists
            .find_lists_by_member(member_name, Some(ListStatus::InProgress))
            .await?;
        if in_progress.iter().any(|l| Some(l.id.as_str()) != except_list) {
            return Err(DomainError::Conflict(format!(
                "{} already has a list in progress",
                member_name
            )));
        }
        Ok(())
    }
}

fn parse_status(raw: &str) -> DomainResult<ListStatus> {
    ListStatus::from_string(raw.trim()).map_err(DomainError::Validation)
}

/// The only unique index on lists is the one-in-progress rule
fn in_progress_conflict(err: StorageError) -> DomainError {
    match err {
        StorageError::UniqueViolation(_) => {
            DomainError::Conflict("Member already has a list in progress".to_string())
        }
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_utils::TestStores;

    fn service(stores: &TestStores) -> ListService {
        ListService::new(stores.lists.clone(), stores.members.clone())
    }

    fn create(name: &str, status: &str) -> CreateListCommand {
        CreateListCommand {
            family_member_name: name.to_string(),
            status: status.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_member_and_known_status() {
        let stores = TestStores::new().await;
        let service = service(&stores);
        stores.member("Maria", 50.0).await;

        let list = service.create(create("Maria", "Em aberto")).await.unwrap();
        assert_eq!(list.status, ListStatus::Open);
        assert!(list.activities.is_empty());

        assert!(matches!(service.create(create("Pedro", "Em aberto")).await, Err(DomainError::Validation(_))));
        assert!(matches!(service.create(create("Maria", "Aberta")).await, Err(DomainError::Validation(_))));
    }

    #[tokio::test]
    async fn test_only_one_in_progress_list_per_member() {
        let stores = TestStores::new().await;
        let service = service(&stores);
        stores.member("Maria", 50.0).await;
        stores.member("Pedro", 30.0).await;

        service.create(create("Maria", "Em andamento")).await.unwrap();
        let second = service.create(create("Maria", "Em andamento")).await;
        assert!(matches!(second, Err(DomainError::Conflict(_))));

        service.create(create("Pedro", "Em andamento")).await.unwrap();
        service.create(create("Maria", "Em espera")).await.unwrap();
    }

    #[tokio::test]
    async fn test_storage_index_conflict_surfaces_as_conflict() {
        let stores = TestStores::new().await;
        stores.list("Maria", ListStatus::InProgress).await;

        let raced = TaskList::new("Maria", ListStatus::InProgress, Utc::now());
        let err = stores.lists.save_list(&raced).await.map_err(in_progress_conflict);
        assert!(matches!(err, Err(DomainError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let stores = TestStores::new().await;
        let service = service(&stores);
        stores.member("Maria", 50.0).await;
        let list = service.create(create("Maria", "Em aberto")).await.unwrap();
        let waiting = service.create(create("Maria", "Em espera")).await.unwrap();

        let started = service
            .update_status(UpdateListStatusCommand {
                id: list.id.clone(),
                status: "Em andamento".into(),
            })
            .await
            .unwrap();
        assert_eq!(started.status, ListStatus::InProgress);

        let blocked = service
            .update_status(UpdateListStatusCommand {
                id: waiting.id.clone(),
                status: "Em andamento".into(),
            })
            .await;
        assert!(matches!(blocked, Err(DomainError::Conflict(_))));

        service
            .update_status(UpdateListStatusCommand {
                id: list.id.clone(),
                status: "Encerrada".into(),
            })
            .await
            .unwrap();
        let reopen = service
            .update_status(UpdateListStatusCommand {
                id: list.id.clone(),
                status: "Em aberto".into(),
            })
            .await;
        assert!(matches!(reopen, Err(DomainError::Validation(_))));

        // With the first list closed the waiting one may start
        service
            .update_status(UpdateListStatusCommand {
                id: waiting.id.clone(),
                status: "Em andamento".into(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_details_and_delete() {
        let stores = TestStores::new().await;
        let service = service(&stores);
        let dishes = stores.activity("Dishes").await;
        let list = stores.closed_list_with("Maria", &dishes, -7.5).await;

        let details = service.get_details(&list.id).await.unwrap();
        assert_eq!(details.discount, -7.5);
        assert_eq!(details.failed_activities, 1);

        service.delete(&list.id).await.unwrap();
        assert!(service.get(&list.id).await.unwrap().is_none());
        assert!(matches!(service.delete(&list.id).await, Err(DomainError::NotFound(_))));
        assert!(matches!(service.get_details(&list.id).await, Err(DomainError::NotFound(_))));
    }
}
