use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::{format_timestamp, parse_timestamp, DbConnection};
use crate::domain::models::{ActivityInstance, ListStatus, Page, Paged, TaskList};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::traits::ListStorage;

/// Repository for task lists. Activity entries live in a JSON column.
#[derive(Clone)]
pub struct ListRepository {
    db: DbConnection,
}

impl ListRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> StorageResult<TaskList> {
        let status_raw: String = row.try_get("status")?;
        let status = ListStatus::from_string(&status_raw).map_err(StorageError::Corrupt)?;
        let activities_raw: String = row.try_get("activities")?;
        let activities: Vec<ActivityInstance> = serde_json::from_str(&activities_raw)?;

        Ok(TaskList {
            id: row.try_get("id")?,
            family_member_name: row.try_get("family_member_name")?,
            status,
            activities,
            created_at: parse_timestamp(row.try_get("created_at")?)?,
            updated_at: parse_timestamp(row.try_get("updated_at")?)?,
        })
    }
}

#[async_trait]
impl ListStorage for ListRepository {
    async fn get_list(&self, list_id: &str) -> StorageResult<Option<TaskList>> {
        let row = sqlx::query(
            r#"
            SELECT id, family_member_name, status, activities, created_at, updated_at
            FROM lists
            WHERE id = ?
            "#,
        )
        .bind(list_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_lists(&self, page: Page) -> StorageResult<Paged<TaskList>> {
        let rows = sqlx::query(
            r#"
            SELECT id, family_member_name, status, activities, created_at, updated_at
            FROM lists
            ORDER BY created_at ASC, ROWID ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.db.pool())
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM lists")
            .fetch_one(self.db.pool())
            .await?;

        Ok(Paged {
            rows: rows.iter().map(Self::map_row).collect::<StorageResult<_>>()?,
            count: count as usize,
        })
    }

    async fn find_lists_by_member(
        &self,
        family_member_name: &str,
        status: Option<ListStatus>,
    ) -> StorageResult<Vec<TaskList>> {
        let rows = match status {
            Some(status) => {
                sqlx::query(
                    r#"
                    SELECT id, family_member_name, status, activities, created_at, updated_at
                    FROM lists
                    WHERE family_member_name = ? AND status = ?
                    ORDER BY created_at ASC, ROWID ASC
                    "#,
                )
                .bind(family_member_name)
                .bind(status.as_str())
                .fetch_all(self.db.pool())
                .await?
            }
            None => {
                sqlx::query(
                    r#"
                    SELECT id, family_member_name, status, activities, created_at, updated_at
                    FROM lists
                    WHERE family_member_name = ?
                    ORDER BY created_at ASC, ROWID ASC
                    "#,
                )
                .bind(family_member_name)
                .fetch_all(self.db.pool())
                .await?
            }
        };

        rows.iter().map(Self::map_row).collect()
    }

    async fn find_lists_with_activity(&self, activity_id: &str) -> StorageResult<Vec<TaskList>> {
        let rows = sqlx::query(
            r#"
            SELECT id, family_member_name, status, activities, created_at, updated_at
            FROM lists
            WHERE EXISTS (
                SELECT 1 FROM json_each(lists.activities)
                WHERE json_extract(json_each.value, '$.activityId') = ?
            )
            ORDER BY created_at ASC, ROWID ASC
            "#,
        )
        .bind(activity_id)
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::map_row).collect()
    }

    async fn save_list(&self, list: &TaskList) -> StorageResult<TaskList> {
        let activities = serde_json::to_string(&list.activities)?;

        sqlx::query(
            r#"
            INSERT INTO lists (id, family_member_name, status, activities, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                family_member_name = excluded.family_member_name,
                status = excluded.status,
                activities = excluded.activities,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&list.id)
        .bind(&list.family_member_name)
        .bind(list.status.as_str())
        .bind(activities)
        .bind(format_timestamp(&list.created_at))
        .bind(format_timestamp(&list.updated_at))
        .execute(self.db.pool())
        .await?;

        debug!("Saved list {} with {} activities", list.id, list.activities.len());
        Ok(list.clone())
    }

    async fn delete_list(&self, list_id: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM lists WHERE id = ?")
            .bind(list_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn setup_test() -> ListRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        ListRepository::new(db)
    }

    fn instance(activity_id: &str, value: f64) -> ActivityInstance {
        ActivityInstance {
            activity_id: activity_id.to_string(),
            description: format!("Activity {}", activity_id),
            value,
        }
    }

    #[tokio::test]
    async fn test_save_and_get_list_with_activities() {
        let repo = setup_test().await;
        let mut list = TaskList::new("Maria", ListStatus::Open, Utc::now());
        list.activities = vec![instance("a1", -10.0), instance("a2", 5.0)];

        repo.save_list(&list).await.expect("Failed to save list");

        let stored = repo.get_list(&list.id).await.expect("Query failed").expect("List missing");
        assert_eq!(stored, list);
    }

    #[tokio::test]
    async fn test_find_lists_by_member_and_status() {
        let repo = setup_test().await;
        let now = Utc::now();
        let open = TaskList::new("Maria", ListStatus::Open, now);
        let closed = TaskList::new("Maria", ListStatus::Closed, now + Duration::seconds(1));
        let other = TaskList::new("Pedro", ListStatus::Closed, now);
        for list in [&open, &closed, &other] {
            repo.save_list(list).await.expect("Failed to save list");
        }

        let all = repo.find_lists_by_member("Maria", None).await.expect("Query failed");
        assert_eq!(all.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), vec![open.id.as_str(), closed.id.as_str()]);

        let closed_only = repo
            .find_lists_by_member("Maria", Some(ListStatus::Closed))
            .await
            .expect("Query failed");
        assert_eq!(closed_only.len(), 1);
        assert_eq!(closed_only[0].id, closed.id);
    }

    #[tokio::test]
    async fn test_find_lists_with_activity_includes_closed() {
        let repo = setup_test().await;
        let now = Utc::now();
        let mut open = TaskList::new("Maria", ListStatus::Open, now);
        open.activities = vec![instance("dishes", -1.0)];
        let mut closed = TaskList::new("Pedro", ListStatus::Closed, now + Duration::seconds(1));
        closed.activities = vec![instance("dishes", 2.0), instance("bed", 1.0)];
        let mut unrelated = TaskList::new("Joao", ListStatus::Waiting, now);
        unrelated.activities = vec![instance("bed", 1.0)];
        for list in [&open, &closed, &unrelated] {
            repo.save_list(list).await.expect("Failed to save list");
        }

        let found = repo.find_lists_with_activity("dishes").await.expect("Query failed");
        let ids: Vec<_> = found.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec![open.id.as_str(), closed.id.as_str()]);
    }

    #[tokio::test]
    async fn test_second_in_progress_list_is_rejected_by_index() {
        let repo = setup_test().await;
        let first = TaskList::new("Maria", ListStatus::InProgress, Utc::now());
        repo.save_list(&first).await.expect("Failed to save list");

        let second = TaskList::new("Maria", ListStatus::InProgress, Utc::now());
        let result = repo.save_list(&second).await;
        assert!(matches!(result, Err(StorageError::UniqueViolation(_))));

        // Other members and other statuses are unaffected
        repo.save_list(&TaskList::new("Pedro", ListStatus::InProgress, Utc::now()))
            .await
            .expect("Failed to save list");
        repo.save_list(&TaskList::new("Maria", ListStatus::Open, Utc::now()))
            .await
            .expect("Failed to save list");
    }

    #[tokio::test]
    async fn test_list_lists_and_delete() {
        let repo = setup_test().await;
        let now = Utc::now();
        let first = TaskList::new("Maria", ListStatus::Open, now);
        let second = TaskList::new("Pedro", ListStatus::Open, now + Duration::seconds(1));
        repo.save_list(&first).await.expect("Failed to save list");
        repo.save_list(&second).await.expect("Failed to save list");

        let page = repo.list_lists(Page::default()).await.expect("Query failed");
        assert_eq!(page.count, 2);
        assert_eq!(page.rows[0].id, first.id);

        assert!(repo.delete_list(&first.id).await.expect("Delete failed"));
        assert!(!repo.delete_list(&first.id).await.expect("Delete failed"));
        assert_eq!(repo.list_lists(Page::default()).await.expect("Query failed").count, 1);
    }
}
