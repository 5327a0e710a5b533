use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::{format_timestamp, parse_timestamp, DbConnection};
use crate::domain::models::{Activity, Page, Paged};
use crate::storage::error::StorageResult;
use crate::storage::traits::ActivityStorage;

/// Repository for the activity catalog
#[derive(Clone)]
pub struct ActivityRepository {
    db: DbConnection,
}

impl ActivityRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> StorageResult<Activity> {
        Ok(Activity {
            id: row.try_get("id")?,
            description: row.try_get("description")?,
            created_at: parse_timestamp(row.try_get("created_at")?)?,
            updated_at: parse_timestamp(row.try_get("updated_at")?)?,
        })
    }
}

#[async_trait]
impl ActivityStorage for ActivityRepository {
    async fn get_activity(&self, activity_id: &str) -> StorageResult<Option<Activity>> {
        let row = sqlx::query(
            r#"
            SELECT id, description, created_at, updated_at
            FROM activities
            WHERE id = ?
            "#,
        )
        .bind(activity_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_activity_by_description(&self, description: &str) -> StorageResult<Option<Activity>> {
        let row = sqlx::query(
            r#"
            SELECT id, description, created_at, updated_at
            FROM activities
            WHERE description = ?
            "#,
        )
        .bind(description)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_activities(&self, page: Page) -> StorageResult<Paged<Activity>> {
        let rows = sqlx::query(
            r#"
            SELECT id, description, created_at, updated_at
            FROM activities
            ORDER BY created_at ASC, ROWID ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.db.pool())
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities")
            .fetch_one(self.db.pool())
            .await?;

        Ok(Paged {
            rows: rows.iter().map(Self::map_row).collect::<StorageResult<_>>()?,
            count: count as usize,
        })
    }

    async fn save_activity(&self, activity: &Activity) -> StorageResult<Activity> {
        sqlx::query(
            r#"
            INSERT INTO activities (id, description, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&activity.id)
        .bind(&activity.description)
        .bind(format_timestamp(&activity.created_at))
        .bind(format_timestamp(&activity.updated_at))
        .execute(self.db.pool())
        .await?;

        debug!("Saved activity {}", activity.id);
        Ok(activity.clone())
    }

    async fn delete_activity(&self, activity_id: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(activity_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
