use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use super::{format_timestamp, parse_timestamp, DbConnection};
use crate::domain::models::{Member, Page, Paged};
use crate::storage::error::{StorageError, StorageResult};
use crate::storage::traits::MemberStorage;

/// Birth dates are stored as ISO dates so they sort naturally
const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone)]
pub struct MemberRepository {
    db: DbConnection,
}

impl MemberRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn map_row(row: &SqliteRow) -> StorageResult<Member> {
        let birth_raw: String = row.try_get("birth_date")?;
        let birth_date = NaiveDate::parse_from_str(&birth_raw, STORED_DATE_FORMAT)
            .map_err(|e| StorageError::Corrupt(format!("bad birth date '{}': {}", birth_raw, e)))?;

        Ok(Member {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            birth_date,
            allowance_value: row.try_get("allowance_value")?,
            created_at: parse_timestamp(row.try_get("created_at")?)?,
            updated_at: parse_timestamp(row.try_get("updated_at")?)?,
        })
    }
}

#[async_trait]
impl MemberStorage for MemberRepository {
    async fn get_member(&self, member_id: &str) -> StorageResult<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birth_date, allowance_value, created_at, updated_at
            FROM members
            WHERE id = ?
            "#,
        )
        .bind(member_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn find_member_by_name(&self, name: &str) -> StorageResult<Option<Member>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, birth_date, allowance_value, created_at, updated_at
            FROM members
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::map_row).transpose()
    }

    async fn list_members(&self, page: Page) -> StorageResult<Paged<Member>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, birth_date, allowance_value, created_at, updated_at
            FROM members
            ORDER BY name ASC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(self.db.pool())
        .await?;

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(self.db.pool())
            .await?;

        Ok(Paged {
            rows: rows.iter().map(Self::map_row).collect::<StorageResult<_>>()?,
            count: count as usize,
        })
    }

    async fn save_member(&self, member: &Member) -> StorageResult<Member> {
        sqlx::query(
            r#"
            INSERT INTO members (id, name, birth_date, allowance_value, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                birth_date = excluded.birth_date,
                allowance_value = excluded.allowance_value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(member.birth_date.format(STORED_DATE_FORMAT).to_string())
        .bind(member.allowance_value)
        .bind(format_timestamp(&member.created_at))
        .bind(format_timestamp(&member.updated_at))
        .execute(self.db.pool())
        .await?;

        debug!("Saved member {} ({})", member.name, member.id);
        Ok(member.clone())
    }

    async fn delete_member(&self, member_id: &str) -> StorageResult<bool> {
        let result = sqlx::query("DELETE FROM members WHERE id = ?")
            .bind(member_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
