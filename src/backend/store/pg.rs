/**
 * PostgreSQL Document Store
 *
 * Production implementation of the store adapter over a sqlx connection
 * pool. Every call is wrapped in a bounded timeout; a timeout or transport
 * error surfaces as `StoreError::Unavailable` and is never retried here
 * (retry policy belongs to the caller).
 */

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tokio::time::timeout;

use crate::shared::record::{JsonShareMode, ShareAccessType, ShareLinkRecord};

use super::{DocumentStore, PasswordAction, RecordPatch, StoreError};

/// Default bound on a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_millis(5000);

/// sqlx-backed store over the `share_links` table
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    op_timeout: Duration,
}

impl PgStore {
    /// Wrap a connection pool with the default per-call timeout
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, DEFAULT_STORE_TIMEOUT)
    }

    /// Wrap a connection pool with an explicit per-call timeout
    pub fn with_timeout(pool: PgPool, op_timeout: Duration) -> Self {
        Self { pool, op_timeout }
    }

    async fn run<T, F>(&self, op: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match timeout(self.op_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::error!("[Store] {} failed: {}", op, e);
                Err(StoreError::unavailable(format!("{}: {}", op, e)))
            }
            Err(_) => {
                tracing::error!("[Store] {} timed out after {:?}", op, self.op_timeout);
                Err(StoreError::unavailable(format!(
                    "{} timed out after {:?}",
                    op, self.op_timeout
                )))
            }
        }
    }
}

fn record_from_row(row: &PgRow) -> Result<ShareLinkRecord, sqlx::Error> {
    let mode: String = row.try_get("mode")?;
    let access_type: String = row.try_get("access_type")?;
    Ok(ShareLinkRecord {
        slug: row.try_get("slug")?,
        content: row.try_get("content")?,
        mode: JsonShareMode::parse(&mode),
        is_private: row.try_get("is_private")?,
        // Unknown or legacy values collapse to viewer, same as on the wire.
        access_type: ShareAccessType::parse(&access_type),
        password_hash: row.try_get("password_hash")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find_one(&self, slug: &str) -> Result<Option<ShareLinkRecord>, StoreError> {
        let row = self
            .run(
                "find_one",
                sqlx::query(
                    r#"
                    SELECT slug, content, mode, is_private, access_type,
                           password_hash, created_at, updated_at
                    FROM share_links
                    WHERE slug = $1
                    "#,
                )
                .bind(slug)
                .fetch_optional(&self.pool),
            )
            .await?;

        match row {
            Some(row) => {
                let record = record_from_row(&row)
                    .map_err(|e| StoreError::unavailable(format!("decode: {}", e)))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn insert_one(&self, record: &ShareLinkRecord) -> Result<(), StoreError> {
        let result = timeout(
            self.op_timeout,
            sqlx::query(
                r#"
                INSERT INTO share_links
                    (slug, content, mode, is_private, access_type,
                     password_hash, created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(&record.slug)
            .bind(&record.content)
            .bind(record.mode.as_str())
            .bind(record.is_private)
            .bind(record.access_type.as_str())
            .bind(&record.password_hash)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.pool),
        )
        .await;

        match result {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(sqlx::Error::Database(db))) if db.is_unique_violation() => {
                Err(StoreError::DuplicateSlug {
                    slug: record.slug.clone(),
                })
            }
            Ok(Err(e)) => {
                tracing::error!("[Store] insert_one failed: {}", e);
                Err(StoreError::unavailable(format!("insert_one: {}", e)))
            }
            Err(_) => Err(StoreError::unavailable(format!(
                "insert_one timed out after {:?}",
                self.op_timeout
            ))),
        }
    }

    async fn update_one(&self, slug: &str, patch: RecordPatch) -> Result<bool, StoreError> {
        // Three statements rather than one dynamic query: the password hash
        // column has three dispositions and the rest is a full replacement.
        let query = match &patch.password_action {
            PasswordAction::Set(hash) => sqlx::query(
                r#"
                UPDATE share_links
                SET content = $2, mode = $3, is_private = $4, access_type = $5,
                    updated_at = $6, password_hash = $7
                WHERE slug = $1
                "#,
            )
            .bind(slug)
            .bind(&patch.content)
            .bind(patch.mode.as_str())
            .bind(patch.is_private)
            .bind(patch.access_type.as_str())
            .bind(patch.updated_at)
            .bind(hash.clone()),
            PasswordAction::Clear => sqlx::query(
                r#"
                UPDATE share_links
                SET content = $2, mode = $3, is_private = $4, access_type = $5,
                    updated_at = $6, password_hash = NULL
                WHERE slug = $1
                "#,
            )
            .bind(slug)
            .bind(&patch.content)
            .bind(patch.mode.as_str())
            .bind(patch.is_private)
            .bind(patch.access_type.as_str())
            .bind(patch.updated_at),
            PasswordAction::Keep => sqlx::query(
                r#"
                UPDATE share_links
                SET content = $2, mode = $3, is_private = $4, access_type = $5,
                    updated_at = $6
                WHERE slug = $1
                "#,
            )
            .bind(slug)
            .bind(&patch.content)
            .bind(patch.mode.as_str())
            .bind(patch.is_private)
            .bind(patch.access_type.as_str())
            .bind(patch.updated_at),
        };

        let result = self.run("update_one", query.execute(&self.pool)).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn exists(&self, slug: &str) -> Result<bool, StoreError> {
        let row = self
            .run(
                "exists",
                sqlx::query("SELECT 1 AS one FROM share_links WHERE slug = $1")
                    .bind(slug)
                    .fetch_optional(&self.pool),
            )
            .await?;
        Ok(row.is_some())
    }
}
