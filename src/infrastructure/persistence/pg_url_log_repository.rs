//! PostgreSQL implementation of the URL processing log repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Lifecycle, NewUrlProcessLog, UrlProcessLog, UrlProcessStats};
use crate::domain::repositories::UrlLogRepository;
use crate::error::AppError;
use crate::utils::url_normalizer::UrlOperation;

#[derive(sqlx::FromRow)]
struct UrlProcessLogRow {
    id: i64,
    original_url: String,
    processed_url: String,
    operation: String,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl TryFrom<UrlProcessLogRow> for UrlProcessLog {
    type Error = AppError;

    fn try_from(row: UrlProcessLogRow) -> Result<Self, Self::Error> {
        let operation: UrlOperation = row.operation.parse().map_err(|_| {
            AppError::internal(
                "Unknown operation stored in url_process_logs",
                json!({ "id": row.id, "operation": row.operation }),
            )
        })?;

        Ok(UrlProcessLog {
            id: row.id,
            original_url: row.original_url,
            processed_url: row.processed_url,
            operation,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at: row.created_at,
            updated_at: row.updated_at,
            lifecycle: Lifecycle::from_deleted_at(row.deleted_at),
        })
    }
}

/// PostgreSQL repository for URL processing logs.
pub struct PgUrlLogRepository {
    pool: Arc<PgPool>,
}

impl PgUrlLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlLogRepository for PgUrlLogRepository {
    async fn record(&self, entry: NewUrlProcessLog) -> Result<UrlProcessLog, AppError> {
        let row = sqlx::query_as::<_, UrlProcessLogRow>(
            r#"
            INSERT INTO url_process_logs (original_url, processed_url, operation, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, original_url, processed_url, operation, ip_address, user_agent,
                      created_at, updated_at, deleted_at
            "#,
        )
        .bind(&entry.original_url)
        .bind(&entry.processed_url)
        .bind(entry.operation.as_str())
        .bind(&entry.ip_address)
        .bind(&entry.user_agent)
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn stats(&self) -> Result<UrlProcessStats, AppError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT operation, COUNT(*)
            FROM url_process_logs
            WHERE deleted_at IS NULL
            GROUP BY operation
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut stats = UrlProcessStats::default();
        for (operation, count) in rows {
            stats.total_requests += count;
            stats.by_operation.insert(operation, count);
        }

        Ok(stats)
    }
}
