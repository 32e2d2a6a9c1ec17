use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tripkit_core::repository::AlertRepository;
use tripkit_core::{CoreError, CoreResult};
use tripkit_shared::{AlertRecord, AlertStatus};

use crate::database::storage_error;

pub struct PgAlertRepository {
    pool: PgPool,
}

impl PgAlertRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AlertRow {
    id: i64,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<AlertRow> for AlertRecord {
    type Error = CoreError;

    fn try_from(row: AlertRow) -> Result<Self, Self::Error> {
        Ok(AlertRecord {
            id: row.id,
            message: row.message,
            status: row.status.parse::<AlertStatus>().map_err(CoreError::StorageError)?,
            timestamp: row.created_at,
        })
    }
}

#[async_trait]
impl AlertRepository for PgAlertRepository {
    async fn enqueue(&self, message: &str) -> CoreResult<AlertRecord> {
        let row = sqlx::query_as::<_, AlertRow>(
            r#"
            INSERT INTO sos_alerts (message, status)
            VALUES ($1, 'pending')
            RETURNING id, message, status, created_at
            "#,
        )
        .bind(message)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error("enqueue alert"))?;

        AlertRecord::try_from(row)
    }

    async fn pending(&self) -> CoreResult<Vec<AlertRecord>> {
        let rows = sqlx::query_as::<_, AlertRow>(
            "SELECT id, message, status, created_at FROM sos_alerts \
             WHERE status = 'pending' ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list pending alerts"))?;

        rows.into_iter().map(AlertRecord::try_from).collect()
    }

    async fn mark_sent(&self, id: i64) -> CoreResult<bool> {
        let result = sqlx::query(
            "UPDATE sos_alerts SET status = 'sent' WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(storage_error("mark alert sent"))?;

        Ok(result.rows_affected() == 1)
    }

    async fn list(&self) -> CoreResult<Vec<AlertRecord>> {
        let rows = sqlx::query_as::<_, AlertRow>(
            "SELECT id, message, status, created_at FROM sos_alerts ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list alerts"))?;

        rows.into_iter().map(AlertRecord::try_from).collect()
    }
}
