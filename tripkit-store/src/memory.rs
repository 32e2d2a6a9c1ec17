//! Process-local repositories, used when no database is configured.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tripkit_core::repository::{AlertRepository, BookingHistoryRepository};
use tripkit_core::CoreResult;
use tripkit_shared::{AlertRecord, AlertStatus, Booking};

#[derive(Default)]
pub struct MemoryBookingHistoryRepository {
    rows: RwLock<Vec<Booking>>,
}

impl MemoryBookingHistoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingHistoryRepository for MemoryBookingHistoryRepository {
    async fn append(&self, booking: &Booking) -> CoreResult<()> {
        self.rows.write().await.push(booking.clone());
        Ok(())
    }

    async fn list(&self, session_id: &str) -> CoreResult<Vec<Booking>> {
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .filter(|b| b.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
struct AlertTable {
    next_id: i64,
    rows: Vec<AlertRecord>,
}

#[derive(Default)]
pub struct MemoryAlertRepository {
    table: RwLock<AlertTable>,
}

impl MemoryAlertRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AlertRepository for MemoryAlertRepository {
    async fn enqueue(&self, message: &str) -> CoreResult<AlertRecord> {
        let mut table = self.table.write().await;
        table.next_id += 1;
        let record = AlertRecord {
            id: table.next_id,
            message: message.to_string(),
            status: AlertStatus::Pending,
            timestamp: Utc::now(),
        };
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn pending(&self) -> CoreResult<Vec<AlertRecord>> {
        Ok(self
            .table
            .read()
            .await
            .rows
            .iter()
            .filter(|r| r.is_pending())
            .cloned()
            .collect())
    }

    async fn mark_sent(&self, id: i64) -> CoreResult<bool> {
        let mut table = self.table.write().await;
        match table.rows.iter_mut().find(|r| r.id == id) {
            Some(record) if record.is_pending() => {
                record.status = AlertStatus::Sent;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn list(&self) -> CoreResult<Vec<AlertRecord>> {
        Ok(self.table.read().await.rows.clone())
    }
}
