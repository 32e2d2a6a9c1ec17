use async_trait::async_trait;
use tripkit_shared::{AlertRecord, Booking};

use crate::CoreResult;

/// Append-only store of confirmed bookings
#[async_trait]
pub trait BookingHistoryRepository: Send + Sync {
    async fn append(&self, booking: &Booking) -> CoreResult<()>;

    /// Confirmed bookings for one session, oldest first.
    async fn list(&self, session_id: &str) -> CoreResult<Vec<Booking>>;
}

/// Durable offline queue for alerts that could not be delivered
#[async_trait]
pub trait AlertRepository: Send + Sync {
    /// Persist a new record with status `pending`.
    async fn enqueue(&self, message: &str) -> CoreResult<AlertRecord>;

    /// Pending records in arrival order.
    async fn pending(&self) -> CoreResult<Vec<AlertRecord>>;

    /// Conditionally move one record from `pending` to `sent`.
    ///
    /// Returns `false` when the record was already sent (or does not exist);
    /// a sent record is never touched.
    async fn mark_sent(&self, id: i64) -> CoreResult<bool>;

    async fn list(&self) -> CoreResult<Vec<AlertRecord>>;
}
