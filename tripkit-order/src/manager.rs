use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use tripkit_catalog::PricedRequest;
use tripkit_core::repository::BookingHistoryRepository;
use tripkit_core::CoreError;
use tripkit_shared::Booking;

use crate::models::{resolve_payment_mode, stage_booking, SlotState};

/// How long an unconfirmed booking is kept before it is discarded.
pub const DEFAULT_PENDING_TTL_HOURS: i64 = 24;

/// Runs the price -> pending -> confirmed lifecycle.
///
/// Each session owns at most one pending booking. Confirmation appends the
/// booking to the history repository and clears the slot; the slot map stays
/// locked for the whole read-modify-write so a confirm can never pick up a
/// price staged concurrently for the same session.
///
/// Slots older than the pending TTL count as empty and are pruned whenever a
/// new price is staged.
pub struct BookingDesk {
    pending: Mutex<HashMap<String, Booking>>,
    history: Arc<dyn BookingHistoryRepository>,
    pending_ttl: Duration,
}

impl BookingDesk {
    pub fn new(history: Arc<dyn BookingHistoryRepository>) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            history,
            pending_ttl: Duration::hours(DEFAULT_PENDING_TTL_HOURS),
        }
    }

    pub fn with_pending_ttl(mut self, ttl: Duration) -> Self {
        self.pending_ttl = ttl;
        self
    }

    fn is_live(&self, booking: &Booking, now: DateTime<Utc>) -> bool {
        now - booking.time < self.pending_ttl
    }

    /// Empty|Pending -> Pending. The latest price replaces any earlier one.
    pub async fn price(&self, session_id: &str, priced: &PricedRequest) -> Booking {
        let now = Utc::now();
        let booking = stage_booking(session_id, priced, now);
        let mut pending = self.pending.lock().await;

        let before = pending.len();
        pending.retain(|_, staged| self.is_live(staged, now));
        if pending.len() < before {
            debug!(evicted = before - pending.len(), "Expired pending bookings dropped");
        }

        if let Some(previous) = pending.insert(session_id.to_string(), booking.clone()) {
            info!(session_id, replaced = %previous.id, "Pending booking replaced");
        }
        info!(
            session_id,
            booking_id = %booking.id,
            trip_type = %booking.trip_type,
            final_price = booking.final_price,
            "Booking pending"
        );
        booking
    }

    /// Pending -> Empty, appending the booking to history.
    ///
    /// If the history append fails the pending booking is left untouched.
    pub async fn confirm(
        &self,
        session_id: &str,
        payment_mode: Option<String>,
    ) -> Result<Booking, BookingError> {
        let mut pending = self.pending.lock().await;

        let mut booking = pending
            .get(session_id)
            .filter(|staged| self.is_live(staged, Utc::now()))
            .cloned()
            .ok_or(BookingError::NoPendingBooking)?;
        booking.payment_mode = resolve_payment_mode(payment_mode, booking.payment_mode.take());

        self.history.append(&booking).await?;
        pending.remove(session_id);

        info!(
            session_id,
            booking_id = %booking.id,
            payment_mode = booking.payment_mode.as_deref().unwrap_or("-"),
            "Booking confirmed"
        );
        Ok(booking)
    }

    pub async fn pending(&self, session_id: &str) -> Option<Booking> {
        self.pending
            .lock()
            .await
            .get(session_id)
            .filter(|staged| self.is_live(staged, Utc::now()))
            .cloned()
    }

    pub async fn state(&self, session_id: &str) -> SlotState {
        if self.pending(session_id).await.is_some() {
            SlotState::Pending
        } else {
            SlotState::Empty
        }
    }

    /// Sessions currently holding a slot, expired or not.
    pub async fn slot_count(&self) -> usize {
        self.pending.lock().await.len()
    }

    /// Confirmed bookings for the session, oldest first. Never mutates state.
    pub async fn history(&self, session_id: &str) -> Result<Vec<Booking>, BookingError> {
        Ok(self.history.list(session_id).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("No pending booking.")]
    NoPendingBooking,

    #[error(transparent)]
    Storage(#[from] CoreError),
}

impl From<BookingError> for CoreError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NoPendingBooking => CoreError::StateError(err.to_string()),
            BookingError::Storage(inner) => inner,
        }
    }
}
