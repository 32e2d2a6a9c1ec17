use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tripkit_core::repository::BookingHistoryRepository;
use tripkit_core::{CoreError, CoreResult};
use tripkit_shared::{Booking, TripType};
use uuid::Uuid;

use crate::database::storage_error;

pub struct PgBookingHistoryRepository {
    pool: PgPool,
}

impl PgBookingHistoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    session_id: String,
    booked_at: DateTime<Utc>,
    trip_type: String,
    vehicle_label: String,
    from_city: String,
    from_place: Option<String>,
    to_city: String,
    to_place: Option<String>,
    distance_km: f64,
    fare_per_km: Option<f64>,
    final_price: f64,
    payment_mode: Option<String>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = CoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let trip_type = row
            .trip_type
            .parse::<TripType>()
            .map_err(CoreError::StorageError)?;

        Ok(Booking {
            id: row.id,
            session_id: row.session_id,
            time: row.booked_at,
            trip_type,
            vehicle_label: row.vehicle_label,
            from_city: row.from_city,
            from_place: row.from_place,
            to_city: row.to_city,
            to_place: row.to_place,
            distance_km: row.distance_km,
            fare_per_km: row.fare_per_km,
            final_price: row.final_price,
            payment_mode: row.payment_mode,
        })
    }
}

#[async_trait]
impl BookingHistoryRepository for PgBookingHistoryRepository {
    async fn append(&self, booking: &Booking) -> CoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO booking_history
                (id, session_id, booked_at, trip_type, vehicle_label, from_city, from_place,
                 to_city, to_place, distance_km, fare_per_km, final_price, payment_mode)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(booking.id)
        .bind(&booking.session_id)
        .bind(booking.time)
        .bind(booking.trip_type.as_str())
        .bind(&booking.vehicle_label)
        .bind(&booking.from_city)
        .bind(&booking.from_place)
        .bind(&booking.to_city)
        .bind(&booking.to_place)
        .bind(booking.distance_km)
        .bind(booking.fare_per_km)
        .bind(booking.final_price)
        .bind(&booking.payment_mode)
        .execute(&self.pool)
        .await
        .map_err(storage_error("append booking"))?;

        Ok(())
    }

    async fn list(&self, session_id: &str) -> CoreResult<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, session_id, booked_at, trip_type, vehicle_label, from_city, from_place,
                   to_city, to_place, distance_km, fare_per_km, final_price, payment_mode
            FROM booking_history
            WHERE session_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error("list bookings"))?;

        rows.into_iter().map(Booking::try_from).collect()
    }
}
