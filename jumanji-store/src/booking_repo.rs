use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;
use jumanji_core::{Booking, BookingRepository, BoxError, NewBooking};
use crate::error::StoreError;

pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    name: String,
    phone: String,
    guests: i64,
    date: String,
    time: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = StoreError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let guests = u32::try_from(row.guests)
            .map_err(|_| StoreError::InvalidRecord(format!("guests = {}", row.guests)))?;

        Ok(Booking {
            id: row.id,
            name: row.name,
            phone: row.phone,
            guests,
            date: row.date,
            time: row.time,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, BoxError> {
        let guests = i64::from(booking.guests);
        let now = Utc::now();

        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            INSERT INTO bookings (id, name, phone, guests, "date", "time", created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, name, phone, guests, "date", "time", created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&booking.name)
        .bind(&booking.phone)
        .bind(guests)
        .bind(&booking.date)
        .bind(&booking.time)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from)?;

        Ok(Booking::try_from(row)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(guests: i64) -> BookingRow {
        let now = Utc::now();
        BookingRow {
            id: Uuid::new_v4(),
            name: "Ann".to_string(),
            phone: "12345".to_string(),
            guests,
            date: "2024-05-01".to_string(),
            time: "19:00".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_row_maps_to_booking() {
        let r = row(4);
        let id = r.id;
        let booking = Booking::try_from(r).unwrap();
        assert_eq!(booking.id, id);
        assert_eq!(booking.guests, 4);
        assert_eq!(booking.created_at, booking.updated_at);
    }

    #[test]
    fn test_guest_count_above_i32_range_round_trips() {
        let large = u32::MAX;
        assert_eq!(i64::from(large), 4_294_967_295);

        let booking = Booking::try_from(row(i64::from(large))).unwrap();
        assert_eq!(booking.guests, large);

        let booking = Booking::try_from(row(3_000_000_000)).unwrap();
        assert_eq!(booking.guests, 3_000_000_000);
    }

    #[test]
    fn test_negative_guest_row_rejected() {
        assert!(matches!(Booking::try_from(row(-1)), Err(StoreError::InvalidRecord(_))));
    }
}
