use async_trait::async_trait;
use chrono::{DateTime, Utc, NaiveDateTime};
use sqlx::{SqlitePool, FromRow};
use uuid::Uuid;

use crate::{
    domain::{Booking, BookingPaymentStatus, BookingStatus},
    error::{AppError, Result},
    repository::BookingRepository,
};

#[derive(FromRow)]
struct BookingRow {
    id: String,
    user_id: String,
    class_id: String,
    status: String,
    payment_status: String,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
}

pub struct SqliteBookingRepository {
    pool: SqlitePool,
}

impl SqliteBookingRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_booking(row: BookingRow) -> Result<Booking> {
        Ok(Booking {
            id: Uuid::parse_str(&row.id).map_err(|e| AppError::Database(e.to_string()))?,
            user_id: Uuid::parse_str(&row.user_id).map_err(|e| AppError::Database(e.to_string()))?,
            class_id: Uuid::parse_str(&row.class_id).map_err(|e| AppError::Database(e.to_string()))?,
            status: Self::parse_status(&row.status)?,
            payment_status: Self::parse_payment_status(&row.payment_status)?,
            created_at: DateTime::from_naive_utc_and_offset(row.created_at, Utc),
            updated_at: DateTime::from_naive_utc_and_offset(row.updated_at, Utc),
        })
    }

    fn parse_status(s: &str) -> Result<BookingStatus> {
        match s {
            "booked" => Ok(BookingStatus::Booked),
            "waitlist" => Ok(BookingStatus::Waitlist),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(AppError::Database(format!("Invalid booking status: {}", s))),
        }
    }

    fn status_to_str(status: &BookingStatus) -> &'static str {
        match status {
            BookingStatus::Booked => "booked",
            BookingStatus::Waitlist => "waitlist",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    fn parse_payment_status(s: &str) -> Result<BookingPaymentStatus> {
        match s {
            "pending" => Ok(BookingPaymentStatus::Pending),
            "paid" => Ok(BookingPaymentStatus::Paid),
            _ => Err(AppError::Database(format!("Invalid booking payment status: {}", s))),
        }
    }

    fn payment_status_to_str(status: &BookingPaymentStatus) -> &'static str {
        match status {
            BookingPaymentStatus::Pending => "pending",
            BookingPaymentStatus::Paid => "paid",
        }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking> {
        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, user_id, class_id, status, payment_status,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#
        )
        .bind(booking.id.to_string())
        .bind(booking.user_id.to_string())
        .bind(booking.class_id.to_string())
        .bind(Self::status_to_str(&booking.status))
        .bind(Self::payment_status_to_str(&booking.payment_status))
        .bind(booking.created_at.naive_utc())
        .bind(booking.updated_at.naive_utc())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(booking.id).await?.ok_or_else(|| {
            AppError::Database("Failed to retrieve created booking".to_string())
        })
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let row = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, class_id, status, payment_status,
                   created_at, updated_at
            FROM bookings
            WHERE id = ?
            "#
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        match row {
            Some(r) => Ok(Some(Self::row_to_booking(r)?)),
            None => Ok(None)
        }
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let rows = sqlx::query_as::<_, BookingRow>(
            r#"
            SELECT id, user_id, class_id, status, payment_status,
                   created_at, updated_at
            FROM bookings
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        rows.into_iter()
            .map(Self::row_to_booking)
            .collect()
    }

    async fn count_booked_for_class(&self, class_id: Uuid) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            SELECT COUNT(*) as count
            FROM bookings
            WHERE class_id = ? AND status = ?
            "#
        )
        .bind(class_id.to_string())
        .bind(Self::status_to_str(&BookingStatus::Booked))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking> {
        let now = Utc::now().naive_utc();

        sqlx::query(
            r#"
            UPDATE bookings
            SET status = ?,
                updated_at = ?
            WHERE id = ?
            "#
        )
        .bind(Self::status_to_str(&status))
        .bind(now)
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

        self.find_by_id(id).await?.ok_or_else(|| {
            AppError::NotFound("Booking not found".to_string())
        })
    }

    async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(row.0)
    }
}
