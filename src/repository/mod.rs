use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domain::*;
use crate::error::Result;

pub mod user_repository;
pub mod class_repository;
pub mod booking_repository;
pub mod payment_repository;
#[cfg(test)]
pub mod memory;

pub use user_repository::SqliteUserRepository;
pub use class_repository::SqliteClassRepository;
pub use booking_repository::SqliteBookingRepository;
pub use payment_repository::SqlitePaymentRepository;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: User) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn count(&self) -> Result<i64>;
    async fn count_active(&self) -> Result<i64>;
}

#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create(&self, class: GymClass) -> Result<GymClass>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<GymClass>>;
    async fn list(&self) -> Result<Vec<GymClass>>;
    async fn count(&self) -> Result<i64>;
    async fn count_starting_after(&self, instant: DateTime<Utc>) -> Result<i64>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: Booking) -> Result<Booking>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>>;
    /// Number of bookings holding a seat (status `booked`) in a class.
    async fn count_booked_for_class(&self, class_id: Uuid) -> Result<i64>;
    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking>;
    async fn count(&self) -> Result<i64>;
}

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn create(&self, payment: Payment) -> Result<Payment>;
    async fn find_by_booking(&self, booking_id: Uuid) -> Result<Option<Payment>>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>>;
    async fn total_amount_cents(&self) -> Result<i64>;
}
