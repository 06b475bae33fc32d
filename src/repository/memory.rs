//! In-memory repository fakes for service tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::*,
    error::{AppError, Result},
    repository::{BookingRepository, ClassRepository, PaymentRepository, UserRepository},
};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Database(
                "UNIQUE constraint failed: users.email".to_string(),
            ));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.users.read().await.len() as i64)
    }

    async fn count_active(&self) -> Result<i64> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.active).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryClassRepository {
    classes: RwLock<Vec<GymClass>>,
}

impl InMemoryClassRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClassRepository for InMemoryClassRepository {
    async fn create(&self, class: GymClass) -> Result<GymClass> {
        self.classes.write().await.push(class.clone());
        Ok(class)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<GymClass>> {
        let classes = self.classes.read().await;
        Ok(classes.iter().find(|c| c.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<GymClass>> {
        let mut classes = self.classes.read().await.clone();
        classes.sort_by_key(|c| c.start_time);
        Ok(classes)
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.classes.read().await.len() as i64)
    }

    async fn count_starting_after(&self, instant: DateTime<Utc>) -> Result<i64> {
        let classes = self.classes.read().await;
        Ok(classes.iter().filter(|c| c.start_time > instant).count() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: Booking) -> Result<Booking> {
        // Concurrent callers may interleave between their count and this insert
        tokio::task::yield_now().await;
        self.bookings.write().await.push(booking.clone());
        Ok(booking)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().filter(|b| b.user_id == user_id).cloned().collect())
    }

    async fn count_booked_for_class(&self, class_id: Uuid) -> Result<i64> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|b| b.class_id == class_id && b.status == BookingStatus::Booked)
            .count() as i64)
    }

    async fn update_status(&self, id: Uuid, status: BookingStatus) -> Result<Booking> {
        let mut bookings = self.bookings.write().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;
        booking.status = status;
        booking.updated_at = Utc::now();
        Ok(booking.clone())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.bookings.read().await.len() as i64)
    }
}

#[derive(Default)]
pub struct InMemoryPaymentRepository {
    payments: RwLock<Vec<Payment>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepository {
    async fn create(&self, payment: Payment) -> Result<Payment> {
        self.payments.write().await.push(payment.clone());
        Ok(payment)
    }

    async fn find_by_booking(&self, booking_id: Uuid) -> Result<Option<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.iter().find(|p| p.booking_id == booking_id).cloned())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>> {
        let payments = self.payments.read().await;
        Ok(payments.iter().filter(|p| p.user_id == user_id).cloned().collect())
    }

    async fn total_amount_cents(&self) -> Result<i64> {
        let payments = self.payments.read().await;
        Ok(payments.iter().fold(0i64, |total, p| total.saturating_add(p.amount_cents)))
    }
}
