use std::sync::Arc;
use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::{
    domain::*,
    error::{AppError, Result},
    notifications::{NotificationEvent, NotificationManager},
    repository::{BookingRepository, ClassRepository},
};

/// Class catalog and seat bookings.
///
/// Seat allocation counts `booked` rows and then inserts, so the two steps are
/// serialized per class with an in-process lock. This covers a single server
/// instance; several instances sharing one database can still overbook.
/// A class keeps its lock entry only while bookings for it are in flight.
pub struct BookingService {
    classes: Arc<dyn ClassRepository>,
    bookings: Arc<dyn BookingRepository>,
    notifications: Arc<NotificationManager>,
    class_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl BookingService {
    pub fn new(
        classes: Arc<dyn ClassRepository>,
        bookings: Arc<dyn BookingRepository>,
        notifications: Arc<NotificationManager>,
    ) -> Self {
        Self {
            classes,
            bookings,
            notifications,
            class_locks: DashMap::new(),
        }
    }

    pub async fn create_class(&self, creator_id: Uuid, request: CreateClassRequest) -> Result<GymClass> {
        if request.capacity < 1 {
            return Err(AppError::Validation("capacity must be at least 1".to_string()));
        }
        if request.end_time <= request.start_time {
            return Err(AppError::Validation("end_time must be after start_time".to_string()));
        }

        let now = Utc::now();
        let class = GymClass {
            id: Uuid::new_v4(),
            name: request.name,
            description: request.description,
            trainer_id: request.trainer_id.unwrap_or(creator_id),
            capacity: request.capacity,
            start_time: request.start_time,
            end_time: request.end_time,
            price_cents: cents_from_decimal(request.price),
            created_at: now,
            updated_at: now,
        };

        let class = self.classes.create(class).await?;
        tracing::info!("Created class {} ({}) with capacity {}", class.id, class.name, class.capacity);
        Ok(class)
    }

    pub async fn list_classes(&self) -> Result<Vec<GymClass>> {
        self.classes.list().await
    }

    pub async fn create_booking(&self, user_id: Uuid, class_id: Uuid) -> Result<Booking> {
        let class = self.classes.find_by_id(class_id).await?
            .ok_or_else(|| AppError::NotFound("Class not found".to_string()))?;

        let lock = self.class_locks.entry(class.id).or_default().clone();
        let allocated = {
            let _guard = lock.lock().await;
            self.allocate_seat(&class, user_id).await
        };
        drop(lock);
        // Only the map still holds the lock once no booking for this class is in flight
        self.class_locks.remove_if(&class.id, |_, held| Arc::strong_count(held) == 1);
        let booking = allocated?;

        self.notifications
            .dispatch(NotificationEvent::BookingCreated(booking.clone()))
            .await;

        Ok(booking)
    }

    async fn allocate_seat(&self, class: &GymClass, user_id: Uuid) -> Result<Booking> {
        let booked = self.bookings.count_booked_for_class(class.id).await?;
        let status = BookingStatus::for_occupancy(booked, class.capacity);
        if status == BookingStatus::Waitlist {
            tracing::info!(
                "Class {} is full ({}/{}), waitlisting user {}",
                class.id, booked, class.capacity, user_id
            );
        }

        let now = Utc::now();
        self.bookings.create(Booking {
            id: Uuid::new_v4(),
            user_id,
            class_id: class.id,
            status,
            payment_status: BookingPaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }).await
    }

    /// Marks the caller's booking cancelled. Repeating the call on a cancelled
    /// booking succeeds again, and no waitlisted booking is promoted.
    pub async fn cancel_booking(&self, user_id: Uuid, booking_id: Uuid) -> Result<Booking> {
        let booking = self.bookings.find_by_id(booking_id).await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != user_id {
            return Err(AppError::Forbidden("cannot cancel another user's booking".to_string()));
        }

        let cancelled = self.bookings.update_status(booking.id, BookingStatus::Cancelled).await?;

        self.notifications
            .dispatch(NotificationEvent::BookingCancelled(cancelled.clone()))
            .await;

        Ok(cancelled)
    }

    pub async fn list_bookings(&self, user_id: Uuid) -> Result<Vec<Booking>> {
        self.bookings.list_by_user(user_id).await
    }
}
