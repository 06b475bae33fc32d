use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub class_id: Uuid,
    pub status: BookingStatus,
    pub payment_status: BookingPaymentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Booked,
    Waitlist,
    Cancelled,
}

impl BookingStatus {
    /// Status for a new booking given how many seats are already taken.
    ///
    /// Only `Booked` bookings occupy a seat; waitlisted and cancelled ones
    /// are not part of `booked_count`.
    pub fn for_occupancy(booked_count: i64, capacity: i32) -> Self {
        if booked_count < i64::from(capacity) {
            BookingStatus::Booked
        } else {
            BookingStatus::Waitlist
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingPaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBookingRequest {
    pub class_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seats_fill_then_waitlist() {
        let capacity = 3;
        let statuses: Vec<_> = (0..5)
            .map(|taken| BookingStatus::for_occupancy(taken, capacity))
            .collect();

        assert_eq!(
            statuses,
            vec![
                BookingStatus::Booked,
                BookingStatus::Booked,
                BookingStatus::Booked,
                BookingStatus::Waitlist,
                BookingStatus::Waitlist,
            ]
        );
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(serde_json::to_value(BookingStatus::Waitlist).unwrap(), "waitlist");
        assert_eq!(serde_json::to_value(BookingPaymentStatus::Pending).unwrap(), "pending");
    }
}
