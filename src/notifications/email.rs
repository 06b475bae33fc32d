use async_trait::async_trait;

use crate::{
    domain::{BookingStatus, decimal_from_cents},
    error::Result,
    notifications::{NotificationEvent, Notifier},
};

/// Writes the email each event would send to the log instead of delivering it.
pub struct EmailLogNotifier;

impl EmailLogNotifier {
    fn render(event: &NotificationEvent) -> (String, String, String) {
        match event {
            NotificationEvent::UserRegistered(user) => (
                user.email.clone(),
                "Welcome to GymFlow".to_string(),
                format!("Hi {}, your {:?} membership is ready.", user.name, user.membership_tier),
            ),
            NotificationEvent::BookingCreated(booking) => {
                let body = match booking.status {
                    BookingStatus::Waitlist => "The class is full; you are on the waitlist.",
                    _ => "Your seat is confirmed.",
                };
                (
                    format!("user:{}", booking.user_id),
                    "Booking received".to_string(),
                    format!("Booking {}: {}", booking.id, body),
                )
            }
            NotificationEvent::BookingCancelled(booking) => (
                format!("user:{}", booking.user_id),
                "Booking cancelled".to_string(),
                format!("Booking {} has been cancelled.", booking.id),
            ),
            NotificationEvent::PaymentRecorded(payment) => (
                format!("user:{}", payment.user_id),
                "Payment received".to_string(),
                format!(
                    "We recorded {:.2} by {} for booking {}.",
                    decimal_from_cents(payment.amount_cents),
                    payment.method,
                    payment.booking_id
                ),
            ),
        }
    }
}

#[async_trait]
impl Notifier for EmailLogNotifier {
    fn name(&self) -> &str {
        "email-log"
    }

    async fn notify(&self, event: &NotificationEvent) -> Result<()> {
        let (to, subject, body) = Self::render(event);
        tracing::info!("[EMAIL] to={} subject={} body={}", to, subject, body);
        Ok(())
    }
}
