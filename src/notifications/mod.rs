use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::domain::{Booking, Payment, User};
use crate::error::Result;

pub mod email;

pub use email::EmailLogNotifier;

#[derive(Debug, Clone)]
pub enum NotificationEvent {
    UserRegistered(User),
    BookingCreated(Booking),
    BookingCancelled(Booking),
    PaymentRecorded(Payment),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;
    async fn notify(&self, event: &NotificationEvent) -> Result<()>;
}

/// Fans domain events out to every registered notifier. A failing notifier
/// is logged and skipped; it never fails the request that raised the event.
pub struct NotificationManager {
    notifiers: RwLock<Vec<Arc<dyn Notifier>>>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self {
            notifiers: RwLock::new(Vec::new()),
        }
    }

    pub async fn register(&self, notifier: Arc<dyn Notifier>) {
        tracing::info!("Registered notifier: {}", notifier.name());
        self.notifiers.write().await.push(notifier);
    }

    pub async fn dispatch(&self, event: NotificationEvent) {
        let notifiers = self.notifiers.read().await;

        for notifier in notifiers.iter() {
            match notifier.notify(&event).await {
                Ok(_) => {
                    tracing::debug!("Notifier {} handled event", notifier.name());
                }
                Err(e) => {
                    tracing::error!(
                        "Notifier {} failed to handle event: {:?}",
                        notifier.name(),
                        e
                    );
                }
            }
        }
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingPaymentStatus, BookingStatus};
    use crate::error::AppError;
    use chrono::Utc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uuid::Uuid;

    struct Failing;

    #[async_trait]
    impl Notifier for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        async fn notify(&self, _event: &NotificationEvent) -> Result<()> {
            Err(AppError::Internal("smtp unreachable".to_string()))
        }
    }

    #[derive(Default)]
    struct Counting(AtomicUsize);

    #[async_trait]
    impl Notifier for Counting {
        fn name(&self) -> &str {
            "counting"
        }

        async fn notify(&self, _event: &NotificationEvent) -> Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failing_notifier_does_not_stop_others() {
        let manager = NotificationManager::new();
        let counting = Arc::new(Counting::default());
        manager.register(Arc::new(Failing)).await;
        manager.register(counting.clone()).await;

        let booking = Booking {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            class_id: Uuid::new_v4(),
            status: BookingStatus::Booked,
            payment_status: BookingPaymentStatus::Pending,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        manager.dispatch(NotificationEvent::BookingCreated(booking)).await;

        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
    }
}
