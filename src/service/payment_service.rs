use std::sync::Arc;
use chrono::Utc;
use uuid::Uuid;
use crate::{
    domain::*,
    error::{AppError, Result},
    notifications::{NotificationEvent, NotificationManager},
    repository::PaymentRepository,
};

pub struct PaymentService {
    repo: Arc<dyn PaymentRepository>,
    notifications: Arc<NotificationManager>,
}

impl PaymentService {
    pub fn new(repo: Arc<dyn PaymentRepository>, notifications: Arc<NotificationManager>) -> Self {
        Self { repo, notifications }
    }

    /// Records a pending payment for a booking. The amount is taken as given;
    /// it is not checked against the class price.
    pub async fn create_payment(&self, user_id: Uuid, request: CreatePaymentRequest) -> Result<Payment> {
        if self.repo.find_by_booking(request.booking_id).await?.is_some() {
            tracing::debug!("Duplicate payment for booking {}", request.booking_id);
            return Err(AppError::Conflict("payment already exists for this booking".to_string()));
        }

        let now = Utc::now();
        let payment = self.repo.create(Payment {
            id: Uuid::new_v4(),
            user_id,
            booking_id: request.booking_id,
            amount_cents: cents_from_decimal(request.amount),
            method: request.method,
            status: PaymentStatus::Pending,
            created_at: now,
            updated_at: now,
        }).await?;

        self.notifications
            .dispatch(NotificationEvent::PaymentRecorded(payment.clone()))
            .await;

        Ok(payment)
    }

    pub async fn list_payments(&self, user_id: Uuid) -> Result<Vec<Payment>> {
        self.repo.list_by_user(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::memory::InMemoryPaymentRepository;

    fn service() -> PaymentService {
        PaymentService::new(
            Arc::new(InMemoryPaymentRepository::new()),
            Arc::new(NotificationManager::new()),
        )
    }

    fn request(booking_id: Uuid, amount: f64) -> CreatePaymentRequest {
        CreatePaymentRequest {
            booking_id,
            amount,
            method: "card".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_payment_starts_pending() {
        let service = service();
        let user_id = Uuid::new_v4();

        let payment = service.create_payment(user_id, request(Uuid::new_v4(), 50.0)).await.unwrap();

        assert_eq!(payment.amount_cents, 5000);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.user_id, user_id);
    }

    #[tokio::test]
    async fn test_second_payment_for_booking_rejected() {
        let service = service();
        let user_id = Uuid::new_v4();
        let booking_id = Uuid::new_v4();

        service.create_payment(user_id, request(booking_id, 50.0)).await.unwrap();
        let second = service.create_payment(user_id, request(booking_id, 50.0)).await;

        assert!(matches!(second, Err(AppError::Conflict(_))));
        assert_eq!(service.list_payments(user_id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_list_payments_only_returns_callers() {
        let service = service();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        service.create_payment(alice, request(Uuid::new_v4(), 50.0)).await.unwrap();
        service.create_payment(alice, request(Uuid::new_v4(), 30.0)).await.unwrap();
        service.create_payment(bob, request(Uuid::new_v4(), 10.0)).await.unwrap();

        let payments = service.list_payments(alice).await.unwrap();
        assert_eq!(payments.len(), 2);
        assert!(payments.iter().all(|p| p.user_id == alice));

        assert!(service.list_payments(Uuid::new_v4()).await.unwrap().is_empty());
    }
}
