pub mod user_service;
pub mod booking_service;
pub mod payment_service;
pub mod dashboard_service;

use std::sync::Arc;
use sqlx::SqlitePool;
use crate::auth::TokenIssuer;
use crate::error::{AppError, Result};
use crate::notifications::NotificationManager;
use crate::repository::*;
use user_service::UserService;
use booking_service::BookingService;
use payment_service::PaymentService;
use dashboard_service::DashboardService;

pub struct ServiceContext {
    pub user_service: Arc<UserService>,
    pub booking_service: Arc<BookingService>,
    pub payment_service: Arc<PaymentService>,
    pub dashboard_service: Arc<DashboardService>,
    pub token_issuer: Arc<TokenIssuer>,
    pub notifications: Arc<NotificationManager>,
    pub db_pool: SqlitePool,
}

impl ServiceContext {
    pub fn new(
        db_pool: SqlitePool,
        token_issuer: Arc<TokenIssuer>,
        notifications: Arc<NotificationManager>,
    ) -> Self {
        // Create repositories
        let user_repo = Arc::new(SqliteUserRepository::new(db_pool.clone()));
        let class_repo = Arc::new(SqliteClassRepository::new(db_pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepository::new(db_pool.clone()));
        let payment_repo = Arc::new(SqlitePaymentRepository::new(db_pool.clone()));

        let user_service = Arc::new(UserService::new(
            user_repo.clone(),
            token_issuer.clone(),
            notifications.clone(),
        ));
        let booking_service = Arc::new(BookingService::new(
            class_repo.clone(),
            booking_repo.clone(),
            notifications.clone(),
        ));
        let payment_service = Arc::new(PaymentService::new(
            payment_repo.clone(),
            notifications.clone(),
        ));
        let dashboard_service = Arc::new(DashboardService::new(
            user_repo,
            class_repo,
            booking_repo,
            payment_repo,
        ));

        Self {
            user_service,
            booking_service,
            payment_service,
            dashboard_service,
            token_issuer,
            notifications,
            db_pool,
        }
    }

    pub async fn ping_database(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
