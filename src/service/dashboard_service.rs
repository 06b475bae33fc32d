use std::sync::Arc;
use chrono::Utc;
use crate::{
    domain::{DashboardReport, decimal_from_cents},
    error::Result,
    repository::{BookingRepository, ClassRepository, PaymentRepository, UserRepository},
};

pub struct DashboardService {
    users: Arc<dyn UserRepository>,
    classes: Arc<dyn ClassRepository>,
    bookings: Arc<dyn BookingRepository>,
    payments: Arc<dyn PaymentRepository>,
}

impl DashboardService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        classes: Arc<dyn ClassRepository>,
        bookings: Arc<dyn BookingRepository>,
        payments: Arc<dyn PaymentRepository>,
    ) -> Self {
        Self { users, classes, bookings, payments }
    }

    pub async fn get_dashboard(&self) -> Result<DashboardReport> {
        let now = Utc::now();

        Ok(DashboardReport {
            total_users: self.users.count().await?,
            total_classes: self.classes.count().await?,
            total_bookings: self.bookings.count().await?,
            total_revenue: decimal_from_cents(self.payments.total_amount_cents().await?),
            active_members: self.users.count_active().await?,
            upcoming_classes: self.classes.count_starting_after(now).await?,
        })
    }
}
