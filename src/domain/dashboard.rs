use serde::{Deserialize, Serialize};

/// Point-in-time totals for the admin dashboard. Each figure comes from its
/// own query, so the numbers are not a consistent snapshot of one instant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub total_users: i64,
    pub total_classes: i64,
    pub total_bookings: i64,
    /// Sum of every recorded payment, whatever its status.
    pub total_revenue: f64,
    pub active_members: i64,
    pub upcoming_classes: i64,
}
