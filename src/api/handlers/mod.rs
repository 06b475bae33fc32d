pub mod root;
pub mod auth;
pub mod classes;
pub mod bookings;
pub mod payments;
pub mod admin;
