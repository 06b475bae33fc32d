pub mod user;
pub mod gym_class;
pub mod booking;
pub mod payment;
pub mod dashboard;

pub use user::*;
pub use gym_class::*;
pub use booking::*;
pub use payment::*;
pub use dashboard::*;
