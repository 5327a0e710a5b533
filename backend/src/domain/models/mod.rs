pub mod activity;
pub mod list;
pub mod member;
pub mod page;
pub mod user;

pub use activity::{Activity, ActivityInstance, ActivityValidationError};
pub use list::{ListStatus, TaskList};
pub use member::{Member, MemberValidationError};
pub use page::{Page, Paged};
pub use user::{AuthToken, TokenClaims, User, UserValidationError};

/// Round a monetary value to two decimal places.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
