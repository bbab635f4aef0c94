//! Domain entities - core business objects

mod application;
mod notification;
mod organization;
mod user;

pub use application::{Application, ApplicationStatus};
pub use notification::{Notification, NotificationLevel};
pub use organization::Organization;
pub use user::{Profile, User};
