pub mod backend;
pub mod channel;
#[cfg(feature = "desktop")]
pub mod desktop;
pub mod error;
pub mod memory;
pub mod notification;
pub mod permission;
pub mod platform;
pub mod service;

pub use crate::backend::NotificationBackend;
pub use crate::error::NotifyError;
pub use crate::service::{NotificationService, NotificationServiceBuilder};
