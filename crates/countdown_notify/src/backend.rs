use serde::{Deserialize, Serialize};

use crate::{
    channel::ChannelDescriptor, error::Result, notification::NotificationInstance,
    permission::PermissionState, platform::Capabilities,
};

/// What the host did with a posted notification.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PostStatus {
    Displayed,
    /// Accepted without error but never shown: the target channel is unknown.
    DroppedUnknownChannel,
}

/// Host notification subsystem. Platform adapters implement this trait; the
/// OS owns everything it persists (channels, displayed notifications, grant
/// state).
pub trait NotificationBackend: Send + Sync {
    fn capabilities(&self) -> Capabilities;

    /// Registers or overwrites the channel with the same id.
    fn create_channel(&self, channel: &ChannelDescriptor) -> Result<()>;

    /// Displays the notification, replacing any shown with the same id.
    fn post(&self, notification: &NotificationInstance) -> Result<PostStatus>;

    fn permission_state(&self, permission: &str) -> PermissionState;

    /// Fires the request and returns without waiting for the user's answer.
    fn request_permission(&self, permission: &str, request_code: i32) -> Result<()>;
}

impl<B: NotificationBackend + ?Sized> NotificationBackend for std::sync::Arc<B> {
    fn capabilities(&self) -> Capabilities {
        (**self).capabilities()
    }

    fn create_channel(&self, channel: &ChannelDescriptor) -> Result<()> {
        (**self).create_channel(channel)
    }

    fn post(&self, notification: &NotificationInstance) -> Result<PostStatus> {
        (**self).post(notification)
    }

    fn permission_state(&self, permission: &str) -> PermissionState {
        (**self).permission_state(permission)
    }

    fn request_permission(&self, permission: &str, request_code: i32) -> Result<()> {
        (**self).request_permission(permission, request_code)
    }
}
