use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    backend::{NotificationBackend, PostStatus},
    channel::ChannelDescriptor,
    error::{NotifyError, Result},
    notification::NotificationInstance,
    permission::PermissionState,
    platform::Capabilities,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostedNotification {
    pub notification: NotificationInstance,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PermissionRequestRecord {
    pub permission: String,
    pub request_code: i32,
    pub requested_at: DateTime<Utc>,
}

/// In-process notification manager behaving like the OS one: channels and
/// notifications are keyed by id, so re-creating or re-posting overwrites.
pub struct InMemoryBackend {
    capabilities: Capabilities,
    granted: RwLock<bool>,
    channels: RwLock<HashMap<String, ChannelDescriptor>>,
    active: RwLock<HashMap<i32, PostedNotification>>,
    requests: RwLock<Vec<PermissionRequestRecord>>,
}

impl InMemoryBackend {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            granted: RwLock::new(false),
            channels: RwLock::new(HashMap::new()),
            active: RwLock::new(HashMap::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn for_sdk(level: u32) -> Self {
        Self::new(Capabilities::for_sdk(level))
    }

    pub fn with_permission(self, state: PermissionState) -> Self {
        *self.granted.write() = state.is_granted();
        self
    }

    /// Simulates the user answering a pending permission prompt.
    pub fn set_permission(&self, state: PermissionState) {
        *self.granted.write() = state.is_granted();
    }

    pub fn channels(&self) -> Vec<ChannelDescriptor> {
        let mut channels: Vec<ChannelDescriptor> =
            self.channels.read().values().cloned().collect();
        channels.sort_by(|a, b| a.id.cmp(&b.id));
        channels
    }

    pub fn channel(&self, id: &str) -> Option<ChannelDescriptor> {
        self.channels.read().get(id).cloned()
    }

    /// Currently displayed notifications, ordered by id.
    pub fn active(&self) -> Vec<PostedNotification> {
        let mut active: Vec<PostedNotification> =
            self.active.read().values().cloned().collect();
        active.sort_by_key(|posted| posted.notification.id);
        active
    }

    pub fn notification(&self, id: i32) -> Option<NotificationInstance> {
        self.active
            .read()
            .get(&id)
            .map(|posted| posted.notification.clone())
    }

    /// Tapping an auto-cancel notification dismisses it.
    pub fn tap(&self, id: i32) -> Option<NotificationInstance> {
        let mut active = self.active.write();
        let tapped = active.get(&id).map(|posted| posted.notification.clone())?;
        if tapped.auto_cancel {
            active.remove(&id);
        }
        Some(tapped)
    }

    pub fn permission_requests(&self) -> Vec<PermissionRequestRecord> {
        self.requests.read().clone()
    }
}

impl NotificationBackend for InMemoryBackend {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn create_channel(&self, channel: &ChannelDescriptor) -> Result<()> {
        if !self.capabilities.channels {
            return Err(NotifyError::platform(
                "create_channel",
                "channels are not available on this platform",
            ));
        }
        self.channels
            .write()
            .insert(channel.id.clone(), channel.clone());
        Ok(())
    }

    fn post(&self, notification: &NotificationInstance) -> Result<PostStatus> {
        if notification.small_icon.trim().is_empty() {
            return Err(NotifyError::platform("post", "invalid small icon resource"));
        }
        let registered = self.channels.read().contains_key(&notification.channel_id);
        if self.capabilities.channels && !registered {
            // The OS drops notifications aimed at unknown channels without raising.
            tracing::warn!(
                channel = %notification.channel_id,
                id = notification.id,
                "dropping notification for unregistered channel"
            );
            return Ok(PostStatus::DroppedUnknownChannel);
        }
        self.active.write().insert(
            notification.id,
            PostedNotification {
                notification: notification.clone(),
                posted_at: Utc::now(),
            },
        );
        Ok(PostStatus::Displayed)
    }

    fn permission_state(&self, _permission: &str) -> PermissionState {
        if !self.capabilities.runtime_permission {
            return PermissionState::Granted;
        }
        PermissionState::from(*self.granted.read())
    }

    fn request_permission(&self, permission: &str, request_code: i32) -> Result<()> {
        self.requests.write().push(PermissionRequestRecord {
            permission: permission.to_string(),
            request_code,
            requested_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reposting_same_id_replaces() {
        let backend = InMemoryBackend::for_sdk(34).with_permission(PermissionState::Granted);
        backend.create_channel(&ChannelDescriptor::default()).unwrap();
        let first = NotificationInstance::builder("activity_countdown")
            .id(3)
            .title("first")
            .build();
        let second = NotificationInstance::builder("activity_countdown")
            .id(3)
            .title("second")
            .build();
        backend.post(&first).unwrap();
        backend.post(&second).unwrap();

        let active = backend.active();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].notification.title, "second");
    }

    #[test]
    fn unknown_channel_is_dropped_silently() {
        let backend = InMemoryBackend::for_sdk(30);
        let notification = NotificationInstance::builder("missing").build();
        assert_eq!(
            backend.post(&notification).unwrap(),
            PostStatus::DroppedUnknownChannel
        );
        assert!(backend.active().is_empty());
    }

    #[test]
    fn tap_dismisses_auto_cancel_notifications() {
        let backend = InMemoryBackend::for_sdk(21);
        backend
            .post(&NotificationInstance::builder("any").id(1).build())
            .unwrap();
        assert!(backend.tap(1).is_some());
        assert!(backend.active().is_empty());
        assert!(backend.tap(1).is_none());
    }

    #[test]
    fn empty_icon_is_a_platform_error() {
        let backend = InMemoryBackend::for_sdk(21);
        let notification = NotificationInstance::builder("any").small_icon("").build();
        assert!(matches!(
            backend.post(&notification),
            Err(NotifyError::Platform { operation: "post", .. })
        ));
    }

    #[test]
    fn legacy_platforms_are_always_granted() {
        let backend = InMemoryBackend::for_sdk(29);
        assert_eq!(
            backend.permission_state(crate::permission::POST_NOTIFICATIONS),
            PermissionState::Granted
        );
    }
}
