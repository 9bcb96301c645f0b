use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    backend::{NotificationBackend, PostStatus},
    channel::ChannelDescriptor,
    error::Result,
    notification::{NotificationInstance, DEFAULT_SMALL_ICON},
    permission::{
        PermissionRequest, PermissionState, PERMISSION_REQUEST_CODE, POST_NOTIFICATIONS,
    },
    platform::Capabilities,
};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChannelOutcome {
    Created,
    Unsupported,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Delivery {
    Posted,
    SkippedNoPermission,
    /// The host accepted the post but dropped it for lack of a channel.
    DroppedNoChannel,
}

/// Channel manager, presenter and permission requester over one backend.
/// Holds configuration only; every call is a single pass-through to the host.
pub struct NotificationService {
    channel: ChannelDescriptor,
    small_icon: String,
    backend: Box<dyn NotificationBackend>,
}

pub struct NotificationServiceBuilder {
    channel: ChannelDescriptor,
    small_icon: String,
}

impl NotificationServiceBuilder {
    pub fn new() -> Self {
        Self {
            channel: ChannelDescriptor::default(),
            small_icon: DEFAULT_SMALL_ICON.to_string(),
        }
    }

    pub fn channel(mut self, channel: ChannelDescriptor) -> Self {
        self.channel = channel;
        self
    }

    pub fn small_icon(mut self, icon: impl Into<String>) -> Self {
        self.small_icon = icon.into();
        self
    }

    pub fn build(self, backend: Box<dyn NotificationBackend>) -> NotificationService {
        NotificationService {
            channel: self.channel,
            small_icon: self.small_icon,
            backend,
        }
    }
}

impl Default for NotificationServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationService {
    pub fn builder() -> NotificationServiceBuilder {
        NotificationServiceBuilder::new()
    }

    pub fn channel(&self) -> &ChannelDescriptor {
        &self.channel
    }

    pub fn capabilities(&self) -> Capabilities {
        self.backend.capabilities()
    }

    #[instrument(skip(self), fields(channel = %self.channel.id))]
    pub fn create_channel(&self) -> Result<ChannelOutcome> {
        if !self.capabilities().channels {
            tracing::debug!("platform has no notification channels");
            return Ok(ChannelOutcome::Unsupported);
        }
        self.backend.create_channel(&self.channel)?;
        Ok(ChannelOutcome::Created)
    }

    pub fn build_notification(&self, id: i32, title: &str, body: &str) -> NotificationInstance {
        NotificationInstance::builder(self.channel.id.as_str())
            .id(id)
            .title(title)
            .body(body)
            .small_icon(self.small_icon.as_str())
            .build()
    }

    #[instrument(skip(self, title, body))]
    pub fn show_notification(&self, id: i32, title: &str, body: &str) -> Result<Delivery> {
        let notification = self.build_notification(id, title, body);
        if self.capabilities().runtime_permission && !self.permission_state().is_granted() {
            tracing::debug!("notification permission missing; skipping display");
            return Ok(Delivery::SkippedNoPermission);
        }
        match self.backend.post(&notification)? {
            PostStatus::Displayed => Ok(Delivery::Posted),
            PostStatus::DroppedUnknownChannel => {
                tracing::warn!(
                    channel = %self.channel.id,
                    "channel missing; notification not shown"
                );
                Ok(Delivery::DroppedNoChannel)
            }
        }
    }

    pub fn permission_state(&self) -> PermissionState {
        self.backend.permission_state(POST_NOTIFICATIONS)
    }

    #[instrument(skip(self))]
    pub fn request_permission(&self) -> Result<PermissionRequest> {
        if !self.capabilities().runtime_permission {
            return Ok(PermissionRequest::NotRequired);
        }
        if self.permission_state().is_granted() {
            return Ok(PermissionRequest::AlreadyGranted);
        }
        self.backend
            .request_permission(POST_NOTIFICATIONS, PERMISSION_REQUEST_CODE)?;
        tracing::info!(permission = POST_NOTIFICATIONS, "requested notification permission");
        Ok(PermissionRequest::Requested)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::InMemoryBackend;

    fn service_on(backend: &Arc<InMemoryBackend>) -> NotificationService {
        NotificationService::builder().build(Box::new(Arc::clone(backend)))
    }

    #[test]
    fn channel_creation_is_a_no_op_before_oreo() {
        let backend = Arc::new(InMemoryBackend::for_sdk(25));
        let service = service_on(&backend);
        assert_eq!(service.create_channel().unwrap(), ChannelOutcome::Unsupported);
        assert!(backend.channels().is_empty());
    }

    #[test]
    fn repeated_channel_creation_keeps_one_channel() {
        let backend = Arc::new(InMemoryBackend::for_sdk(34));
        let service = service_on(&backend);
        for _ in 0..3 {
            assert_eq!(service.create_channel().unwrap(), ChannelOutcome::Created);
        }
        assert_eq!(backend.channels().len(), 1);
    }

    #[test]
    fn show_skips_when_permission_denied() {
        let backend = Arc::new(InMemoryBackend::for_sdk(33));
        let service = service_on(&backend);
        service.create_channel().unwrap();
        let delivery = service.show_notification(1, "a", "b").unwrap();
        assert_eq!(delivery, Delivery::SkippedNoPermission);
        assert!(backend.active().is_empty());
    }

    #[test]
    fn show_posts_without_runtime_permission_model() {
        let backend = Arc::new(InMemoryBackend::for_sdk(30));
        let service = service_on(&backend);
        service.create_channel().unwrap();
        assert_eq!(service.show_notification(5, "a", "b").unwrap(), Delivery::Posted);
        assert_eq!(
            backend.notification(5).map(|n| n.channel_id),
            Some("activity_countdown".to_string())
        );
    }

    #[test]
    fn show_reports_drop_when_channel_was_never_created() {
        let backend = Arc::new(InMemoryBackend::for_sdk(30));
        let service = service_on(&backend);
        assert_eq!(
            service.show_notification(5, "a", "b").unwrap(),
            Delivery::DroppedNoChannel
        );
        assert!(backend.active().is_empty());

        service.create_channel().unwrap();
        assert_eq!(service.show_notification(5, "a", "b").unwrap(), Delivery::Posted);
    }

    #[test]
    fn permission_request_is_fire_and_forget() {
        let backend = Arc::new(InMemoryBackend::for_sdk(33));
        let service = service_on(&backend);
        assert_eq!(service.request_permission().unwrap(), PermissionRequest::Requested);
        assert_eq!(service.permission_state(), PermissionState::Denied);

        let requests = backend.permission_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].request_code, 100);
        assert_eq!(requests[0].permission, POST_NOTIFICATIONS);

        backend.set_permission(PermissionState::Granted);
        assert_eq!(service.request_permission().unwrap(), PermissionRequest::AlreadyGranted);
        assert_eq!(backend.permission_requests().len(), 1);
    }

    #[test]
    fn permission_not_required_on_older_platforms() {
        let backend = Arc::new(InMemoryBackend::for_sdk(32));
        let service = service_on(&backend);
        assert_eq!(service.request_permission().unwrap(), PermissionRequest::NotRequired);
        assert!(backend.permission_requests().is_empty());
    }

    #[test]
    fn platform_failure_is_returned() {
        let backend = Arc::new(InMemoryBackend::for_sdk(21));
        let service = NotificationService::builder()
            .small_icon("")
            .build(Box::new(Arc::clone(&backend)));
        assert!(service.show_notification(1, "a", "b").is_err());
    }
}
