//! Desktop notification backend for hosted runs outside a mobile shell.

use std::collections::HashMap;

use notify_rust::{Notification, Timeout};
use parking_lot::Mutex;

use crate::{
    backend::{NotificationBackend, PostStatus},
    channel::{ChannelDescriptor, SoundRef},
    error::{NotifyError, Result},
    notification::NotificationInstance,
    permission::PermissionState,
    platform::Capabilities,
};

const ALARM_SOUND_NAME: &str = "alarm-clock-elapsed";
const NOTIFICATION_SOUND_NAME: &str = "message-new-instant";

pub struct DesktopBackend {
    app_name: String,
    /// Caller id -> id the notification server assigned. Servers treat a
    /// replaces-id of 0 as "new", so caller ids are never sent as-is.
    server_ids: Mutex<HashMap<i32, u32>>,
}

impl DesktopBackend {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            server_ids: Mutex::new(HashMap::new()),
        }
    }

    fn sound_name(sound: &SoundRef) -> &str {
        match sound {
            SoundRef::DefaultAlarm => ALARM_SOUND_NAME,
            SoundRef::DefaultNotification => NOTIFICATION_SOUND_NAME,
            SoundRef::Named(name) => name,
        }
    }

    /// Server id to replace when re-posting `id`, if one was shown before.
    #[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
    fn replaces_id(&self, id: i32) -> Option<u32> {
        self.server_ids.lock().get(&id).copied()
    }

    #[cfg_attr(not(all(unix, not(target_os = "macos"))), allow(dead_code))]
    fn remember_server_id(&self, id: i32, server_id: u32) {
        if server_id != 0 {
            self.server_ids.lock().insert(id, server_id);
        }
    }

    fn toast(&self, notification: &NotificationInstance) -> Notification {
        let mut toast = Notification::new();
        toast
            .appname(&self.app_name)
            .summary(&notification.title)
            .body(&notification.body)
            .sound_name(Self::sound_name(&notification.sound))
            .timeout(if notification.ongoing {
                Timeout::Never
            } else {
                Timeout::Default
            });
        toast
    }
}

impl NotificationBackend for DesktopBackend {
    fn capabilities(&self) -> Capabilities {
        Capabilities::legacy()
    }

    fn create_channel(&self, channel: &ChannelDescriptor) -> Result<()> {
        tracing::debug!(channel = %channel.id, "desktop notifications have no channels");
        Ok(())
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    fn post(&self, notification: &NotificationInstance) -> Result<PostStatus> {
        let mut toast = self.toast(notification);
        toast.urgency(notify_rust::Urgency::Critical);
        if let Some(server_id) = self.replaces_id(notification.id) {
            toast.id(server_id);
        }
        let handle = toast
            .show()
            .map_err(|err| NotifyError::platform("post", err.to_string()))?;
        self.remember_server_id(notification.id, handle.id());
        Ok(PostStatus::Displayed)
    }

    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn post(&self, notification: &NotificationInstance) -> Result<PostStatus> {
        self.toast(notification)
            .show()
            .map(|_| PostStatus::Displayed)
            .map_err(|err| NotifyError::platform("post", err.to_string()))
    }

    fn permission_state(&self, _permission: &str) -> PermissionState {
        PermissionState::Granted
    }

    fn request_permission(&self, permission: &str, _request_code: i32) -> Result<()> {
        tracing::debug!(%permission, "desktop notifications need no runtime permission");
        Ok(())
    }
}
