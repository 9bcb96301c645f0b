use serde::{Deserialize, Serialize};

use crate::channel::{SoundRef, ALARM_VIBRATION_PATTERN};

pub const DEFAULT_TITLE: &str = "Time is up!";
pub const DEFAULT_BODY: &str = "Activity time limit reached";
pub const DEFAULT_SMALL_ICON: &str = "mipmap/ic_launcher";

/// Opaque blue, as ARGB.
pub const BLUE_ARGB: u32 = 0xFF00_00FF;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Min,
    Low,
    Default,
    High,
    Max,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Category {
    Alarm,
    Reminder,
    Status,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LightPattern {
    pub argb: u32,
    pub on_ms: u32,
    pub off_ms: u32,
}

impl LightPattern {
    pub fn blue_blink() -> Self {
        Self {
            argb: BLUE_ARGB,
            on_ms: 300,
            off_ms: 1000,
        }
    }
}

/// What happens when the user taps the notification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TapAction {
    /// Entry point relaunched on tap; `None` means the app's main entry.
    pub target: Option<String>,
    pub new_task: bool,
    pub clear_task: bool,
    pub update_current: bool,
    pub immutable: bool,
    pub request_code: i32,
}

impl TapAction {
    /// Relaunch the app with a fresh task stack.
    pub fn relaunch_app() -> Self {
        Self {
            target: None,
            new_task: true,
            clear_task: true,
            update_current: true,
            immutable: true,
            request_code: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationInstance {
    pub id: i32,
    pub channel_id: String,
    pub title: String,
    pub body: String,
    pub small_icon: String,
    pub priority: Priority,
    pub category: Category,
    pub auto_cancel: bool,
    pub ongoing: bool,
    pub tap_action: TapAction,
    pub sound: SoundRef,
    pub vibration_pattern: Vec<u64>,
    pub lights: LightPattern,
}

impl NotificationInstance {
    pub fn builder(channel_id: impl Into<String>) -> NotificationBuilder {
        NotificationBuilder::new(channel_id)
    }
}

/// Builds alarm-style notifications; everything but the text has a fixed
/// countdown default.
pub struct NotificationBuilder {
    id: i32,
    channel_id: String,
    title: String,
    body: String,
    small_icon: String,
}

impl NotificationBuilder {
    pub fn new(channel_id: impl Into<String>) -> Self {
        Self {
            id: 0,
            channel_id: channel_id.into(),
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            small_icon: DEFAULT_SMALL_ICON.to_string(),
        }
    }

    pub fn id(mut self, id: i32) -> Self {
        self.id = id;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn small_icon(mut self, icon: impl Into<String>) -> Self {
        self.small_icon = icon.into();
        self
    }

    pub fn build(self) -> NotificationInstance {
        NotificationInstance {
            id: self.id,
            channel_id: self.channel_id,
            title: self.title,
            body: self.body,
            small_icon: self.small_icon,
            priority: Priority::High,
            category: Category::Alarm,
            auto_cancel: true,
            ongoing: false,
            tap_action: TapAction::relaunch_app(),
            sound: SoundRef::DefaultAlarm,
            vibration_pattern: ALARM_VIBRATION_PATTERN.to_vec(),
            lights: LightPattern::blue_blink(),
        }
    }
}
