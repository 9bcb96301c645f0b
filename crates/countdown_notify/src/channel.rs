use serde::{Deserialize, Serialize};

pub const DEFAULT_CHANNEL_ID: &str = "activity_countdown";
pub const DEFAULT_CHANNEL_NAME: &str = "Activity Countdown";
pub const DEFAULT_CHANNEL_DESCRIPTION: &str = "Notifications for activity time limits";

/// Off/on durations in milliseconds, timer style. Shared by the channel and
/// every notification posted to it.
pub const ALARM_VIBRATION_PATTERN: [u64; 8] = [0, 500, 200, 500, 200, 500, 200, 500];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum Importance {
    Min,
    Low,
    Default,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ContentType {
    Sonification,
    Music,
    Speech,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Usage {
    Alarm,
    Notification,
}

/// Decides which system sound category a channel plays through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AudioAttributes {
    pub content_type: ContentType,
    pub usage: Usage,
}

impl AudioAttributes {
    pub fn alarm() -> Self {
        Self {
            content_type: ContentType::Sonification,
            usage: Usage::Alarm,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum SoundRef {
    DefaultAlarm,
    DefaultNotification,
    Named(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
    pub importance: Importance,
    pub vibration_enabled: bool,
    pub lights_enabled: bool,
    pub sound: SoundRef,
    pub audio: AudioAttributes,
    pub vibration_pattern: Vec<u64>,
}

impl ChannelDescriptor {
    /// High-importance alarm channel with vibration and lights enabled.
    pub fn alarm(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            importance: Importance::High,
            vibration_enabled: true,
            lights_enabled: true,
            sound: SoundRef::DefaultAlarm,
            audio: AudioAttributes::alarm(),
            vibration_pattern: ALARM_VIBRATION_PATTERN.to_vec(),
        }
    }
}

impl Default for ChannelDescriptor {
    fn default() -> Self {
        Self::alarm(
            DEFAULT_CHANNEL_ID,
            DEFAULT_CHANNEL_NAME,
            DEFAULT_CHANNEL_DESCRIPTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_channel_is_a_loud_alarm() {
        let channel = ChannelDescriptor::default();
        assert_eq!(channel.id, "activity_countdown");
        assert_eq!(channel.importance, Importance::High);
        assert!(channel.vibration_enabled && channel.lights_enabled);
        assert_eq!(channel.audio.usage, Usage::Alarm);
        assert_eq!(channel.audio.content_type, ContentType::Sonification);
        assert_eq!(
            channel.vibration_pattern,
            vec![0, 500, 200, 500, 200, 500, 200, 500]
        );
    }
}
