use anyhow::Result;
use countdown_notify::{
    channel::{
        ChannelDescriptor, DEFAULT_CHANNEL_DESCRIPTION, DEFAULT_CHANNEL_ID, DEFAULT_CHANNEL_NAME,
    },
    memory::InMemoryBackend,
    notification::DEFAULT_SMALL_ICON,
    permission::PermissionState,
    NotificationBackend, NotificationService,
};
use tracing::info;

/// SDK level assumed when the host does not report one.
pub const DEFAULT_SDK_LEVEL: u32 = 34;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BridgeConfig {
    pub(crate) channel_id: String,
    pub(crate) channel_name: String,
    pub(crate) channel_description: String,
    pub(crate) small_icon: String,
    pub(crate) sdk_level: u32,
    pub(crate) permission_granted: bool,
}

impl BridgeConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|key| std::env::var(key).ok()))
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(id) = non_empty(lookup("COUNTDOWN_CHANNEL_ID")) {
            info!(channel = %id, "using configured notification channel");
            config.channel_id = id;
        }
        if let Some(name) = non_empty(lookup("COUNTDOWN_CHANNEL_NAME")) {
            config.channel_name = name;
        }
        if let Some(description) = non_empty(lookup("COUNTDOWN_CHANNEL_DESCRIPTION")) {
            config.channel_description = description;
        }
        if let Some(icon) = non_empty(lookup("COUNTDOWN_SMALL_ICON")) {
            config.small_icon = icon;
        }
        if let Some(level) = lookup("COUNTDOWN_SDK_LEVEL") {
            if let Ok(value) = level.trim().parse::<u32>() {
                if value > 0 {
                    config.sdk_level = value;
                }
            }
        }
        if let Some(granted) = lookup("COUNTDOWN_PERMISSION_GRANTED") {
            if let Ok(value) = granted.trim().parse::<bool>() {
                config.permission_granted = value;
            }
        }
        config
    }

    pub fn channel(&self) -> ChannelDescriptor {
        ChannelDescriptor::alarm(
            self.channel_id.as_str(),
            self.channel_name.as_str(),
            self.channel_description.as_str(),
        )
    }

    pub fn sdk_level(&self) -> u32 {
        self.sdk_level
    }

    pub fn service(&self, backend: Box<dyn NotificationBackend>) -> NotificationService {
        NotificationService::builder()
            .channel(self.channel())
            .small_icon(self.small_icon.as_str())
            .build(backend)
    }

    /// Platform backend used when the host supplies no adapter of its own.
    #[cfg(feature = "desktop")]
    pub fn default_backend(&self) -> Result<Box<dyn NotificationBackend>> {
        Ok(Box::new(countdown_notify::desktop::DesktopBackend::new(
            self.channel_name.as_str(),
        )))
    }

    #[cfg(not(feature = "desktop"))]
    pub fn default_backend(&self) -> Result<Box<dyn NotificationBackend>> {
        anyhow::bail!("no platform notification backend compiled in; enable the `desktop` feature")
    }

    /// Simulated notification manager shaped by `COUNTDOWN_SDK_LEVEL` and
    /// `COUNTDOWN_PERMISSION_GRANTED`. Opt-in only; nothing reaches a screen.
    pub fn in_memory_backend(&self) -> InMemoryBackend {
        InMemoryBackend::for_sdk(self.sdk_level)
            .with_permission(PermissionState::from(self.permission_granted))
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_id: DEFAULT_CHANNEL_ID.to_string(),
            channel_name: DEFAULT_CHANNEL_NAME.to_string(),
            channel_description: DEFAULT_CHANNEL_DESCRIPTION.to_string(),
            small_icon: DEFAULT_SMALL_ICON.to_string(),
            sdk_level: DEFAULT_SDK_LEVEL,
            permission_granted: false,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}
