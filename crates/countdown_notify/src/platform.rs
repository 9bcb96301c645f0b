use serde::{Deserialize, Serialize};

/// First SDK level with channel-scoped notifications (Android O).
pub const SDK_CHANNELS: u32 = 26;
/// First SDK level that gates posting behind a runtime permission (Android 13).
pub const SDK_RUNTIME_PERMISSION: u32 = 33;

/// What the host notification subsystem supports.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Capabilities {
    pub channels: bool,
    pub runtime_permission: bool,
}

impl Capabilities {
    pub fn for_sdk(level: u32) -> Self {
        Self {
            channels: level >= SDK_CHANNELS,
            runtime_permission: level >= SDK_RUNTIME_PERMISSION,
        }
    }

    pub fn legacy() -> Self {
        Self {
            channels: false,
            runtime_permission: false,
        }
    }

    pub fn modern() -> Self {
        Self {
            channels: true,
            runtime_permission: true,
        }
    }
}
