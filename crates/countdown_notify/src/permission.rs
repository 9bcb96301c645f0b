use serde::{Deserialize, Serialize};

pub const POST_NOTIFICATIONS: &str = "android.permission.POST_NOTIFICATIONS";
/// Carries no meaning; the request result is never observed.
pub const PERMISSION_REQUEST_CODE: i32 = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionState {
    Granted,
    Denied,
}

impl PermissionState {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionState::Granted)
    }
}

impl From<bool> for PermissionState {
    fn from(granted: bool) -> Self {
        if granted {
            PermissionState::Granted
        } else {
            PermissionState::Denied
        }
    }
}

/// What `request_permission` did. `Requested` says nothing about the answer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionRequest {
    NotRequired,
    AlreadyGranted,
    Requested,
}
