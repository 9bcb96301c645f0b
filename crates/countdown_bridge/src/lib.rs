pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod method;
#[cfg(feature = "node")]
mod node;
pub mod shared;

pub use crate::config::BridgeConfig;
pub use crate::dispatch::NotificationBridge;
pub use crate::envelope::{MethodCall, MethodResponse};
pub use crate::method::{Method, METHOD_CHANNEL};
pub use crate::shared::SharedBridge;

/// Installs the fmt subscriber for host processes; later calls are no-ops.
pub fn install_tracing() {
    let _ = tracing_subscriber::fmt::try_init();
}

/// Builds a bridge from the environment on the platform backend. Fails when
/// the crate was built without one.
pub fn bridge_from_env() -> anyhow::Result<NotificationBridge> {
    let config = BridgeConfig::from_env()?;
    let service = config.service(config.default_backend()?);
    NotificationBridge::attach(service)
}
