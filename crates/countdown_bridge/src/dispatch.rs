use std::collections::HashMap;

use anyhow::{Context, Result};
use countdown_notify::{error::NotifyError, NotificationService};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    envelope::{decode_call, encode_response, MethodCall, MethodResponse},
    method::{Method, ShowNotificationArgs},
};

type Handler = fn(&NotificationService, &Map<String, Value>) -> Result<(), NotifyError>;

/// Routes host method calls to the notification service. Each call runs to
/// completion on the calling thread.
pub struct NotificationBridge {
    service: NotificationService,
    handlers: HashMap<&'static str, Handler>,
}

impl NotificationBridge {
    pub fn new(service: NotificationService) -> Self {
        let handlers = Method::ALL
            .into_iter()
            .map(|method| (method.name(), handler_for(method)))
            .collect();
        Self { service, handlers }
    }

    /// Wires the bridge to the host and registers the channel up front.
    pub fn attach(service: NotificationService) -> Result<Self> {
        let bridge = Self::new(service);
        let channel_id = bridge.service.channel().id.clone();
        let outcome = bridge
            .service
            .create_channel()
            .with_context(|| format!("failed to register channel `{channel_id}`"))?;
        info!(?outcome, "notification bridge attached");
        Ok(bridge)
    }

    pub fn service(&self) -> &NotificationService {
        &self.service
    }

    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        let Some(handler) = self.handlers.get(call.method.as_str()) else {
            debug!(method = %call.method, "method not implemented");
            return MethodResponse::NotImplemented;
        };
        match handler(&self.service, &call.arguments) {
            Ok(()) => MethodResponse::success(),
            Err(err) => {
                warn!(method = %call.method, %err, "method call failed");
                MethodResponse::from(err)
            }
        }
    }

    /// Wire entry: JSON call envelope in, JSON response envelope out.
    pub fn handle_envelope(&self, raw: &str) -> Result<String> {
        let response = match decode_call(raw) {
            Ok(call) => self.handle(&call),
            Err(err) => MethodResponse::error("bad_envelope", format!("{err:#}"), None),
        };
        encode_response(&response)
    }
}

fn handler_for(method: Method) -> Handler {
    match method {
        Method::CreateNotificationChannel => create_channel,
        Method::ShowNotification => show_notification,
        Method::RequestNotificationPermission => request_permission,
    }
}

fn create_channel(
    service: &NotificationService,
    _: &Map<String, Value>,
) -> Result<(), NotifyError> {
    service.create_channel().map(|_| ())
}

fn show_notification(
    service: &NotificationService,
    arguments: &Map<String, Value>,
) -> Result<(), NotifyError> {
    let args = ShowNotificationArgs::from_arguments(arguments);
    let delivery = service.show_notification(args.id, &args.title, &args.body)?;
    debug!(id = args.id, ?delivery, "showNotification handled");
    Ok(())
}

fn request_permission(
    service: &NotificationService,
    _: &Map<String, Value>,
) -> Result<(), NotifyError> {
    service.request_permission().map(|_| ())
}
