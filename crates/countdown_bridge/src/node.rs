use anyhow::Context;
use napi_derive::napi;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::{bridge_from_env, install_tracing, MethodCall, SharedBridge, METHOD_CHANNEL};

static BRIDGE: Lazy<SharedBridge> = Lazy::new(SharedBridge::new);

fn attach_from_env() -> anyhow::Result<crate::NotificationBridge> {
    install_tracing();
    bridge_from_env()
}

#[napi]
pub fn method_channel() -> String {
    METHOD_CHANNEL.to_owned()
}

#[napi]
pub fn handle_method_call(method: String, arguments: Option<Value>) -> napi::Result<Value> {
    BRIDGE
        .with(attach_from_env, |bridge| {
            let call = MethodCall::with_arguments(method, arguments.unwrap_or(Value::Null));
            let response = bridge.handle(&call);
            serde_json::to_value(response).context("failed to encode method response")
        })
        .map_err(to_napi_error)
}

#[napi]
pub fn handle_envelope(raw: String) -> napi::Result<String> {
    BRIDGE
        .with(attach_from_env, |bridge| bridge.handle_envelope(&raw))
        .map_err(to_napi_error)
}

fn to_napi_error(err: anyhow::Error) -> napi::Error {
    napi::Error::new(napi::Status::GenericFailure, format!("{err:#}"))
}
