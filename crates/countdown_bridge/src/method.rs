use countdown_notify::notification::{DEFAULT_BODY, DEFAULT_TITLE};
use serde_json::{Map, Value};

/// Name the host registers the method channel under.
pub const METHOD_CHANNEL: &str = "activity_countdown/notifications";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    CreateNotificationChannel,
    ShowNotification,
    RequestNotificationPermission,
}

impl Method {
    pub const ALL: [Method; 3] = [
        Method::CreateNotificationChannel,
        Method::ShowNotification,
        Method::RequestNotificationPermission,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Method::CreateNotificationChannel => "createNotificationChannel",
            Method::ShowNotification => "showNotification",
            Method::RequestNotificationPermission => "requestNotificationPermission",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowNotificationArgs {
    pub id: i32,
    pub title: String,
    pub body: String,
}

impl Default for ShowNotificationArgs {
    fn default() -> Self {
        Self {
            id: 0,
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
        }
    }
}

impl ShowNotificationArgs {
    /// Absent or mistyped entries fall back to their defaults.
    pub fn from_arguments(arguments: &Map<String, Value>) -> Self {
        let defaults = Self::default();
        Self {
            id: arguments
                .get("id")
                .and_then(Value::as_i64)
                .and_then(|id| i32::try_from(id).ok())
                .unwrap_or(defaults.id),
            title: string_argument(arguments, "title").unwrap_or(defaults.title),
            body: string_argument(arguments, "body").unwrap_or(defaults.body),
        }
    }
}

fn string_argument(arguments: &Map<String, Value>, key: &str) -> Option<String> {
    arguments.get(key).and_then(Value::as_str).map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn method_names_round_trip() {
        for method in Method::ALL {
            assert_eq!(Method::from_name(method.name()), Some(method));
        }
        assert_eq!(Method::from_name("cancelNotification"), None);
        assert_eq!(Method::from_name("ShowNotification"), None);
    }

    #[test]
    fn missing_arguments_use_defaults() {
        let parsed = ShowNotificationArgs::from_arguments(&Map::new());
        assert_eq!(parsed.id, 0);
        assert_eq!(parsed.title, "Time is up!");
        assert_eq!(parsed.body, "Activity time limit reached");
    }

    #[test]
    fn provided_arguments_are_used() {
        let parsed = ShowNotificationArgs::from_arguments(&args(json!({
            "id": 42,
            "title": "Done",
            "body": "Finished",
        })));
        assert_eq!(
            parsed,
            ShowNotificationArgs {
                id: 42,
                title: "Done".into(),
                body: "Finished".into(),
            }
        );
    }

    #[test]
    fn mistyped_arguments_fall_back() {
        let parsed = ShowNotificationArgs::from_arguments(&args(json!({
            "id": "42",
            "title": 7,
            "body": null,
        })));
        assert_eq!(parsed, ShowNotificationArgs::default());

        let overflow = ShowNotificationArgs::from_arguments(&args(json!({ "id": 1_i64 << 40 })));
        assert_eq!(overflow.id, 0);
    }
}
