use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Post-authentication / post-confirmation trigger payload.
///
/// Only the two identifiers are typed. Everything else, including the
/// `request` attribute bag, stays raw JSON in `extra` so the event is handed
/// back to Cognito exactly as it arrived.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitoTriggerEvent {
    pub user_pool_id: String,
    pub user_name: String,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

impl CognitoTriggerEvent {
    pub fn new(user_pool_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_pool_id: user_pool_id.into(),
            user_name: user_name.into(),
            extra: HashMap::new(),
        }
    }

    /// `PostAuthentication_Authentication`, `PostConfirmation_ConfirmSignUp`, ...
    pub fn trigger_source(&self) -> Option<&str> {
        self.extra.get("triggerSource").and_then(Value::as_str)
    }

    /// `request.userAttributes`, when present and an object
    pub fn user_attributes(&self) -> Option<&Map<String, Value>> {
        self.extra
            .get("request")
            .and_then(|request| request.get("userAttributes"))
            .and_then(Value::as_object)
    }
}

/// One "add user to group" call. The group always comes from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupAssignmentRequest {
    pub group_name: String,
    pub user_pool_id: String,
    pub username: String,
}

impl GroupAssignmentRequest {
    pub fn new(group_name: &str, user_pool_id: &str, username: &str) -> Self {
        Self {
            group_name: group_name.to_string(),
            user_pool_id: user_pool_id.to_string(),
            username: username.to_string(),
        }
    }
}
