use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::store::Payload;

/// Role of a user in the demo directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Editor,
    Admin,
}

impl Role {
    pub fn next(self) -> Role {
        match self {
            Role::Viewer => Role::Editor,
            Role::Editor => Role::Admin,
            Role::Admin => Role::Viewer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }
}

/// Record edited and deleted through the demo overlays
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Read the user stored under the `user` key of an overlay payload
    pub fn from_payload(payload: &Payload) -> Option<User> {
        payload
            .get("user")
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NextUser,
    PreviousUser,

    // User operations
    EditSelected,
    CycleRole,
    SaveUser,
    UserSaved(User),
    DeleteSelected,
    ConfirmDelete,

    // Overlays
    ToggleHelp,
    ToggleLogs,
    ClearLogs,
    OperationFailed(String),

    // App control
    Quit,
    None,
}
