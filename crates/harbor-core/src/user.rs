//! Harbor users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A Harbor user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned user ID.
    #[serde(default)]
    pub user_id: i64,

    /// Login name.
    #[serde(default)]
    pub username: String,

    /// E-mail address.
    #[serde(default)]
    pub email: String,

    /// Display name.
    #[serde(default)]
    pub realname: String,

    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Whether the user is a system administrator.
    #[serde(default)]
    pub sysadmin_flag: bool,

    /// Whether admin rights come from the auth backend.
    #[serde(default)]
    pub admin_role_in_auth: bool,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Request body for creating a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCreationReq {
    /// Login name.
    pub username: String,
    /// E-mail address.
    pub email: String,
    /// Display name.
    pub realname: String,
    /// Initial password.
    pub password: String,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for updating a user's profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// E-mail address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realname: Option<String>,
    /// Free-form comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Request body for changing a password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordReq {
    /// Current password; may be empty when an admin resets it.
    #[serde(default)]
    pub old_password: String,
    /// New password.
    pub new_password: String,
}

/// Request body for granting or revoking system admin rights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSysAdminFlag {
    /// Whether the user is a system administrator.
    pub sysadmin_flag: bool,
}

/// One hit of a user search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSearchResult {
    /// User ID.
    pub user_id: i64,
    /// User name.
    pub username: String,
}
