use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated TaskMind user.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The project this account belongs to.
    pub project_id: String,
    /// The user's unique identifier.
    pub uid: String,
    /// The user's display name. Empty if the account has none.
    #[serde(default, deserialize_with = "crate::serde::deserialize_null_default")]
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// Account creation time in epoch milliseconds.
    pub created_time: i64,
    /// Last login time in epoch milliseconds.
    pub last_login_time: i64,
}

impl User {
    /// The account creation time, if it is representable.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.created_time)
    }

    /// The last login time, if it is representable.
    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.last_login_time)
    }
}

#[derive(Serialize, Debug)]
pub(crate) struct SendCodeRequest {
    pub email: String,
}

#[derive(Serialize, Debug)]
pub(crate) struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Deserialize, Debug)]
pub(crate) struct VerifyCodeResponse {
    pub user: User,
}
