//! User model shared by the list and detail stores.

use std::fmt;

use serde::{Deserialize, Serialize};

/// User の識別子
///
/// 上流の API は数値 ID と文字列 ID のどちらも返し得るので、両方を保持します。
/// 比較やルーティングでは `to_string()` した値を使います。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(u64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        UserId::Number(value)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        UserId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn new(id: impl Into<UserId>, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            address: None,
            phone: None,
        }
    }

    /// Route parameters are strings, so matching goes through the display form.
    pub fn matches_id(&self, id: &str) -> bool {
        self.id.to_string() == id
    }
}
