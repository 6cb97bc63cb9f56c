//! StoreName - 同期対象 store の名前
//!
//! 名前は固定の literal 文字列で、registry のキー集合そのものです。
//! enum にしておくことで、未知の名前は decode の時点で弾かれ、
//! dispatcher まで届くことがありません。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StoreName {
    #[serde(rename = "usersStore")]
    Users,
    #[serde(rename = "userDetailStore")]
    UserDetail,
}

impl StoreName {
    /// registry に存在する全ての名前
    pub const ALL: [StoreName; 2] = [StoreName::Users, StoreName::UserDetail];

    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreName::Users => "usersStore",
            StoreName::UserDetail => "userDetailStore",
        }
    }

    /// Membership check against the static key set.
    pub fn is_known(name: &str) -> bool {
        name.parse::<StoreName>().is_ok()
    }
}

impl fmt::Display for StoreName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown store name '{0}'")]
pub struct UnknownStoreName(pub String);

impl FromStr for StoreName {
    type Err = UnknownStoreName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StoreName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| UnknownStoreName(s.to_string()))
    }
}
