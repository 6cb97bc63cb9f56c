//! Errors - エラー型と分類
//!
//! - FetchError: producer 側の非同期処理の失敗（store の error スロットに書き込む）
//! - CodecError: envelope の検証・変換の失敗
//! - SyncError: dispatcher / hydrate が返すエラー
//! - LoadError: ページ層（loader）が返すエラー。HTTP ステータスに対応する

use thiserror::Error;

use super::store_name::StoreName;

/// FetchError は producer 側の失敗
///
/// store の `error` スロットに保持するため Clone を実装します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    #[error("pending value was dropped before it resolved")]
    Cancelled,
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("value is not a store sync envelope")]
    NotAnEnvelope,

    #[error("unknown store name '{0}'")]
    UnknownStore(String),

    #[error("envelope for '{0}' carries no data field")]
    MissingData(StoreName),

    #[error("data does not fit store '{store}': {source}")]
    InvalidData {
        store: StoreName,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode envelope data: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0} parameter is missing")]
    MissingParameter(&'static str),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(#[from] SyncError),
}

impl LoadError {
    /// ページ層が返すべき HTTP ステータス
    pub fn status_code(&self) -> u16 {
        match self {
            LoadError::MissingParameter(_) => 400,
            LoadError::NotFound(_) => 404,
            LoadError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_errors_map_to_status_codes() {
        assert_eq!(LoadError::MissingParameter("User ID").status_code(), 400);
        assert_eq!(LoadError::NotFound("user 999".into()).status_code(), 404);

        let internal = LoadError::from(SyncError::from(FetchError::Cancelled));
        assert_eq!(internal.status_code(), 500);
    }

    #[test]
    fn missing_parameter_message() {
        let err = LoadError::MissingParameter("User ID");
        assert_eq!(err.to_string(), "User ID parameter is missing");
    }

    #[test]
    fn fetch_error_is_transparent_through_sync_error() {
        let err = SyncError::from(FetchError::Unavailable("timeout".into()));
        assert_eq!(err.to_string(), "upstream unavailable: timeout");
    }
}
