//! Codec - envelope の構築・判定・境界越えの変換
//!
//! # 境界上の形
//! ```json
//! { "__STORE_SIGNATURE__": true, "storeName": "usersStore", "data": [ ... ] }
//! ```
//!
//! # 変換フロー
//! 1. producer: `wrap::<K>(data)` で型付き envelope を作る（data は Pending のままでよい）
//! 2. server: `encode()` で Pending を await して JSON にする
//! 3. client: `is_valid_envelope()` で判定し、`decode()` で store ごとの型に戻す

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{CodecError, Envelope, Payload, StoreName, SyncEnvelope, SyncError};
use crate::typed::target::SyncTarget;

/// envelope であることを示すマーカーのキー（値は常に `true`）
pub const SIGNATURE_KEY: &str = "__STORE_SIGNATURE__";

/// store 名のキー
pub const NAME_KEY: &str = "storeName";

const DATA_KEY: &str = "data";

#[derive(Debug, Serialize, Deserialize)]
struct WireEnvelope {
    #[serde(rename = "__STORE_SIGNATURE__")]
    signature: bool,
    #[serde(rename = "storeName")]
    store_name: StoreName,
    data: Value,
}

/// data を store `K` 宛ての envelope に包む
///
/// data の中身は見ません。Pending の場合も await せずにそのまま運びます。
pub fn wrap<K: SyncTarget>(data: impl Into<Payload<K::Value>>) -> Envelope<K> {
    Envelope::new(data)
}

/// 任意の値が sync envelope かどうかを判定する
///
/// # 条件
/// - 配列でも null でもないオブジェクト
/// - `__STORE_SIGNATURE__` が `true`
/// - `storeName` が文字列で、registry のキー集合に含まれる
///
/// どんな入力でも panic しません。
pub fn is_valid_envelope(value: &Value) -> bool {
    match inspect(value) {
        Ok(_) => true,
        Err(err) => {
            tracing::debug!(%err, "rejected sync envelope candidate");
            false
        }
    }
}

/// 判定に通った値を、store ごとの型に decode する
pub fn decode(value: Value) -> Result<SyncEnvelope, CodecError> {
    let name = inspect(&value)?;
    let Value::Object(mut object) = value else {
        return Err(CodecError::NotAnEnvelope);
    };
    let data = object
        .remove(DATA_KEY)
        .ok_or(CodecError::MissingData(name))?;

    // store ごとに具体的な型で decode する（網羅的な match）
    let envelope = match name {
        StoreName::Users => SyncEnvelope::Users(Payload::Ready(decode_data(name, data)?)),
        StoreName::UserDetail => SyncEnvelope::UserDetail(Payload::Ready(decode_data(name, data)?)),
    };
    Ok(envelope)
}

/// envelope を境界上の JSON にする
///
/// Pending の data はここで await します。producer の失敗は `SyncError::Fetch` になります。
pub async fn encode(envelope: SyncEnvelope) -> Result<Value, SyncError> {
    let store_name = envelope.name();
    let data = match envelope {
        SyncEnvelope::Users(payload) => encode_data(&payload.resolve().await?)?,
        SyncEnvelope::UserDetail(payload) => encode_data(&payload.resolve().await?)?,
    };
    let wire = WireEnvelope {
        signature: true,
        store_name,
        data,
    };
    Ok(serde_json::to_value(wire).map_err(CodecError::Encode)?)
}

fn inspect(value: &Value) -> Result<StoreName, CodecError> {
    let object = value.as_object().ok_or(CodecError::NotAnEnvelope)?;
    if !matches!(object.get(SIGNATURE_KEY), Some(Value::Bool(true))) {
        return Err(CodecError::NotAnEnvelope);
    }
    let name = object
        .get(NAME_KEY)
        .and_then(Value::as_str)
        .ok_or(CodecError::NotAnEnvelope)?;
    name.parse::<StoreName>()
        .map_err(|err| CodecError::UnknownStore(err.0))
}

fn decode_data<T: DeserializeOwned>(store: StoreName, data: Value) -> Result<T, CodecError> {
    serde_json::from_value(data).map_err(|source| CodecError::InvalidData { store, source })
}

fn encode_data<T: Serialize>(data: &T) -> Result<Value, CodecError> {
    serde_json::to_value(data).map_err(CodecError::Encode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FetchError, User};
    use crate::typed::target::{UserDetailStore, UsersStore};
    use rstest::rstest;
    use serde_json::json;

    fn john() -> User {
        User::new(1, "John Doe", "john@example.com")
    }

    #[tokio::test]
    async fn encoded_envelopes_pass_the_guard() {
        let users = encode(wrap::<UsersStore>(vec![john()]).into()).await.unwrap();
        assert!(is_valid_envelope(&users));
        assert_eq!(users[SIGNATURE_KEY], true);
        assert_eq!(users[NAME_KEY], "usersStore");
        assert_eq!(users["data"][0]["email"], "john@example.com");

        let detail = encode(wrap::<UserDetailStore>(None::<User>).into()).await.unwrap();
        assert!(is_valid_envelope(&detail));
        assert_eq!(detail[NAME_KEY], "userDetailStore");
        assert!(detail["data"].is_null());
    }

    #[tokio::test]
    async fn encode_awaits_pending_data() {
        let pending: Payload<Vec<User>> = Payload::pending(async { Ok(vec![john()]) });
        let wire = encode(wrap::<UsersStore>(pending).into()).await.unwrap();
        assert_eq!(wire["data"][0]["name"], "John Doe");
    }

    #[tokio::test]
    async fn encode_surfaces_producer_failure() {
        let pending: Payload<Option<User>> =
            Payload::pending(async { Err(FetchError::Unavailable("down".into())) });
        let err = encode(wrap::<UserDetailStore>(pending).into())
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Fetch(FetchError::Unavailable(_))));
    }

    #[tokio::test]
    async fn decode_restores_the_typed_variant() {
        let wire = encode(wrap::<UserDetailStore>(Some(john())).into())
            .await
            .unwrap();
        match decode(wire).unwrap() {
            SyncEnvelope::UserDetail(Payload::Ready(Some(user))) => assert_eq!(user, john()),
            other => panic!("unexpected envelope: {other:?}"),
        }
    }

    #[rstest]
    #[case::null(json!(null))]
    #[case::number(json!(42))]
    #[case::string(json!("usersStore"))]
    #[case::boolean(json!(true))]
    #[case::array(json!([{ "__STORE_SIGNATURE__": true, "storeName": "usersStore", "data": [] }]))]
    #[case::empty_object(json!({}))]
    #[case::missing_signature(json!({ "storeName": "usersStore", "data": [] }))]
    #[case::signature_false(json!({ "__STORE_SIGNATURE__": false, "storeName": "usersStore", "data": [] }))]
    #[case::signature_as_string(json!({ "__STORE_SIGNATURE__": "true", "storeName": "usersStore", "data": [] }))]
    #[case::old_marker(json!({ "__STORE_SYNC__": true, "storeName": "usersStore", "data": [] }))]
    #[case::name_not_string(json!({ "__STORE_SIGNATURE__": true, "storeName": 1, "data": [] }))]
    #[case::unknown_name(json!({ "__STORE_SIGNATURE__": true, "storeName": "postsStore", "data": [] }))]
    fn guard_rejects_forgeries(#[case] value: Value) {
        assert!(!is_valid_envelope(&value));
        assert!(decode(value).is_err());
    }

    #[test]
    fn decode_reports_unknown_store_names() {
        let value = json!({ "__STORE_SIGNATURE__": true, "storeName": "postsStore", "data": [] });
        assert!(matches!(decode(value), Err(CodecError::UnknownStore(name)) if name == "postsStore"));
    }

    #[test]
    fn decode_rejects_data_of_the_wrong_shape() {
        // 一覧 store に単一ユーザーを送っても受け付けない
        let value = json!({
            "__STORE_SIGNATURE__": true,
            "storeName": "usersStore",
            "data": { "id": 1, "name": "John Doe", "email": "john@example.com" }
        });
        assert!(is_valid_envelope(&value));
        assert!(matches!(
            decode(value),
            Err(CodecError::InvalidData { store: StoreName::Users, .. })
        ));
    }

    #[test]
    fn decode_requires_a_data_field() {
        let value = json!({ "__STORE_SIGNATURE__": true, "storeName": "userDetailStore" });
        assert!(matches!(
            decode(value),
            Err(CodecError::MissingData(StoreName::UserDetail))
        ));
    }
}
