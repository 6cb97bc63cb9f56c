//! Domain model (users, store names, envelopes, errors).

pub mod user;
pub mod store_name;
pub mod envelope;
pub mod errors;

pub use self::user::{User, UserId};
pub use self::store_name::{StoreName, UnknownStoreName};
pub use self::envelope::{Envelope, Payload, PendingValue, SyncEnvelope};
pub use self::errors::{CodecError, FetchError, LoadError, SyncError};
