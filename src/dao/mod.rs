/// Data carried between the core and the row store.
pub mod models;
/// Row store trait and its implementations.
pub mod row_store;
/// Storage abstraction layer for store failures.
pub mod storage;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};

/// Current UTC time as an RFC3339 string, used for audit columns.
pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
