//! Tests for the token module


use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::user::{Principal, Role};

pub(super) const SECRET: &str = "test-secret-key";
pub(super) const ISSUER: &str = "auth-service";

pub(super) fn principal() -> Principal {
    Principal {
        id: 1,
        name: "Ann".to_string(),
        email: "a@x.com".to_string(),
        role: Role::User,
    }
}

pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}
