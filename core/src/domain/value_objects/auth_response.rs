//! Authentication response value objects for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{IssuedToken, Role, User};

/// Public view of a user; never carries the password digest
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Result of a successful register or login
///
/// The token is handed to the caller for transport; the service keeps no
/// copy of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    /// Signed bearer token
    pub token: String,

    /// Moment the token stops being accepted
    pub expires_at: DateTime<Utc>,

    /// The authenticated user
    pub user: UserProfile,
}

impl AuthSession {
    /// Creates a session from an issued token and its user
    pub fn new(issued: IssuedToken, user: &User) -> Self {
        Self {
            expires_at: issued.expires_at(),
            token: issued.token,
            user: UserProfile::from(user),
        }
    }

    /// Seconds until expiry measured from `now`, never negative
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}
