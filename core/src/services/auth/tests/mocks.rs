//! Test doubles for the authentication service

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread::{self, ThreadId};

use crate::domain::entities::user::{NewUser, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::password::PasswordHasher;

/// Repository whose storage is always down
pub struct UnavailableUserRepository;

#[async_trait]
impl UserRepository for UnavailableUserRepository {
    async fn create(&self, _user: NewUser) -> Result<User, DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<User>, DomainError> {
        Err(DomainError::Database("connection refused".to_string()))
    }
}

/// Reversible "hasher" that counts calls and can be told to fail
#[derive(Default)]
pub struct RecordingHasher {
    pub fail: bool,
    pub hash_calls: AtomicUsize,
    /// Threads that ran hash or verify
    pub threads: Mutex<Vec<ThreadId>>,
}

impl RecordingHasher {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn hash_calls(&self) -> usize {
        self.hash_calls.load(Ordering::SeqCst)
    }

    pub fn threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap().clone()
    }

    fn record_thread(&self) {
        self.threads.lock().unwrap().push(thread::current().id());
    }
}

impl PasswordHasher for RecordingHasher {
    fn hash(&self, password: &str) -> DomainResult<String> {
        self.hash_calls.fetch_add(1, Ordering::SeqCst);
        self.record_thread();
        if self.fail {
            return Err(AuthError::EncodingError.into());
        }
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, digest: &str) -> bool {
        self.record_thread();
        digest == format!("hashed:{password}")
    }
}

/// Hasher whose work always panics
pub struct PanickingHasher;

impl PasswordHasher for PanickingHasher {
    fn hash(&self, _password: &str) -> DomainResult<String> {
        panic!("hasher crashed");
    }

    fn verify(&self, _password: &str, _digest: &str) -> bool {
        panic!("hasher crashed");
    }
}
