//! Main authentication service implementation

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::token::Claims;
use crate::domain::entities::user::{NewUser, Role};
use crate::domain::value_objects::{AuthSession, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::UserRepository;
use crate::services::clock::{Clock, SystemClock};
use crate::services::password::{BcryptPasswordHasher, PasswordHasher};
use crate::services::token::TokenService;

/// Input for account registration
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    /// `None` or empty means the default `user` role
    pub role: Option<String>,
}

/// Authentication service composing password checks, token issuance and
/// revocation into the register/login/validate/logout flows
pub struct AuthService<U, H = BcryptPasswordHasher>
where
    U: UserRepository,
    H: PasswordHasher,
{
    /// Credential repository
    user_repository: Arc<U>,
    /// One-way password hasher
    password_hasher: Arc<H>,
    /// Token issuance, verification and revocation
    token_service: Arc<TokenService>,
    /// Time source for issuance and expiry
    clock: Arc<dyn Clock>,
}

impl<U, H> AuthService<U, H>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
{
    /// Create a new authentication service on the system clock
    pub fn new(
        user_repository: Arc<U>,
        password_hasher: Arc<H>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_service,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the time source
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Register a new account and open a session for it
    ///
    /// # Errors
    ///
    /// * `InvalidRole` - role is neither `user` nor `admin`
    /// * `DuplicateEmail` - the repository already holds this email
    /// * `EncodingError` - the password could not be hashed
    pub async fn register(&self, registration: Registration) -> DomainResult<AuthSession> {
        let role = match registration.role.as_deref() {
            None | Some("") => Role::default(),
            Some(role) => role.parse::<Role>()?,
        };

        let password_hash = self.hash_password(registration.password).await?;

        let user = self
            .user_repository
            .create(NewUser {
                name: registration.name,
                email: normalize_email(&registration.email),
                password_hash,
                role,
            })
            .await?;

        let issued = self
            .token_service
            .issue_for(&user.principal(), self.clock.now())?;

        info!(user_id = user.id, role = %user.role, "User registered");

        Ok(AuthSession::new(issued, &user))
    }

    /// Log in with email and password
    ///
    /// An unknown email and a wrong password produce the same
    /// `InvalidCredentials` error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthSession> {
        let user = match self
            .user_repository
            .find_by_email(&normalize_email(email))
            .await?
        {
            Some(user) if self.verify_password(password, &user.password_hash).await => user,
            _ => {
                warn!("Login rejected: invalid credentials");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let issued = self
            .token_service
            .issue_for(&user.principal(), self.clock.now())?;

        info!(user_id = user.id, jti = %issued.claims.jti, "User logged in");

        Ok(AuthSession::new(issued, &user))
    }

    /// Accept or reject a token. Does not mutate any state.
    pub async fn validate(&self, token: &str) -> DomainResult<Claims> {
        self.token_service
            .validate(token, self.clock.now())
            .await
            .map_err(|e| {
                warn!("Token rejected: {}", e);
                e
            })
    }

    /// Revoke a token until its natural expiry
    ///
    /// The token must still verify (signature, expiry, issuer). An already
    /// revoked token is accepted again so repeated logouts succeed.
    pub async fn logout(&self, token: &str) -> DomainResult<()> {
        let claims = self
            .token_service
            .revoke(token, self.clock.now())
            .await
            .map_err(|e| {
                warn!("Logout rejected: {}", e);
                e
            })?;

        info!(sub = %claims.sub, "User logged out");
        Ok(())
    }

    /// Public profile of a user
    pub async fn get_user_profile(&self, user_id: i64) -> DomainResult<UserProfile> {
        self.user_repository
            .find_by_id(user_id)
            .await?
            .map(|user| UserProfile::from(&user))
            .ok_or(DomainError::Auth(AuthError::NotFound))
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    /// Hashing is CPU bound, so it runs on the blocking pool
    async fn hash_password(&self, password: String) -> DomainResult<String> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .unwrap_or_else(|e| {
                error!("Password hashing task failed: {}", e);
                Err(AuthError::EncodingError.into())
            })
    }

    async fn verify_password(&self, password: &str, digest: &str) -> bool {
        let hasher = Arc::clone(&self.password_hasher);
        let (password, digest) = (password.to_string(), digest.to_string());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
            .await
            .unwrap_or_else(|e| {
                error!("Password verification task failed: {}", e);
                false
            })
    }
}

/// Emails are matched case-insensitively, so they are stored lowercased
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
