//! Stateless token verification.
//!
//! Checks run in a fixed order: shape, pinned algorithm, signature, then
//! claim contents. Nothing inside the claims is trusted before the
//! signature has been checked.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::TokenError;

const PINNED_ALGORITHM: &str = "HS256";

/// Verifies HS256 tokens against a shared secret and expected issuer
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
}

impl TokenVerifier {
    pub fn new(secret: &str, issuer: impl Into<String>) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::SigningError);
        }

        // Expiry and issuer are checked by hand against the injected clock
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            issuer: issuer.into(),
        })
    }

    /// Verifies `token` at `now` and returns its claims
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
            return Err(TokenError::MalformedToken);
        }

        check_algorithm(segments[0])?;

        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::MalformedToken,
            })?
            .claims;

        if claims.is_expired_at(now) {
            return Err(TokenError::Expired);
        }
        if claims.iss != self.issuer {
            return Err(TokenError::IssuerMismatch);
        }

        Ok(claims)
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }
}

/// Rejects any header that does not declare the pinned algorithm
fn check_algorithm(header_segment: &str) -> Result<(), TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(header_segment)
        .map_err(|_| TokenError::MalformedToken)?;
    let header: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|_| TokenError::MalformedToken)?;

    match header.get("alg").and_then(|alg| alg.as_str()) {
        Some(PINNED_ALGORITHM) => Ok(()),
        Some(_) => Err(TokenError::InvalidSignature),
        None => Err(TokenError::MalformedToken),
    }
}
