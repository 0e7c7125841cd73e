use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode, decode_header};
use serde::{Deserialize, Serialize};

/// Claims the backend puts in its bearer tokens.
///
/// The client never holds the signing secret, so these are read for display
/// and expiry checks only; the backend remains the authority on validity.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The username the token was issued to.
    pub sub: String,
    /// Token expiration (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Token issued-at (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.iat.and_then(|iat| DateTime::from_timestamp(iat, 0))
    }

    /// A token without `exp` never expires on the client side.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

/// Decode the claims of a JWT without verifying its signature or expiry.
pub fn read_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let header = decode_header(token)?;

    let mut validation = Validation::new(header.alg);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation).map(|td| td.claims)
}

/// True when the token is readable and its `exp` has passed.
///
/// Opaque (non-JWT) tokens are left for the backend to judge.
pub fn is_expired(token: &str, now: DateTime<Utc>) -> bool {
    read_claims(token)
        .map(|claims| claims.is_expired_at(now))
        .unwrap_or(false)
}
