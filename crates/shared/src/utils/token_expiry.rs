use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

/// Reads the `exp` claim of a JWT without checking its signature. The backend
/// owns the signing key; this only sizes cookie lifetimes. Opaque tokens yield
/// `None`.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::from_timestamp(data.claims.exp?, 0)
}

pub fn cookie_ttl(token: &str, fallback: Duration, now: DateTime<Utc>) -> Duration {
    match token_expiry(token) {
        Some(expires_at) if expires_at > now => expires_at - now,
        _ => fallback,
    }
}
