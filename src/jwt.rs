use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logs::{ErrorLogger, LogErrorLogger};
use crate::time::{current_millis, secs_to_millis};

/// Base64url, with or without trailing padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Claims read from a token payload. Only `exp` is required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub exp: f64, // Required. Expiration time (seconds since epoch, may be fractional)

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<f64>, // Optional. Issued at (seconds since epoch)

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>, // Optional. Subject of the token
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("empty token")]
    Empty,

    #[error("invalid token: missing payload part")]
    MissingPayload,

    #[error("invalid token payload base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid token payload json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum TokenState {
    /// `exp` lies in the future.
    Fresh { expire_at: f64 },

    /// `exp` is now or already passed.
    Expired { expire_at: f64 },
}

impl TokenState {
    pub fn is_expired(&self) -> bool {
        matches!(self, TokenState::Expired { .. })
    }
}

/// Decodes the payload part of `token`. The header and the signature are not looked at;
/// verifying them is the server's job.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Empty);
    }

    let payload = match token.split('.').nth(1) {
        Some(payload) => payload,
        None => return Err(TokenError::MissingPayload),
    };
    let data = PAYLOAD_ENGINE.decode(payload)?;
    let claims = serde_json::from_slice(&data)?;
    Ok(claims)
}

/// Three-valued view of a token: `Ok(Fresh)`, `Ok(Expired)` or `Err` when it cannot be
/// decoded at all.
pub fn token_state(token: &str, now_millis: i64) -> Result<TokenState, TokenError> {
    let claims = decode_claims(token)?;
    let expire_at = claims.exp;
    if now_millis as f64 >= secs_to_millis(expire_at) {
        Ok(TokenState::Expired { expire_at })
    } else {
        Ok(TokenState::Fresh { expire_at })
    }
}

/// Reports whether `token` should be treated as expired at `now_millis`. A token that
/// cannot be decoded is reported to `logger` once and counts as expired.
pub fn check_token_expired(token: &str, now_millis: i64, logger: &dyn ErrorLogger) -> bool {
    match token_state(token, now_millis) {
        Ok(state) => state.is_expired(),
        Err(err) => {
            logger.log_token_error(&err);
            true
        }
    }
}

/// Reports whether `token` is expired right now. Malformed tokens are expired.
pub fn is_token_expired(token: &str) -> bool {
    check_token_expired(token, current_millis(), &LogErrorLogger)
}
