//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::TokenError;

/// Identifier of an authenticated user (always positive)
pub type PrincipalId = i64;

/// Value of `token_type` in token responses
pub const TOKEN_TYPE_BEARER: &str = "bearer";

/// Claims structure for JWT payload
///
/// Access and refresh tokens share this exact structure; they differ only in
/// lifetime and in what the caller does with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the principal id as a plain decimal string
    pub sub: String,

    /// Expiration timestamp (exclusive)
    pub exp: i64,

    /// Issued at timestamp
    #[serde(default)]
    pub iat: i64,

    /// Unique token id; makes every minted token distinct
    #[serde(default)]
    pub jti: String,
}

impl Claims {
    /// Creates claims for `principal_id` valid for `ttl` from `issued_at`
    ///
    /// `exp` is a whole second, rounded up, so a token is never rejected
    /// before its full lifetime has passed. Fails with
    /// `TokenGenerationFailed` if the expiry instant is not representable.
    pub fn new(
        principal_id: PrincipalId,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<Self, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(TokenError::TokenGenerationFailed)?;
        let exp = expires_at
            .timestamp()
            .checked_add(i64::from(expires_at.timestamp_subsec_nanos() > 0))
            .ok_or(TokenError::TokenGenerationFailed)?;

        Ok(Self {
            sub: principal_id.to_string(),
            exp,
            iat: issued_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        })
    }

    /// Checks whether the claims are expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Decodes the subject into a principal id
    ///
    /// Only the canonical encoding is accepted: ASCII digits forming a
    /// positive `i64`. Anything else (JSON objects, signs, whitespace) is an
    /// invalid token.
    pub fn principal_id(&self) -> Result<PrincipalId, TokenError> {
        if self.sub.is_empty() || !self.sub.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TokenError::InvalidToken);
        }
        match self.sub.parse::<PrincipalId>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(TokenError::InvalidToken),
        }
    }
}

/// Purpose a token was minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Short-lived token authorizing API calls
    Access,
    /// Longer-lived token used only to mint a new pair
    Refresh,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Access => write!(f, "access"),
            TokenKind::Refresh => write!(f, "refresh"),
        }
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Always `"bearer"`
    pub token_type: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

impl TokenPair {
    /// Creates a new token pair
    pub fn new(
        access_token: String,
        refresh_token: String,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            access_expires_in: access_ttl.num_seconds(),
            refresh_expires_in: refresh_ttl.num_seconds(),
        }
    }
}
