//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, PrincipalId, TokenKind, TokenPair};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::audit::{SecurityAuditor, TracingSecurityAuditor};

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Service for minting and validating access and refresh tokens
///
/// Stateless apart from the immutable signing key, so a single instance can
/// be shared behind an `Arc` by every request handler.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
    auditor: Arc<dyn SecurityAuditor>,
}

impl TokenService {
    /// Creates a new token service using the wall clock
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a new token service reading time from `clock`
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against the injected clock, not by jsonwebtoken.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
            clock,
            auditor: Arc::new(TracingSecurityAuditor),
        }
    }

    /// Replaces the security auditor notified about rejected tokens
    pub fn with_auditor(mut self, auditor: Arc<dyn SecurityAuditor>) -> Self {
        self.auditor = auditor;
        self
    }

    /// Configured lifetime for tokens of `kind`
    pub fn ttl_for(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.config.access_token_ttl,
            TokenKind::Refresh => self.config.refresh_token_ttl,
        }
    }

    /// Mints an access token for `principal_id` valid for `ttl`
    pub fn mint_access_token(
        &self,
        principal_id: PrincipalId,
        ttl: Duration,
    ) -> DomainResult<String> {
        self.mint(principal_id, ttl)
    }

    /// Mints a refresh token for `principal_id` valid for `ttl`
    pub fn mint_refresh_token(
        &self,
        principal_id: PrincipalId,
        ttl: Duration,
    ) -> DomainResult<String> {
        self.mint(principal_id, ttl)
    }

    /// Mints a token of `kind` with the configured lifetime
    pub fn mint_with_default_ttl(
        &self,
        kind: TokenKind,
        principal_id: PrincipalId,
    ) -> DomainResult<String> {
        self.mint(principal_id, self.ttl_for(kind))
    }

    /// Issues a fresh access/refresh pair with the configured lifetimes
    ///
    /// Every call yields a brand-new refresh token; an old one is never
    /// extended or handed out again.
    pub fn issue_session(&self, principal_id: PrincipalId) -> DomainResult<TokenPair> {
        let access_ttl = self.ttl_for(TokenKind::Access);
        let refresh_ttl = self.ttl_for(TokenKind::Refresh);

        let access_token = self.mint_access_token(principal_id, access_ttl)?;
        let refresh_token = self.mint_refresh_token(principal_id, refresh_ttl)?;

        Ok(TokenPair::new(access_token, refresh_token, access_ttl, refresh_ttl))
    }

    /// Verifies signature and expiry, then decodes the principal id
    ///
    /// Every failure is reported as `TokenError::InvalidToken`; the concrete
    /// cause only goes to the security auditor.
    pub fn validate_and_extract(&self, token: &str) -> DomainResult<PrincipalId> {
        self.verify(token)
            .map_err(|reason| {
                self.auditor.invalid_token(reason);
                DomainError::Token(TokenError::InvalidToken)
            })
    }

    fn verify(&self, token: &str) -> Result<PrincipalId, &'static str> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| rejection_reason(e.kind()))?;
        let claims = token_data.claims;

        if claims.is_expired_at(self.clock.now()) {
            return Err("expired");
        }

        claims.principal_id().map_err(|_| "invalid_subject")
    }

    fn mint(&self, principal_id: PrincipalId, ttl: Duration) -> DomainResult<String> {
        // `exp` has one-second resolution, so lifetimes are whole seconds
        if principal_id <= 0 || ttl < Duration::seconds(1) || ttl.subsec_nanos() != 0 {
            return Err(DomainError::Token(TokenError::TokenGenerationFailed));
        }

        let claims = Claims::new(principal_id, self.clock.now(), ttl)?;
        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }
}

fn rejection_reason(kind: &ErrorKind) -> &'static str {
    match kind {
        ErrorKind::InvalidSignature => "invalid_signature",
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => "invalid_algorithm",
        ErrorKind::MissingRequiredClaim(_) => "missing_claim",
        ErrorKind::ExpiredSignature => "expired",
        ErrorKind::Json(_) => "invalid_claims",
        _ => "malformed",
    }
}
