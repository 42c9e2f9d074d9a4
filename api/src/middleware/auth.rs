//! JWT authentication middleware for protecting API endpoints.
//!
//! The token is taken from `Authorization: Bearer <token>` when present and
//! otherwise from the access-token cookie. A verified principal id is
//! injected into the request as an [`AuthContext`].

use actix_web::{
    dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use pr_core::{
    domain::entities::token::PrincipalId,
    errors::{DomainError, TokenError},
    services::token::TokenService,
};
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use crate::handlers::error::handle_domain_error;

/// Authenticated principal injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID decoded from the token subject
    pub user_id: PrincipalId,
}

/// Convert a domain error into an actix error carrying our JSON response
pub fn auth_error(error: DomainError) -> Error {
    let response = handle_domain_error(&error);
    InternalError::from_response(error, response).into()
}

/// Find the token a request presents
///
/// A bearer header wins over the cookie. The scheme is matched
/// case-insensitively and an empty token counts as absent.
pub fn resolve_incoming_token(req: &HttpRequest, access_cookie_name: &str) -> Option<String> {
    bearer_token(req).or_else(|| {
        req.cookie(access_cookie_name)
            .map(|cookie| cookie.value().to_string())
            .filter(|value| !value.is_empty())
    })
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token.to_string())
    } else {
        None
    }
}

/// JWT authentication middleware factory
pub struct JwtAuth {
    token_service: Arc<TokenService>,
    access_cookie_name: Rc<str>,
}

impl JwtAuth {
    pub fn new(token_service: Arc<TokenService>, access_cookie_name: &str) -> Self {
        Self {
            token_service,
            access_cookie_name: Rc::from(access_cookie_name),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            access_cookie_name: Rc::clone(&self.access_cookie_name),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    access_cookie_name: Rc<str>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let verified = match resolve_incoming_token(req.request(), &self.access_cookie_name) {
            None => Err(DomainError::Token(TokenError::MissingCredentials)),
            Some(token) => self.token_service.validate_and_extract(&token),
        };

        Box::pin(async move {
            let user_id = verified.map_err(auth_error)?;
            req.extensions_mut().insert(AuthContext { user_id });
            service.call(req).await
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| auth_error(DomainError::Token(TokenError::MissingCredentials)));

        ready(result)
    }
}
