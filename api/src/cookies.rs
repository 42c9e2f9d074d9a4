//! Session cookie policy
//!
//! Both session tokens travel as HttpOnly cookies scoped to the configured
//! path. `Secure` and `SameSite=Strict` are only applied in production so the
//! cookies keep working over plain HTTP during development.

use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::error::HttpError;
use actix_web::HttpResponse;
use chrono::Duration;
use pr_core::domain::entities::token::TokenPair;
use pr_shared::config::{CookieConfig, Environment};

/// Attributes applied to the access and refresh cookies
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    pub path: String,
    pub secure: bool,
    pub same_site: SameSite,
    pub access_max_age: Duration,
    pub refresh_max_age: Duration,
}

impl CookiePolicy {
    pub fn new(
        environment: Environment,
        config: &CookieConfig,
        access_ttl: Duration,
        refresh_ttl: Duration,
    ) -> Self {
        let production = environment.is_production();
        Self {
            access_cookie_name: config.access_cookie_name.clone(),
            refresh_cookie_name: config.refresh_cookie_name.clone(),
            path: config.path.clone(),
            secure: production,
            same_site: if production {
                SameSite::Strict
            } else {
                SameSite::Lax
            },
            access_max_age: access_ttl,
            refresh_max_age: refresh_ttl,
        }
    }

    /// Cookie carrying an access token
    pub fn access_cookie(&self, token: &str) -> Cookie<'static> {
        self.build(&self.access_cookie_name, token, self.access_max_age)
    }

    /// Cookie carrying a refresh token
    pub fn refresh_cookie(&self, token: &str) -> Cookie<'static> {
        self.build(&self.refresh_cookie_name, token, self.refresh_max_age)
    }

    /// Attach both session cookies to `response`
    pub fn set_session_cookies(
        &self,
        response: &mut HttpResponse,
        tokens: &TokenPair,
    ) -> Result<(), HttpError> {
        response.add_cookie(&self.access_cookie(&tokens.access_token))?;
        response.add_cookie(&self.refresh_cookie(&tokens.refresh_token))?;
        Ok(())
    }

    /// Instruct the client to drop both session cookies
    ///
    /// Only the client copy goes away; tokens already handed out stay valid
    /// until they expire.
    pub fn clear_session_cookies(&self, response: &mut HttpResponse) -> Result<(), HttpError> {
        response.add_removal_cookie(&self.access_cookie(""))?;
        response.add_removal_cookie(&self.refresh_cookie(""))?;
        Ok(())
    }

    fn build(&self, name: &str, value: &str, max_age: Duration) -> Cookie<'static> {
        Cookie::build(name.to_string(), value.to_string())
            .path(self.path.clone())
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(time::Duration::seconds(max_age.num_seconds()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy(environment: Environment) -> CookiePolicy {
        CookiePolicy::new(
            environment,
            &CookieConfig::default(),
            Duration::minutes(15),
            Duration::days(3),
        )
    }

    fn tokens() -> TokenPair {
        TokenPair::new(
            "access.jwt.value".to_string(),
            "refresh.jwt.value".to_string(),
            Duration::minutes(15),
            Duration::days(3),
        )
    }

    #[test]
    fn test_development_cookies_are_lax_and_not_secure() {
        let mut response = HttpResponse::Ok().finish();
        policy(Environment::Development)
            .set_session_cookies(&mut response, &tokens())
            .unwrap();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);

        let access = cookies.iter().find(|c| c.name() == "access_token").unwrap();
        assert_eq!(access.value(), "access.jwt.value");
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.same_site(), Some(SameSite::Lax));
        assert_ne!(access.secure(), Some(true));
        assert_eq!(access.max_age(), Some(time::Duration::seconds(900)));

        let refresh = cookies.iter().find(|c| c.name() == "refresh_token").unwrap();
        assert_eq!(refresh.value(), "refresh.jwt.value");
        assert_eq!(refresh.max_age(), Some(time::Duration::seconds(259_200)));
    }

    #[test]
    fn test_production_cookies_are_strict_and_secure() {
        let mut response = HttpResponse::Ok().finish();
        policy(Environment::Production)
            .set_session_cookies(&mut response, &tokens())
            .unwrap();

        for cookie in response.cookies() {
            assert_eq!(cookie.secure(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Strict));
            assert_eq!(cookie.http_only(), Some(true));
        }
    }

    #[test]
    fn test_clear_session_cookies_expires_both() {
        let mut response = HttpResponse::Ok().finish();
        policy(Environment::Development)
            .clear_session_cookies(&mut response)
            .unwrap();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);
        for cookie in cookies {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
        }
    }

    #[test]
    fn test_staging_is_not_production() {
        let policy = policy(Environment::Staging);
        assert!(!policy.secure);
        assert_eq!(policy.same_site, SameSite::Lax);
    }
}
