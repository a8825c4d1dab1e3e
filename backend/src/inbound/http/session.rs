//! Session token transport: the `token` cookie and bearer header.
//!
//! Handlers never touch cookie attributes directly; they ask
//! [`SessionCookies`] for a cookie carrying an issued session, or for the
//! removal cookie on logout.

use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::HttpRequest;
use chrono::TimeDelta;

use crate::domain::{IssuedSession, SessionToken};
use crate::inbound::http::session_config::SessionSettings;

/// Name of the cookie carrying the session token.
pub const TOKEN_COOKIE: &str = "token";

const BEARER_SCHEME: &str = "Bearer";

/// Cookie attributes applied to the `token` cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookies {
    secure: bool,
    same_site: SameSite,
    max_age: TimeDelta,
}

impl SessionCookies {
    pub fn new(secure: bool, same_site: SameSite, max_age: TimeDelta) -> Self {
        Self {
            secure,
            same_site,
            max_age,
        }
    }

    /// Cookie attributes taken from validated session settings.
    pub fn from_settings(settings: &SessionSettings) -> Self {
        Self::new(settings.cookie_secure, settings.same_site, settings.ttl)
    }

    /// `HttpOnly` cookie carrying `session`'s token for its lifetime.
    ///
    /// # Examples
    /// ```
    /// use actix_web::cookie::SameSite;
    /// use chrono::{TimeDelta, Utc};
    /// use casebook::domain::{IssuedSession, SessionToken};
    /// use casebook::inbound::http::session::SessionCookies;
    ///
    /// let cookies = SessionCookies::new(true, SameSite::Strict, TimeDelta::hours(1));
    /// let session = IssuedSession {
    ///     token: SessionToken::new("abc.def.ghi"),
    ///     expires_at: Utc::now(),
    /// };
    /// let cookie = cookies.issue(&session);
    /// assert_eq!(cookie.value(), "abc.def.ghi");
    /// assert_eq!(cookie.http_only(), Some(true));
    /// ```
    pub fn issue(&self, session: &IssuedSession) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE, session.token.as_str().to_owned())
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(Duration::seconds(self.max_age.num_seconds()))
            .finish()
    }

    /// Cookie instructing the browser to discard the `token` cookie.
    pub fn expired(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build(TOKEN_COOKIE, "")
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .finish();
        cookie.make_removal();
        cookie
    }
}

/// Token from an `Authorization: Bearer` header, if one is present.
///
/// The scheme name is matched case-insensitively.
fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim_start().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| SessionToken::new(token))
}

/// Session token presented with `req`.
///
/// The bearer header wins over the cookie when both are sent.
pub fn presented_token(req: &HttpRequest) -> Option<SessionToken> {
    bearer_token(req.headers()).or_else(|| {
        req.cookie(TOKEN_COOKIE)
            .map(|cookie| cookie.value().to_owned())
            .filter(|value| !value.is_empty())
            .map(SessionToken::new)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chrono::Utc;
    use rstest::{fixture, rstest};

    #[fixture]
    fn cookies() -> SessionCookies {
        SessionCookies::new(false, SameSite::Lax, TimeDelta::hours(2))
    }

    #[rstest]
    fn issued_cookie_carries_token_and_lifetime(cookies: SessionCookies) {
        let session = IssuedSession {
            token: SessionToken::new("signed.token.value"),
            expires_at: Utc::now(),
        };

        let cookie = cookies.issue(&session);

        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "signed.token.value");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(Duration::hours(2)));
    }

    #[rstest]
    fn expired_cookie_clears_the_token(cookies: SessionCookies) {
        let cookie = cookies.expired();
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }

    #[rstest]
    fn bearer_header_wins_over_cookie() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .to_http_request();

        let token = presented_token(&req).expect("token");
        assert_eq!(token.as_str(), "from-header");
    }

    #[rstest]
    fn cookie_is_used_without_header() {
        let req = TestRequest::default()
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .to_http_request();

        let token = presented_token(&req).expect("token");
        assert_eq!(token.as_str(), "from-cookie");
    }

    #[rstest]
    #[case("Bearer signed.token")]
    #[case("bearer signed.token")]
    #[case("BEARER signed.token")]
    #[case("Bearer   signed.token ")]
    fn bearer_scheme_is_case_insensitive(#[case] header: &str) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();

        let token = presented_token(&req).expect("token");
        assert_eq!(token.as_str(), "signed.token");
    }

    #[rstest]
    #[case("Basic dXNlcjpwdw==")]
    #[case("Bearer ")]
    #[case("Bearer")]
    #[case("Bearersigned.token")]
    fn unusable_headers_yield_nothing(#[case] header: &str) {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, header))
            .to_http_request();
        assert!(presented_token(&req).is_none());
    }
}
