use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use time::Duration;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "token";

/// Session cookie attributes, decided once at startup.
///
/// `secure` follows the deployment environment; `max_age_seconds` matches
/// the token lifetime so cookie and token expire together.
#[derive(Debug, Clone)]
pub struct CookiePolicy {
    pub secure: bool,
    pub max_age_seconds: i64,
}

/// Bind a freshly issued session token to the response.
///
/// `HttpOnly` keeps the token away from scripts; `SameSite=Lax` keeps it off
/// cross-site subrequests.
pub fn attach(jar: CookieJar, token: String, policy: &CookiePolicy) -> CookieJar {
    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(policy.secure)
        .max_age(Duration::seconds(policy.max_age_seconds))
        .build();

    jar.add(cookie)
}

/// Clear the session cookie.
///
/// Emits a removal cookie on the same name and path: empty value, zero
/// Max-Age, expiry in the past.
pub fn detach(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> CookiePolicy {
        CookiePolicy {
            secure: false,
            max_age_seconds: 900,
        }
    }

    #[test]
    fn test_attach_sets_session_attributes() {
        let jar = attach(CookieJar::new(), "signed.jwt.token".to_string(), &policy());

        let cookie = jar.get(SESSION_COOKIE).expect("session cookie missing");
        assert_eq!(cookie.value(), "signed.jwt.token");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(900)));
        assert_eq!(cookie.secure(), Some(false));
    }

    #[test]
    fn test_attach_secure_in_production_policy() {
        let production = CookiePolicy {
            secure: true,
            max_age_seconds: 900,
        };
        let jar = attach(
            CookieJar::new(),
            "signed.jwt.token".to_string(),
            &production,
        );

        assert_eq!(
            jar.get(SESSION_COOKIE).expect("session cookie missing").secure(),
            Some(true)
        );
    }

    #[test]
    fn test_detach_removes_session_cookie() {
        let jar = attach(CookieJar::new(), "signed.jwt.token".to_string(), &policy());
        let jar = detach(jar);

        assert!(jar.get(SESSION_COOKIE).is_none());
    }
}
