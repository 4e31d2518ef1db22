use axum::http::HeaderMap;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::CookieJar;
use axum_extra::extract::cookie::SameSite;
use chrono::DateTime;
use chrono::Utc;

/// Name of the cookie carrying the access token.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// How the access token cookie is written.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookieSettings {
    /// Add the `Secure` attribute (disable for plain-http local development).
    pub secure: bool,
}

/// Cookie for a freshly issued access token.
///
/// The cookie lives exactly as long as the token.
pub fn access_token_cookie(
    token: &str,
    expires_at: DateTime<Utc>,
    settings: CookieSettings,
) -> Cookie<'static> {
    let max_age = (expires_at - Utc::now()).num_seconds().max(0);

    Cookie::build((ACCESS_TOKEN_COOKIE, token.to_owned()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .max_age(time::Duration::seconds(max_age))
        .build()
}

/// Cookie that removes the access token cookie from the client.
pub fn cleared_access_token_cookie(settings: CookieSettings) -> Cookie<'static> {
    let mut cookie = Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(settings.secure)
        .build();
    cookie.make_removal();
    cookie
}

/// Access token sent back in the `Cookie` header(s), if any.
pub fn access_token_from_cookies(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value_trimmed().to_owned())
        .filter(|token| !token.is_empty())
}
