use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};

use crate::store::SessionId;

pub const SESSION_COOKIE_NAME: &str = "recruitease_session";

/// `Set-Cookie` value binding the browser to an application session.
pub fn session_cookie(id: &SessionId, ttl: chrono::Duration) -> String {
    Cookie::build((SESSION_COOKIE_NAME, id.as_str().to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(cookie::time::Duration::seconds(ttl.num_seconds()))
        .build()
        .to_string()
}

/// Session id from the request's `Cookie` headers, if any.
pub fn session_id_from(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|raw| Cookie::split_parse(raw.to_string()))
        .filter_map(|cookie| cookie.ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME && !cookie.value().is_empty())
        .map(|cookie| SessionId::from(cookie.value().to_string()))
}
