//! Preview session cookie
//!
//! The whole session is one http-only cookie holding the preview ref.
//! Handlers thread the jar through these functions; nothing here talks to
//! the CMS, so entering and leaving preview stays a pure cookie exchange.

use axum_extra::extract::cookie::{Cookie, CookieJar};

/// Store a preview ref in the session
pub fn set_preview(jar: CookieJar, name: &str, preview_ref: &str) -> CookieJar {
    let cookie = Cookie::build((name.to_string(), preview_ref.to_string()))
        .path("/")
        .http_only(true)
        .build();
    jar.add(cookie)
}

/// Drop the preview session, if any
pub fn clear_preview(jar: CookieJar, name: &str) -> CookieJar {
    let mut cookie = Cookie::from(name.to_string());
    cookie.set_path("/");
    jar.remove(cookie)
}

/// The active preview ref, if a session is open
pub fn preview_ref(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_read() {
        let jar = CookieJar::new();
        assert_eq!(preview_ref(&jar, "preview"), None);

        let jar = set_preview(jar, "preview", "tok-1");
        assert_eq!(preview_ref(&jar, "preview"), Some("tok-1".to_string()));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let jar = set_preview(CookieJar::new(), "preview", "tok-1");
        let jar = clear_preview(jar, "preview");
        assert_eq!(preview_ref(&jar, "preview"), None);

        // Clearing an already cleared session changes nothing
        let jar = clear_preview(jar, "preview");
        assert_eq!(preview_ref(&jar, "preview"), None);
    }

    #[test]
    fn test_empty_value_counts_as_no_session() {
        let jar = CookieJar::new().add(Cookie::new("preview", ""));
        assert_eq!(preview_ref(&jar, "preview"), None);
    }
}
