use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SameSite {
    Lax,
    Strict,
    None,
}

#[derive(Debug, Clone, Copy)]
pub struct CookieOptions {
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

/// Builds the session cookie. With `max_age_secs` unset the cookie lives for
/// the browser session, matching a store whose records never expire.
pub fn build_session_cookie(
    name: &str,
    value: &str,
    max_age_secs: Option<i64>,
    options: CookieOptions,
) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite={}",
        name,
        value,
        same_site_value(options.same_site)
    );
    if let Some(max_age) = max_age_secs {
        cookie.push_str(&format!("; Max-Age={}", max_age));
    }
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn build_clear_cookie(name: &str, options: CookieOptions) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Max-Age=0; HttpOnly; SameSite={}",
        name,
        same_site_value(options.same_site)
    );
    if options.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn extract_cookie_value(header: &str, name: &str) -> Option<String> {
    header.split(';').map(str::trim).find_map(|pair| {
        let mut parts = pair.splitn(2, '=');
        let key = parts.next()?.trim();
        let value = parts.next()?.trim();
        if key == name {
            Some(value.to_string())
        } else {
            None
        }
    })
}

fn same_site_value(same_site: SameSite) -> &'static str {
    match same_site {
        SameSite::Lax => "Lax",
        SameSite::Strict => "Strict",
        SameSite::None => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_cookie_without_duration_omits_max_age() {
        let cookie = build_session_cookie("session_id", "abc", None, CookieOptions::default());
        assert!(cookie.contains("session_id=abc"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(!cookie.contains("Max-Age"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn session_cookie_with_duration_sets_max_age() {
        let opts = CookieOptions {
            secure: true,
            same_site: SameSite::Strict,
        };
        let cookie = build_session_cookie("session_id", "abc", Some(3600), opts);
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.contains("SameSite=Strict"));
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn clear_cookie_sets_max_age_zero() {
        let cookie = build_clear_cookie("session_id", CookieOptions::default());
        assert!(cookie.contains("session_id="));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn extract_cookie_value_finds_matching_name() {
        let header = "a=1; session_id=cookie-value; b=2";
        assert_eq!(
            extract_cookie_value(header, "session_id").as_deref(),
            Some("cookie-value")
        );
        assert!(extract_cookie_value(header, "missing").is_none());
    }
}
