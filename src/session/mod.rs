use leptos::prelude::*;
use wasm_bindgen::JsCast;

pub(crate) const CSRF_COOKIE: &str = "csrftoken";
pub(crate) const CSRF_HEADER: &str = "X-CSRFToken";

pub(crate) const LOGIN_PATH: &str = "/login/";
pub(crate) const DASHBOARD_PATH: &str = "/dashboard/";
pub(crate) const ROOT_PATH: &str = "/";

/// Delay before leaving the auth page, so the success toast is readable.
pub(crate) const REDIRECT_DELAY_MS: u32 = 1000;

/// Find `name` in a `document.cookie` style string and percent-decode its value.
pub(crate) fn parse_cookie(raw: &str, name: &str) -> Option<String> {
    raw.split(';').find_map(|pair| {
        let (k, v) = pair.trim().split_once('=')?;
        if k != name {
            return None;
        }
        let decoded = urlencoding::decode(v)
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| v.to_string());
        Some(decoded)
    })
}

pub(crate) fn csrf_token() -> Option<String> {
    let raw = document()
        .dyn_into::<web_sys::HtmlDocument>()
        .ok()?
        .cookie()
        .ok()?;
    parse_cookie(&raw, CSRF_COOKIE).filter(|t| !t.is_empty())
}

/// Full page load; there is no client-side router.
pub(crate) fn redirect(path: &str) {
    if let Err(e) = window().location().set_href(path) {
        web_sys::console::error_1(&format!("redirect to {path} failed: {e:?}").into());
    }
}

pub(crate) fn redirect_after(path: &'static str, delay_ms: u32) {
    gloo_timers::callback::Timeout::new(delay_ms, move || redirect(path)).forget();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_finds_named_value() {
        let raw = "sessionid=abc; csrftoken=tok123; theme=pink";
        assert_eq!(parse_cookie(raw, CSRF_COOKIE).as_deref(), Some("tok123"));
    }

    #[test]
    fn test_parse_cookie_is_exact_name_match() {
        // A cookie whose name merely starts with the target must not match.
        let raw = "csrftoken_old=stale; csrftoken=fresh";
        assert_eq!(parse_cookie(raw, CSRF_COOKIE).as_deref(), Some("fresh"));
        assert_eq!(parse_cookie("xcsrftoken=1", CSRF_COOKIE), None);
    }

    #[test]
    fn test_parse_cookie_decodes_percent_encoding() {
        let raw = "csrftoken=a%2Bb%3Dc";
        assert_eq!(parse_cookie(raw, CSRF_COOKIE).as_deref(), Some("a+b=c"));
    }

    #[test]
    fn test_parse_cookie_empty_or_missing() {
        assert_eq!(parse_cookie("", CSRF_COOKIE), None);
        assert_eq!(parse_cookie("sessionid=abc", CSRF_COOKIE), None);
    }
}
