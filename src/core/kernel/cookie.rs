use once_cell::sync::Lazy;
use regex::Regex;

/// Cookie key for the fragment taken from the `Set-Cookie` header
pub const HEADER_COOKIE_KEY: &str = "__cfduid";
/// Cookie key for the fragment taken from the inline script in the body
pub const BODY_COOKIE_KEY: &str = "a";

static HEADER_COOKIE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"__cfduid=([a-f0-9]{46})").expect("valid header cookie regex"));

static BODY_COOKIE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"document\.cookie="a=([a-f0-9]{32});path=/;";"#).expect("valid body cookie regex")
});

/// Pulls the two anti-bot cookie fragments out of the handshake response.
///
/// The exchange front-end is scraped, so the matching rules are kept behind a
/// trait and can be replaced without touching the connection logic.
pub trait TokenExtractor: Send + Sync {
    /// Fragment carried by the `Set-Cookie` header text
    fn header_token(&self, set_cookie: &str) -> Option<String>;

    /// Fragment embedded in the response body
    fn body_token(&self, body: &str) -> Option<String>;
}

/// Default extractor matching the exchange's landing page
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexTokenExtractor;

impl TokenExtractor for RegexTokenExtractor {
    fn header_token(&self, set_cookie: &str) -> Option<String> {
        HEADER_COOKIE_RE
            .captures(set_cookie)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    fn body_token(&self, body: &str) -> Option<String> {
        BODY_COOKIE_RE
            .captures(body)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

/// Join the fragments into one `Cookie` header value.
///
/// Empty fragments are skipped; with neither present the result is `""`,
/// which is still sent as-is.
pub fn compose_cookie(header_token: Option<&str>, body_token: Option<&str>) -> String {
    let mut parts = Vec::with_capacity(2);
    if let Some(token) = header_token.filter(|t| !t.is_empty()) {
        parts.push(format!("{}={}", HEADER_COOKIE_KEY, token));
    }
    if let Some(token) = body_token.filter(|t| !t.is_empty()) {
        parts.push(format!("{}={}", BODY_COOKIE_KEY, token));
    }
    parts.join("; ")
}

/// Run both extractors over a handshake response and compose the cookie
pub fn cookie_from_response(extractor: &dyn TokenExtractor, set_cookie: &str, body: &str) -> String {
    let header_token = extractor.header_token(set_cookie);
    let body_token = extractor.body_token(body);
    compose_cookie(header_token.as_deref(), body_token.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER_HEX: &str = "d41d8cd98f00b204e9800998ecf8427ed41d8cd98f0012";
    const BODY_HEX: &str = "0123456789abcdef0123456789abcdef";

    fn set_cookie_header() -> String {
        format!(
            "__cfduid={}; expires=Mon, 23-Dec-2019 23:50:00 GMT; path=/; domain=.btc-e.com; HttpOnly",
            HEADER_HEX
        )
    }

    fn body() -> String {
        format!(
            r#"<html><script>document.cookie="a={};path=/;";location.href=document.URL;</script></html>"#,
            BODY_HEX
        )
    }

    #[test]
    fn test_fixture_lengths() {
        assert_eq!(HEADER_HEX.len(), 46);
        assert_eq!(BODY_HEX.len(), 32);
    }

    #[test]
    fn test_extracts_both_fragments() {
        let extractor = RegexTokenExtractor;
        assert_eq!(extractor.header_token(&set_cookie_header()).as_deref(), Some(HEADER_HEX));
        assert_eq!(extractor.body_token(&body()).as_deref(), Some(BODY_HEX));

        let cookie = cookie_from_response(&extractor, &set_cookie_header(), &body());
        assert_eq!(cookie, format!("__cfduid={}; a={}", HEADER_HEX, BODY_HEX));
    }

    #[test]
    fn test_uppercase_hex_does_not_match() {
        let extractor = RegexTokenExtractor;
        let header = format!("__cfduid={}", HEADER_HEX.to_uppercase());
        assert_eq!(extractor.header_token(&header), None);
    }

    #[test]
    fn test_composition_variants() {
        assert_eq!(compose_cookie(Some("aa"), None), "__cfduid=aa");
        assert_eq!(compose_cookie(None, Some("bb")), "a=bb");
        assert_eq!(compose_cookie(Some("aa"), Some("bb")), "__cfduid=aa; a=bb");
        assert_eq!(compose_cookie(None, None), "");
        assert_eq!(compose_cookie(Some(""), Some("bb")), "a=bb");
    }

    #[test]
    fn test_no_fragments_yields_empty_cookie() {
        let cookie = cookie_from_response(&RegexTokenExtractor, "", "<html></html>");
        assert_eq!(cookie, "");
    }
}
