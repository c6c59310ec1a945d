//! # Cookies
//! src/http/cookie.rs
//!
//! Parsing del header `Cookie` (`name=value; name2=value2`).

use std::collections::HashMap;

/// Nombre de la cookie que transporta el identificador de sesión
pub const SESSION_COOKIE: &str = "JSESSIONID";

/// Cookies enviadas por el cliente
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    values: HashMap<String, String>,
}

impl Cookies {
    /// Parsea el valor del header `Cookie`; sin header no hay cookies
    ///
    /// ```
    /// use origin_server::http::Cookies;
    ///
    /// let cookies = Cookies::parse(Some("yummy=choco; JSESSIONID=abc"));
    /// assert_eq!(cookies.session_id(), Some("abc"));
    /// assert_eq!(Cookies::parse(None).session_id(), None);
    /// ```
    pub fn parse(header: Option<&str>) -> Self {
        let values = header
            .into_iter()
            .flat_map(|raw| raw.split(';'))
            .filter_map(|pair| {
                let (name, value) = pair.trim().split_once('=')?;
                let name = name.trim();
                if name.is_empty() {
                    return None;
                }
                Some((name.to_string(), value.trim().to_string()))
            })
            .collect();

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Identificador de sesión, si el cliente envió la cookie
    pub fn session_id(&self) -> Option<&str> {
        self.get(SESSION_COOKIE).filter(|id| !id.is_empty())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs() {
        let cookies = Cookies::parse(Some("yummy_cookie=choco; tasty_cookie=strawberry"));
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies.get("yummy_cookie"), Some("choco"));
        assert_eq!(cookies.get("tasty_cookie"), Some("strawberry"));
    }

    #[test]
    fn test_session_cookie() {
        let cookies = Cookies::parse(Some("JSESSIONID=656cef62-e3c4-40bc-a8df-94732920ed46"));
        assert_eq!(cookies.session_id(), Some("656cef62-e3c4-40bc-a8df-94732920ed46"));
    }

    #[test]
    fn test_missing_header_is_anonymous() {
        let cookies = Cookies::parse(None);
        assert!(cookies.is_empty());
        assert_eq!(cookies.session_id(), None);
    }

    #[test]
    fn test_malformed_pairs_skipped() {
        let cookies = Cookies::parse(Some("garbage; =nameless; ok=1;"));
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("ok"), Some("1"));
    }

    #[test]
    fn test_empty_session_id_is_none() {
        let cookies = Cookies::parse(Some("JSESSIONID="));
        assert_eq!(cookies.session_id(), None);
    }

    #[test]
    fn test_value_may_contain_equals() {
        let cookies = Cookies::parse(Some("token=a=b"));
        assert_eq!(cookies.get("token"), Some("a=b"));
    }
}
