//! # Query Parameters
//! src/http/query.rs
//!
//! Gramática `key=value&key=value`, compartida por la query string de un GET
//! y por el body de un formulario (`application/x-www-form-urlencoded`).

use std::collections::HashMap;

/// Parámetros `nombre → valor` ya decodificados
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: HashMap<String, String>,
}

impl QueryParams {
    /// Parsea una query string en parámetros
    ///
    /// Ejemplo: "num=10&text=hello%20world&debug"
    /// Retorna: {"num": "10", "text": "hello world", "debug": ""}
    ///
    /// ```
    /// use origin_server::http::QueryParams;
    ///
    /// let params = QueryParams::parse("account=gugu&password=pass%21");
    /// assert_eq!(params.get("account"), Some("gugu"));
    /// assert_eq!(params.get("password"), Some("pass!"));
    /// ```
    pub fn parse(query: &str) -> Self {
        let mut params = HashMap::new();

        for pair in query.split('&') {
            if pair.is_empty() {
                continue;
            }

            // Parámetro sin valor (ej: "?debug") queda con valor vacío
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            params.insert(url_decode(key), url_decode(value));
        }

        Self { params }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(|s| s.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Decodifica `+` y secuencias `%XX`; si el resultado no es UTF-8 válido se
/// conserva el texto original
fn url_decode(s: &str) -> String {
    let spaced = s.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}
