//! # Modelo de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Vista inmutable sobre un request ya parseado.
//!
//! ## Componentes
//!
//! 1. **Start Line**: `METHOD /path?query HTTP/1.1`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Cookies**: Extraídas del header `Cookie`
//! 4. **Body**: Texto, presente solo si se declaró `Content-Length`
//!
//! Una vez construido, el request no se puede modificar: el worker que
//! atiende la conexión es su único dueño.

use super::cookie::Cookies;
use super::headers::HeaderMap;
use super::query::QueryParams;
use crate::error::{Result, ServerError};
use std::io::Cursor;
use std::str::FromStr;

const ROOT: &str = "/";
const DEFAULT_PAGE: &str = "/index.html";
const INDEX_FILE: &str = "index.html";
const HTML_EXTENSION: &str = ".html";
const COOKIE_HEADER: &str = "Cookie";

/// Métodos HTTP reconocidos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    GET,
    HEAD,
    POST,
    PUT,
    PATCH,
    DELETE,
    OPTIONS,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
        }
    }
}

impl FromStr for Method {
    type Err = ServerError;

    /// Un método fuera de los reconocidos es un request malformado
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GET" => Ok(Method::GET),
            "HEAD" => Ok(Method::HEAD),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            "OPTIONS" => Ok(Method::OPTIONS),
            _ => Err(ServerError::malformed(format!("Unsupported HTTP method: {}", s))),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primera línea del request: método, request-target y versión
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartLine {
    method: Method,
    target: String,
    version: String,
}

impl StartLine {
    /// Parsea `GET /path?query HTTP/1.1`
    ///
    /// Debe tener exactamente 3 partes separadas por espacios.
    pub fn parse(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [method, target, version] = parts[..] else {
            return Err(ServerError::malformed(format!("Invalid request line: {}", line)));
        };

        let method = method.parse::<Method>()?;

        if version != "HTTP/1.0" && version != "HTTP/1.1" {
            return Err(ServerError::malformed(format!("Invalid HTTP version: {}", version)));
        }

        Ok(Self {
            method,
            target: target.to_string(),
            version: version.to_string(),
        })
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Request-target completo, con query string
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Path sin query string; un target sin path se trata como `/`
    pub fn path(&self) -> &str {
        let path = match self.target.split_once('?') {
            Some((path, _)) => path,
            None => &self.target,
        };
        if path.is_empty() {
            ROOT
        } else {
            path
        }
    }

    /// Query string (lo que sigue a `?`), si existe
    pub fn query_string(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, query)| query)
    }
}

/// Request HTTP parseado e inmutable
#[derive(Debug, Clone)]
pub struct HttpRequest {
    start_line: StartLine,
    headers: HeaderMap,
    cookies: Cookies,
    query_params: QueryParams,
    body: String,
}

impl HttpRequest {
    /// Construye el request a partir de sus partes ya parseadas
    ///
    /// Las cookies salen del header `Cookie`. Los query parameters salen de
    /// la query string en un GET y del body en cualquier otro método.
    pub fn new(start_line: StartLine, headers: HeaderMap, body: String) -> Self {
        let cookies = Cookies::parse(headers.get(COOKIE_HEADER));
        let query_params = match start_line.method() {
            Method::GET => QueryParams::parse(start_line.query_string().unwrap_or("")),
            _ => QueryParams::parse(&body),
        };

        Self {
            start_line,
            headers,
            cookies,
            query_params,
            body,
        }
    }

    /// Parsea un request completo desde bytes
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use origin_server::http::HttpRequest;
    ///
    /// let raw = b"GET /search?q=abc HTTP/1.1\r\nHost: x\r\n\r\n";
    /// let request = HttpRequest::parse(raw).unwrap();
    ///
    /// assert_eq!(request.path(), "/search");
    /// assert_eq!(request.query_params().get("q"), Some("abc"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(buffer);
        super::parser::read_request(&mut reader)?
            .ok_or_else(|| ServerError::malformed("Empty request"))
    }

    pub fn start_line(&self) -> &StartLine {
        &self.start_line
    }

    pub fn method(&self) -> Method {
        self.start_line.method()
    }

    /// Request-target completo, tal como llegó
    pub fn target(&self) -> &str {
        self.start_line.target()
    }

    /// Path sin query string
    pub fn path(&self) -> &str {
        self.start_line.path()
    }

    /// Path con las reglas de documento por defecto y extensión aplicadas
    ///
    /// - `/` → `/index.html` (y `/dir/` → `/dir/index.html`)
    /// - Sin extensión: se agrega `.html` justo antes de `?query`
    /// - Con extensión: sin cambios
    ///
    /// ```
    /// use origin_server::http::HttpRequest;
    ///
    /// let request = HttpRequest::parse(b"GET /about?x=1 HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(request.normalized_path(), "/about.html?x=1");
    /// ```
    pub fn normalized_path(&self) -> String {
        let normalized = self.resource_path();
        match self.start_line.query_string() {
            Some(query) => format!("{}?{}", normalized, query),
            None => normalized,
        }
    }

    /// Path normalizado sin query string: el nombre concreto del recurso
    pub fn resource_path(&self) -> String {
        let path = self.path();
        if path.ends_with('/') {
            return if path == ROOT {
                DEFAULT_PAGE.to_string()
            } else {
                format!("{}{}", path, INDEX_FILE)
            };
        }
        if has_extension(path) {
            path.to_string()
        } else {
            format!("{}{}", path, HTML_EXTENSION)
        }
    }

    pub fn version(&self) -> &str {
        self.start_line.version()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Obtiene un header específico (sin importar mayúsculas)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    /// Identificador de sesión enviado en la cookie `JSESSIONID`
    pub fn session_id(&self) -> Option<&str> {
        self.cookies.session_id()
    }

    pub fn query_params(&self) -> &QueryParams {
        &self.query_params
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

/// El último segmento del path tiene extensión
fn has_extension(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .map_or(false, |segment| segment.contains('.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(raw: &[u8]) -> HttpRequest {
        HttpRequest::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_start_line() {
        let line = StartLine::parse("GET /index.html HTTP/1.1").unwrap();
        assert_eq!(line.method(), Method::GET);
        assert_eq!(line.target(), "/index.html");
        assert_eq!(line.version(), "HTTP/1.1");
    }

    #[test]
    fn test_unsupported_method() {
        let result = StartLine::parse("BREW /pot HTTP/1.1");
        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
    }

    #[test]
    fn test_invalid_version() {
        assert!(StartLine::parse("GET / HTTP/2.0").is_err());
    }

    #[test]
    fn test_invalid_request_line() {
        assert!(StartLine::parse("GET").is_err());
        assert!(StartLine::parse("GET / HTTP/1.1 extra").is_err());
    }

    #[test]
    fn test_method_round_trip() {
        for name in ["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
            assert_eq!(name.parse::<Method>().unwrap().as_str(), name);
        }
    }

    #[test]
    fn test_path_strips_query() {
        let req = request(b"GET /search?q=abc HTTP/1.1\r\n\r\n");
        assert_eq!(req.path(), "/search");
        assert_eq!(req.target(), "/search?q=abc");
    }

    #[test]
    fn test_target_without_path_is_root() {
        let req = request(b"GET ?q=abc HTTP/1.1\r\n\r\n");
        assert_eq!(req.path(), "/");
        assert_eq!(req.normalized_path(), "/index.html?q=abc");
    }

    #[test]
    fn test_normalized_path() {
        assert_eq!(request(b"GET / HTTP/1.1\r\n\r\n").normalized_path(), "/index.html");
        assert_eq!(request(b"GET /about HTTP/1.1\r\n\r\n").normalized_path(), "/about.html");
        assert_eq!(
            request(b"GET /about?x=1 HTTP/1.1\r\n\r\n").normalized_path(),
            "/about.html?x=1"
        );
        assert_eq!(request(b"GET /style.css HTTP/1.1\r\n\r\n").normalized_path(), "/style.css");
    }

    #[test]
    fn test_normalized_path_ignores_dots_in_query() {
        let req = request(b"GET /login?account=gugu&email=a.b HTTP/1.1\r\n\r\n");
        assert_eq!(req.normalized_path(), "/login.html?account=gugu&email=a.b");
        assert_eq!(req.resource_path(), "/login.html");
    }

    #[test]
    fn test_normalized_path_directory() {
        let req = request(b"GET /docs/ HTTP/1.1\r\n\r\n");
        assert_eq!(req.resource_path(), "/docs/index.html");
    }

    #[test]
    fn test_normalized_path_dot_in_directory_only() {
        let req = request(b"GET /v1.2/notes HTTP/1.1\r\n\r\n");
        assert_eq!(req.resource_path(), "/v1.2/notes.html");
    }

    #[test]
    fn test_get_query_params() {
        let req = request(b"GET /search?q=abc HTTP/1.1\r\n\r\n");
        assert_eq!(req.query_params().get("q"), Some("abc"));
        assert_eq!(req.query_params().len(), 1);
    }

    #[test]
    fn test_post_query_params_from_body() {
        let get = request(b"GET /search?q=abc HTTP/1.1\r\n\r\n");
        let post = request(b"POST /search HTTP/1.1\r\nContent-Length: 5\r\n\r\nq=abc");

        assert_eq!(post.body(), "q=abc");
        assert_eq!(post.query_params(), get.query_params());
    }

    #[test]
    fn test_post_ignores_target_query() {
        let req = request(b"POST /search?q=url HTTP/1.1\r\nContent-Length: 6\r\n\r\nq=body");
        assert_eq!(req.query_params().get("q"), Some("body"));
    }

    #[test]
    fn test_headers_and_cookies() {
        let req = request(
            b"GET / HTTP/1.1\r\nHost: localhost:8080\r\nCookie: theme=dark; JSESSIONID=abc123\r\n\r\n",
        );
        assert_eq!(req.header("host"), Some("localhost:8080"));
        assert_eq!(req.cookies().get("theme"), Some("dark"));
        assert_eq!(req.session_id(), Some("abc123"));
    }

    #[test]
    fn test_no_cookie_header_is_anonymous() {
        let req = request(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(req.session_id(), None);
        assert!(req.cookies().is_empty());
    }

    #[test]
    fn test_parse_empty_buffer() {
        assert!(matches!(HttpRequest::parse(b""), Err(ServerError::MalformedRequest(_))));
    }
}
