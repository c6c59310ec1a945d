//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.1
//! y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.1
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use origin_server::http::HttpResponse;
//!
//! let response = HttpResponse::ok("text/html", b"<h1>Hola</h1>".to_vec());
//!
//! let bytes = response.serialize();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::cookie::SESSION_COOKIE;
use super::headers::HeaderMap;
use super::StatusCode;

const CONTENT_TYPE: &str = "Content-Type";
const CONTENT_LENGTH: &str = "Content-Length";
const LOCATION: &str = "Location";
const SET_COOKIE: &str = "Set-Cookie";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Código de estado HTTP (200, 302, etc.)
    status: StatusCode,

    /// Headers en orden de inserción; un nombre repetido se sobrescribe
    headers: HeaderMap,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl HttpResponse {
    /// Crea una respuesta sin body con `Content-Length: 0`
    pub fn new(status: StatusCode) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_LENGTH, "0");
        Self {
            status,
            headers,
            body: Vec::new(),
        }
    }

    /// 200 OK con el Content-Type dado
    ///
    /// `Content-Length` es el largo en bytes del body, no en caracteres.
    pub fn ok(content_type: &str, body: Vec<u8>) -> Self {
        let mut response = Self::new(StatusCode::Ok);
        response.set_body(content_type, body);
        response
    }

    /// 302 Found hacia `location`, con body vacío
    ///
    /// ```
    /// use origin_server::http::{HttpResponse, StatusCode};
    ///
    /// let response = HttpResponse::redirect("/500.html");
    /// assert_eq!(response.status(), StatusCode::Found);
    /// assert_eq!(response.header("Location"), Some("/500.html"));
    /// ```
    pub fn redirect(location: &str) -> Self {
        let mut response = Self::new(StatusCode::Found);
        response.redirect_to(location);
        response
    }

    /// Agrega un header (versión builder)
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header; si ya existe, se sobrescribe
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name, value);
    }

    /// Reemplaza el body y recalcula `Content-Type` y `Content-Length`
    pub fn set_body(&mut self, content_type: &str, body: Vec<u8>) {
        self.headers.insert(CONTENT_TYPE, content_type);
        self.headers.insert(CONTENT_LENGTH, body.len().to_string());
        self.body = body;
    }

    /// Cambia el status conservando headers y body
    pub fn set_status(&mut self, status: StatusCode) {
        self.status = status;
    }

    /// Convierte la respuesta en curso en una redirección 302
    ///
    /// Conserva los headers que no describen el body (por ejemplo `Set-Cookie`).
    pub fn redirect_to(&mut self, location: &str) {
        self.status = StatusCode::Found;
        self.body.clear();
        self.headers.remove(CONTENT_TYPE);
        self.headers.insert(CONTENT_LENGTH, "0");
        self.headers.insert(LOCATION, location);
    }

    /// Agrega `Set-Cookie: JSESSIONID=<id>`
    pub fn set_session_cookie(&mut self, session_id: &str) {
        self.headers
            .insert(SET_COOKIE, format!("{}={}", SESSION_COOKIE, session_id));
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn serialize(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(128 + self.body.len());

        result.extend_from_slice(format!("HTTP/1.1 {}\r\n", self.status).as_bytes());

        for (name, value) in self.headers.iter() {
            result.extend_from_slice(format!("{}: {}\r\n", name, value).as_bytes());
        }

        result.extend_from_slice(b"\r\n");
        result.extend_from_slice(&self.body);

        result
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
