//! # Parser de Mensajes HTTP/1.1
//! src/http/parser.rs
//!
//! Lee un request desde un stream orientado a líneas:
//!
//! ```text
//! POST /login HTTP/1.1\r\n          ← start line (exactamente una línea)
//! Content-Length: 30\r\n            ← headers hasta una línea vacía o EOF
//! \r\n
//! account=gugu&password=password    ← body de Content-Length bytes
//! ```
//!
//! No hay chunked transfer-encoding: sin `Content-Length` el body queda vacío
//! en vez de bloquear esperando más datos.

use super::headers::HeaderMap;
use super::request::{HttpRequest, StartLine};
use crate::error::{Result, ServerError};
use std::io::{BufRead, Read};

/// Largo máximo de una línea del head (start line o header)
pub const MAX_LINE_BYTES: usize = 8 * 1024;

/// Cantidad máxima de headers por request
pub const MAX_HEADERS: usize = 100;

/// Tamaño máximo aceptado para `Content-Length`
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Lee un request completo
///
/// Retorna `Ok(None)` si la start line está vacía (el cliente cerró la
/// conexión sin enviar nada): en ese caso no se responde.
pub fn read_request<R: BufRead>(reader: &mut R) -> Result<Option<HttpRequest>> {
    let start_line = match read_line(reader)? {
        Some(line) if !line.is_empty() => StartLine::parse(&line)?,
        _ => return Ok(None),
    };

    let headers = read_headers(reader)?;
    let body = read_body(reader, &headers)?;

    Ok(Some(HttpRequest::new(start_line, headers, body)))
}

/// Lee headers hasta la línea vacía que separa head y body, o hasta EOF
fn read_headers<R: BufRead>(reader: &mut R) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let mut count = 0;

    while let Some(line) = read_line(reader)? {
        if line.is_empty() {
            break;
        }

        count += 1;
        if count > MAX_HEADERS {
            return Err(ServerError::malformed(format!(
                "Too many headers (max: {})",
                MAX_HEADERS
            )));
        }

        let (name, value) = HeaderMap::parse_line(&line)?;
        headers.insert(name, value);
    }

    Ok(headers)
}

/// Lee exactamente `Content-Length` bytes (o lo que llegue antes de EOF)
fn read_body<R: BufRead>(reader: &mut R, headers: &HeaderMap) -> Result<String> {
    let Some(length) = headers.content_length()? else {
        return Ok(String::new());
    };

    if length > MAX_BODY_BYTES {
        return Err(ServerError::malformed(format!(
            "Body too large: {} bytes (max: {})",
            length, MAX_BODY_BYTES
        )));
    }

    let mut buffer = Vec::with_capacity(length);
    reader.by_ref().take(length as u64).read_to_end(&mut buffer)?;

    String::from_utf8(buffer).map_err(|_| ServerError::malformed("Body is not valid UTF-8"))
}

/// Lee una línea sin el terminador (`\r\n` o `\n`); `None` en EOF
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut buffer = Vec::new();
    let read = reader
        .by_ref()
        .take(MAX_LINE_BYTES as u64 + 1)
        .read_until(b'\n', &mut buffer)?;

    if read == 0 {
        return Ok(None);
    }

    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    } else if buffer.len() > MAX_LINE_BYTES {
        return Err(ServerError::malformed(format!(
            "Line too long (max: {} bytes)",
            MAX_LINE_BYTES
        )));
    }

    String::from_utf8(buffer)
        .map(Some)
        .map_err(|_| ServerError::malformed("Request head is not valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use std::io::Cursor;

    fn parse(raw: &[u8]) -> Result<Option<HttpRequest>> {
        read_request(&mut Cursor::new(raw))
    }

    #[test]
    fn test_parse_simple_get() {
        let request = parse(b"GET /index.html HTTP/1.1\r\nHost: x\r\n\r\n").unwrap().unwrap();
        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/index.html");
        assert_eq!(request.header("Host"), Some("x"));
        assert_eq!(request.body(), "");
    }

    #[test]
    fn test_bare_newlines_accepted() {
        let request = parse(b"GET / HTTP/1.1\nHost: x\n\n").unwrap().unwrap();
        assert_eq!(request.header("Host"), Some("x"));
    }

    #[test]
    fn test_headers_until_eof() {
        // Sin línea vacía final: los headers terminan en EOF
        let request = parse(b"GET / HTTP/1.1\r\nHost: x").unwrap().unwrap();
        assert_eq!(request.header("Host"), Some("x"));
    }

    #[test]
    fn test_empty_stream_yields_nothing() {
        assert!(parse(b"").unwrap().is_none());
    }

    #[test]
    fn test_blank_start_line_yields_nothing() {
        assert!(parse(b"\r\n").unwrap().is_none());
    }

    #[test]
    fn test_header_without_delimiter() {
        let result = parse(b"GET / HTTP/1.1\r\nHost localhost\r\n\r\n");
        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
    }

    #[test]
    fn test_post_body_by_content_length() {
        let raw = b"POST /login HTTP/1.1\r\nContent-Length: 30\r\n\r\naccount=gugu&password=passwordTRAILING";
        let request = parse(raw).unwrap().unwrap();
        assert_eq!(request.body(), "account=gugu&password=password");
    }

    #[test]
    fn test_body_counts_bytes_not_chars() {
        let body = "name=héllo";
        let raw = format!(
            "POST /x HTTP/1.1\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let request = parse(raw.as_bytes()).unwrap().unwrap();
        assert_eq!(request.body(), body);
    }

    #[test]
    fn test_post_without_content_length_has_empty_body() {
        let request = parse(b"POST /login HTTP/1.1\r\n\r\naccount=gugu").unwrap().unwrap();
        assert_eq!(request.body(), "");
        assert!(request.query_params().is_empty());
    }

    #[test]
    fn test_short_body_takes_what_arrived() {
        let request = parse(b"POST /x HTTP/1.1\r\nContent-Length: 100\r\n\r\nq=1").unwrap().unwrap();
        assert_eq!(request.body(), "q=1");
    }

    #[test]
    fn test_invalid_content_length() {
        let result = parse(b"POST /x HTTP/1.1\r\nContent-Length: many\r\n\r\n");
        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
    }

    #[test]
    fn test_body_too_large() {
        let raw = format!("POST /x HTTP/1.1\r\nContent-Length: {}\r\n\r\n", MAX_BODY_BYTES + 1);
        assert!(parse(raw.as_bytes()).is_err());
    }

    #[test]
    fn test_line_too_long() {
        let raw = format!("GET /{} HTTP/1.1\r\n\r\n", "a".repeat(MAX_LINE_BYTES + 10));
        assert!(matches!(parse(raw.as_bytes()), Err(ServerError::MalformedRequest(_))));
    }

    #[test]
    fn test_too_many_headers() {
        let mut raw = String::from("GET / HTTP/1.1\r\n");
        for i in 0..=MAX_HEADERS {
            raw.push_str(&format!("X-H{}: v\r\n", i));
        }
        raw.push_str("\r\n");
        assert!(parse(raw.as_bytes()).is_err());
    }

    #[test]
    fn test_non_utf8_head() {
        let result = parse(b"\x00\x01\xff\xfegarbage\r\n\r\n");
        assert!(matches!(result, Err(ServerError::MalformedRequest(_))));
    }
}
