//! # Módulo HTTP
//!
//! Este módulo implementa el protocolo HTTP/1.1 desde cero, sin usar
//! librerías de alto nivel. Incluye:
//!
//! - Parsing de requests (start line, headers, cookies, body)
//! - Query parameters y formularios
//! - Construcción y serialización de responses
//! - Códigos de estado y Content-Type por extensión
//!
//! ## Alcance
//!
//! - Un request por conexión (sin keep-alive ni pipelining)
//! - Sin chunked transfer encoding: el body se delimita con `Content-Length`
//!
//! ### Formato de Request
//!
//! ```text
//! GET /path?query=value HTTP/1.1\r\n
//! Header-Name: Header-Value\r\n
//! Cookie: JSESSIONID=...\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```

pub mod content_type;
pub mod cookie;
pub mod headers;
pub mod parser;
pub mod query;
pub mod request;
pub mod response;
pub mod status;

// Re-exportamos los tipos principales para facilitar su uso
pub use cookie::{Cookies, SESSION_COOKIE};
pub use headers::HeaderMap;
pub use query::QueryParams;
pub use request::{HttpRequest, Method, StartLine};
pub use response::HttpResponse;
pub use status::StatusCode;
