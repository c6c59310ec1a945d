//! # Content-Type por extensión
//! src/http/content_type.rs

/// Content-Type para extensiones desconocidas
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Tabla fija extensión → tipo MIME
const MIME_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("svg", "image/svg+xml"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("ico", "image/x-icon"),
    ("woff", "font/woff"),
    ("woff2", "font/woff2"),
];

/// Resuelve el Content-Type a partir de la extensión del path
///
/// ```
/// use origin_server::http::content_type;
///
/// assert_eq!(content_type::from_path("/index.html"), "text/html");
/// assert_eq!(content_type::from_path("/css/styles.css"), "text/css");
/// assert_eq!(content_type::from_path("/archive.bin"), "application/octet-stream");
/// ```
pub fn from_path(path: &str) -> &'static str {
    let path = path.split('?').next().unwrap_or(path);
    let file_name = path.rsplit('/').next().unwrap_or(path);

    let Some((_, extension)) = file_name.rsplit_once('.') else {
        return DEFAULT_CONTENT_TYPE;
    };

    MIME_TYPES
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map(|(_, mime)| *mime)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
