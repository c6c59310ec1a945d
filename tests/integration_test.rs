//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en un puerto efímero con un
//! directorio estático temporal, y habla con él por TCP.

use origin_server::config::Config;
use origin_server::resource::StaticFiles;
use origin_server::router::Router;
use origin_server::server::Server;
use origin_server::session::{SessionId, SessionStore};
use origin_server::user::InMemoryUserStore;
use std::fs;
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;

const INDEX: &str = "<h1>index</h1>";
const LOGIN: &str = "<form>login</form>";

/// Servidor corriendo en background con su directorio estático
struct TestServer {
    addr: SocketAddr,
    sessions: Arc<SessionStore>,
    _dir: TempDir,
}

fn start_server() -> TestServer {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), INDEX).unwrap();
    fs::write(dir.path().join("login.html"), LOGIN).unwrap();
    fs::create_dir(dir.path().join("css")).unwrap();
    fs::write(dir.path().join("css").join("styles.css"), "body {}").unwrap();

    let sessions = Arc::new(SessionStore::new());
    let router = Router::new(
        Arc::new(StaticFiles::new(dir.path())),
        Arc::new(InMemoryUserStore::with_defaults()),
        Arc::clone(&sessions),
    );

    let mut config = Config::default();
    config.workers = 4;
    config.queue_capacity = 8;

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let mut server = Server::new(config, router).with_listener(listener);
    thread::spawn(move || server.run());

    TestServer {
        addr,
        sessions,
        _dir: dir,
    }
}

/// Helper: envía bytes crudos y retorna la response completa
fn send_raw(addr: SocketAddr, raw: &[u8]) -> String {
    let mut stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.write_all(raw).unwrap();
    stream.flush().unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).unwrap();
    response
}

fn get(addr: SocketAddr, target: &str) -> String {
    send_raw(
        addr,
        format!("GET {} HTTP/1.1\r\nHost: localhost\r\n\r\n", target).as_bytes(),
    )
}

/// Helper: extrae el body de una response HTTP
fn extract_body(response: &str) -> &str {
    match response.find("\r\n\r\n") {
        Some(pos) => &response[pos + 4..],
        None => "",
    }
}

fn header<'a>(response: &'a str, name: &str) -> Option<&'a str> {
    let prefix = format!("{}: ", name);
    response
        .split("\r\n")
        .take_while(|line| !line.is_empty())
        .find_map(|line| line.strip_prefix(prefix.as_str()))
}

#[test]
fn test_get_index() {
    let server = start_server();
    let response = get(server.addr, "/index.html");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"), "got: {}", response);
    assert_eq!(header(&response, "Content-Type"), Some("text/html"));
    assert_eq!(header(&response, "Content-Length"), Some("14"));
    assert_eq!(header(&response, "Connection"), Some("close"));
    assert_eq!(extract_body(&response), INDEX);
}

#[test]
fn test_root_and_extensionless_paths() {
    let server = start_server();

    assert_eq!(extract_body(&get(server.addr, "/")), INDEX);
    assert_eq!(extract_body(&get(server.addr, "/index")), INDEX);
}

#[test]
fn test_css_content_type() {
    let server = start_server();
    let response = get(server.addr, "/css/styles.css");

    assert_eq!(header(&response, "Content-Type"), Some("text/css"));
    assert_eq!(extract_body(&response), "body {}");
}

#[test]
fn test_login_with_query_creates_session() {
    let server = start_server();
    let response = get(server.addr, "/login?account=gugu&password=password");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(extract_body(&response), LOGIN);

    let id = header(&response, "Set-Cookie")
        .and_then(|c| c.strip_prefix("JSESSIONID="))
        .expect("missing session cookie");
    let session = server.sessions.get(&SessionId::from(id)).unwrap();
    assert_eq!(session.attribute("user"), Some("gugu"));
}

#[test]
fn test_login_with_form_body() {
    let server = start_server();
    let body = "account=gugu&password=password";
    let raw = format!(
        "POST /login HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
        body.len(),
        body
    );
    let response = send_raw(server.addr, raw.as_bytes());

    assert!(header(&response, "Set-Cookie").is_some(), "got: {}", response);
    assert_eq!(server.sessions.len(), 1);
}

#[test]
fn test_failed_login_has_no_cookie() {
    let server = start_server();
    let response = get(server.addr, "/login?account=gugu&password=wrong");

    assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
    assert_eq!(header(&response, "Set-Cookie"), None);
    assert!(server.sessions.is_empty());
}

#[test]
fn test_malformed_header_gets_complete_response() {
    let server = start_server();
    let response = send_raw(server.addr, b"GET /index.html HTTP/1.1\r\nHost localhost\r\n\r\n");

    assert!(response.starts_with("HTTP/1.1 302 Found\r\n"), "got: {}", response);
    assert_eq!(header(&response, "Location"), Some("/500.html"));
    assert_eq!(header(&response, "Content-Length"), Some("0"));
    assert!(response.ends_with("\r\n\r\n"));
}

#[test]
fn test_missing_resource_is_404() {
    let server = start_server();
    let response = get(server.addr, "/missing.html");

    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"), "got: {}", response);
    assert!(extract_body(&response).contains("404"));
}

#[test]
fn test_path_traversal_is_not_served() {
    let server = start_server();
    let response = get(server.addr, "/../../etc/passwd");
    assert!(response.starts_with("HTTP/1.1 404 Not Found\r\n"), "got: {}", response);
}

#[test]
fn test_concurrent_requests() {
    let server = start_server();
    let addr = server.addr;

    let handles: Vec<_> = (0..16)
        .map(|_| thread::spawn(move || get(addr, "/index.html")))
        .collect();

    for handle in handles {
        let response = handle.join().unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK\r\n"));
        assert_eq!(extract_body(&response), INDEX);
    }
}

#[test]
fn test_concurrent_logins_get_distinct_sessions() {
    let server = start_server();
    let addr = server.addr;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(move || {
                let response = get(addr, "/login?account=gugu&password=password");
                header(&response, "Set-Cookie").map(str::to_string)
            })
        })
        .collect();

    let mut cookies: Vec<String> = handles
        .into_iter()
        .map(|h| h.join().unwrap().unwrap())
        .collect();
    cookies.sort();
    cookies.dedup();

    assert_eq!(cookies.len(), 8);
    assert_eq!(server.sessions.len(), 8);
}
