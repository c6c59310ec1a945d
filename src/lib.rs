//! # Origin Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 de origen, implementado sobre sockets bloqueantes y un
//! pool fijo de workers. Sirve archivos estáticos, permite login con
//! cuenta/contraseña y mantiene sesiones en memoria identificadas por la
//! cookie `JSESSIONID`.
//!
//! ## Arquitectura
//!
//! - `http`: parser, modelo de request, headers, cookies, query y respuesta
//! - `session`: store concurrente de sesiones
//! - `user`: cuentas y autenticación
//! - `resource`: búsqueda de recursos estáticos
//! - `handler`: login y exception handlers
//! - `router`: despacho de un request a su respuesta
//! - `server`: accept loop, pool de workers y procesamiento de conexiones
//! - `config` / `logging` / `error`: infraestructura
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use std::sync::Arc;
//! use origin_server::config::Config;
//! use origin_server::resource::StaticFiles;
//! use origin_server::router::Router;
//! use origin_server::server::Server;
//! use origin_server::session::SessionStore;
//! use origin_server::user::InMemoryUserStore;
//!
//! let config = Config::default();
//! let router = Router::new(
//!     Arc::new(StaticFiles::new(&config.static_dir)),
//!     Arc::new(InMemoryUserStore::with_defaults()),
//!     Arc::new(SessionStore::new()),
//! );
//! let mut server = Server::new(config, router);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logging;
pub mod resource;
pub mod router;
pub mod server;
pub mod session;
pub mod user;

pub use config::Config;
pub use error::{Result, ServerError};
pub use router::Router;
pub use server::Server;
