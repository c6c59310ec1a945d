//! # Origin Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1.
//!
//! Lee la configuración (CLI + variables de entorno), inicializa el logging,
//! arma el router y arranca el accept loop.

use clap::Parser;
use origin_server::config::Config;
use origin_server::error::Result;
use origin_server::logging;
use origin_server::resource::StaticFiles;
use origin_server::router::Router;
use origin_server::server::Server;
use origin_server::session::SessionStore;
use origin_server::user::{InMemoryUserStore, UserStore};
use std::sync::Arc;
use tracing::{error, info};

fn main() {
    let config = Config::parse();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    logging::init(&config.log_level);
    config.print_summary();

    if let Err(e) = run(config) {
        error!(error = %e, "error fatal");
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}

fn run(config: Config) -> Result<()> {
    let users: Arc<dyn UserStore> = match &config.users_file {
        Some(path) => {
            let store = InMemoryUserStore::from_json_file(path)?;
            info!(users = store.len(), %path, "usuarios cargados");
            Arc::new(store)
        }
        None => Arc::new(InMemoryUserStore::with_defaults()),
    };

    let router = Router::new(
        Arc::new(StaticFiles::new(&config.static_dir)),
        users,
        Arc::new(SessionStore::new()),
    );

    let mut server = Server::new(config, router);
    server.run()
}
