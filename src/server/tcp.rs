//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Accept loop del servidor. Cada conexión aceptada se entrega al
//! `WorkerPool`; el loop queda libre para aceptar la siguiente. Si todos los
//! workers están ocupados y la cola llena, el accept se detiene hasta que
//! haya lugar.

use super::connection;
use super::pool::WorkerPool;
use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::router::Router;
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Servidor HTTP/1.1 con pool de workers
pub struct Server {
    config: Config,
    router: Arc<Router>,
    listener: Option<TcpListener>,
}

impl Server {
    pub fn new(config: Config, router: Router) -> Self {
        Self {
            config,
            router: Arc::new(router),
            listener: None,
        }
    }

    /// Usa un listener ya abierto en lugar de hacer bind en `run`
    pub fn with_listener(mut self, listener: TcpListener) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Hace bind a la dirección configurada
    ///
    /// # Errores
    ///
    /// `ServerError::Bind` si el puerto está ocupado o la dirección es inválida.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address).map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;
        let local = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(local)
    }

    /// Dirección local del listener, si ya hay uno
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// Acepta conexiones hasta que el listener falle
    ///
    /// Los errores de una conexión individual no detienen el loop; un error
    /// del listener sí, y se retorna.
    pub fn run(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let Some(listener) = self.listener.as_ref() else {
            return Err(ServerError::Config("listener not bound".to_string()));
        };

        let pool = WorkerPool::new(self.config.workers, self.config.queue_capacity)?;
        let read_timeout = self.config.read_timeout();

        info!(
            address = %listener.local_addr()?,
            workers = pool.size(),
            queue = self.config.queue_capacity,
            "servidor escuchando"
        );

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    debug!(%peer, "nueva conexión");

                    let router = Arc::clone(&self.router);
                    pool.execute(move || {
                        if let Err(e) = connection::handle_connection(stream, &router, read_timeout) {
                            error!(%peer, error = %e, "error en conexión");
                        }
                    });
                }
                Err(e) if is_connection_error(&e) => {
                    warn!(error = %e, "conexión abortada antes de aceptarla");
                }
                Err(e) => {
                    error!(error = %e, "error del listener, deteniendo servidor");
                    return Err(ServerError::Io(e));
                }
            }
        }

        Ok(())
    }
}

/// Errores de accept que afectan a una sola conexión
fn is_connection_error(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::ConnectionAborted
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::Interrupted
            | io::ErrorKind::WouldBlock
    )
}
