//! # Procesamiento de una Conexión
//! src/server/connection.rs
//!
//! Un request por conexión: se lee completo, se genera la respuesta, se
//! escribe y se cierra el socket.
//!
//! ```text
//! Init → ParseRequest → (LoginAttempt) → ResolveResource → BuildResponse → Sent
//!             └──────────────── error ──────────────────────→ ErrorSent
//! ```
//!
//! Un request malformado recibe igual una respuesta completa. Un error de
//! I/O en el socket abandona la conexión sin afectar a las demás.

use crate::error::{Result, ServerError};
use crate::http::parser;
use crate::router::Router;
use std::io::{BufReader, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Atiende una conexión TCP aceptada
pub fn handle_connection(
    mut stream: TcpStream,
    router: &Router,
    read_timeout: Option<Duration>,
) -> Result<()> {
    stream.set_read_timeout(read_timeout)?;

    let result = process(&mut stream, router);

    // El cliente ve EOF después de la respuesta
    let _ = stream.shutdown(Shutdown::Write);
    result
}

/// Lee un request del stream y escribe su respuesta
///
/// Retorna `Ok(())` sin escribir nada si el cliente cerró sin enviar la
/// start line.
pub fn process<S: Read + Write>(stream: &mut S, router: &Router) -> Result<()> {
    let start = Instant::now();

    let parsed = {
        let mut reader = BufReader::new(&mut *stream);
        parser::read_request(&mut reader)
    };

    let response = match parsed {
        Ok(Some(request)) => {
            info!(method = %request.method(), uri = %request.target(), "request recibido");
            router.route(&request)
        }
        Ok(None) => {
            debug!("conexión cerrada sin request");
            return Ok(());
        }
        Err(ServerError::Io(e)) => return Err(ServerError::Io(e)),
        Err(error) => {
            warn!(%error, "request malformado");
            router.handle_error(&error)
        }
    };

    stream.write_all(&response.serialize())?;
    stream.flush()?;

    info!(
        status = response.status().as_u16(),
        bytes = response.body().len(),
        latency_ms = start.elapsed().as_secs_f64() * 1000.0,
        "respuesta enviada"
    );

    Ok(())
}
