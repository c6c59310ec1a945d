//! # Logging
//! src/logging.rs
//!
//! Inicializa `tracing` con salida a stdout. `RUST_LOG`, si está definida,
//! tiene prioridad sobre el filtro de la configuración.

use tracing_subscriber::EnvFilter;

/// Instala el subscriber global
///
/// Llamadas repetidas no tienen efecto (útil en tests).
pub fn init(filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_thread_names(true)
        .try_init();
}
