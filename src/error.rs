//! # Errores del Servidor
//! src/error.rs
//!
//! Taxonomía de errores del servidor. Cada error pertenece a un `ErrorKind`,
//! que es la clave con la que el router elige el exception handler que
//! traduce el error a una respuesta HTTP.
//!
//! Política de propagación:
//! - Errores de un request (parsing, recurso) → respuesta de error, la
//!   conexión se cierra limpiamente.
//! - Errores de I/O del socket → se loguean y se abandona la conexión.
//! - Solo un error del socket de escucha detiene el servidor.

use std::io;
use thiserror::Error;

/// Errores que pueden ocurrir en el servidor
#[derive(Debug, Error)]
pub enum ServerError {
    /// Start line, header o body que no se pueden parsear
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// El recurso estático solicitado no existe
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// El recurso existe pero no se pudo leer
    #[error("failed to read resource {path}: {source}")]
    Resource {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Error de lectura/escritura en el socket de una conexión
    #[error("i/o failure: {0}")]
    Io(#[from] io::Error),

    /// No se pudo abrir el socket de escucha
    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    /// Configuración inválida
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Categoría de un error, usada como clave de la tabla de exception handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedRequest,
    NotFound,
    Internal,
    Io,
    Startup,
}

impl ServerError {
    /// Clasifica el error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServerError::MalformedRequest(_) => ErrorKind::MalformedRequest,
            ServerError::ResourceNotFound(_) => ErrorKind::NotFound,
            ServerError::Resource { .. } => ErrorKind::Internal,
            ServerError::Io(_) => ErrorKind::Io,
            ServerError::Bind { .. } | ServerError::Config(_) => ErrorKind::Startup,
        }
    }

    /// Atajo para construir un `MalformedRequest`
    pub fn malformed(message: impl Into<String>) -> Self {
        ServerError::MalformedRequest(message.into())
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
