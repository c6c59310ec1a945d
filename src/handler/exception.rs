//! # Exception Handlers
//! src/handler/exception.rs
//!
//! Traducen un error a una respuesta bien formada modificando la respuesta
//! en curso. Cada `ErrorKind` tiene su handler en una tabla; agregar un caso
//! nuevo es agregar una variante y una entrada.

use crate::error::{ErrorKind, ServerError};
use crate::http::{HttpRequest, HttpResponse, StatusCode};

/// Página a la que se redirige ante un error interno
pub const INTERNAL_SERVER_ERROR_PAGE: &str = "/500.html";

const NOT_FOUND_BODY: &str = "<!DOCTYPE html><html><body><h1>404 Not Found</h1></body></html>";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExceptionHandler {
    /// Redirige a `/500.html`
    InternalServerError,

    /// 404 con una página mínima; nunca redirige, así un `/404.html`
    /// inexistente no produce un ciclo
    NotFound,
}

impl ExceptionHandler {
    pub fn handle(&self, _request: Option<&HttpRequest>, response: &mut HttpResponse) {
        match self {
            ExceptionHandler::InternalServerError => {
                response.redirect_to(INTERNAL_SERVER_ERROR_PAGE);
            }
            ExceptionHandler::NotFound => {
                response.set_status(StatusCode::NotFound);
                response.set_body("text/html", NOT_FOUND_BODY.as_bytes().to_vec());
            }
        }
    }
}

/// Tabla `ErrorKind → ExceptionHandler`
#[derive(Debug, Clone)]
pub struct ExceptionHandlers {
    table: Vec<(ErrorKind, ExceptionHandler)>,
    fallback: ExceptionHandler,
}

impl ExceptionHandlers {
    /// Tabla vacía: todo error cae en `fallback`
    pub fn new(fallback: ExceptionHandler) -> Self {
        Self {
            table: Vec::new(),
            fallback,
        }
    }

    /// Registra (o reemplaza) el handler para un tipo de error
    pub fn register(mut self, kind: ErrorKind, handler: ExceptionHandler) -> Self {
        self.table.retain(|(k, _)| *k != kind);
        self.table.push((kind, handler));
        self
    }

    pub fn resolve(&self, kind: ErrorKind) -> ExceptionHandler {
        self.table
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, handler)| *handler)
            .unwrap_or(self.fallback)
    }

    /// Busca el handler del error y lo aplica sobre la respuesta en curso
    pub fn handle(
        &self,
        error: &ServerError,
        request: Option<&HttpRequest>,
        response: &mut HttpResponse,
    ) {
        self.resolve(error.kind()).handle(request, response);
    }
}

impl Default for ExceptionHandlers {
    fn default() -> Self {
        Self::new(ExceptionHandler::InternalServerError)
            .register(ErrorKind::MalformedRequest, ExceptionHandler::InternalServerError)
            .register(ErrorKind::NotFound, ExceptionHandler::NotFound)
            .register(ErrorKind::Internal, ExceptionHandler::InternalServerError)
    }
}
