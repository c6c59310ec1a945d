//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo convierte un request en una respuesta. Nunca falla: cualquier
//! error se traduce a una respuesta con los exception handlers.
//!
//! ## Flujo
//!
//! ```text
//! Request → (login si el path contiene "login") → recurso estático → Response
//!                         │                              │
//!                         └──────── error ───────────────┴→ ExceptionHandlers
//! ```

use crate::error::{Result, ServerError};
use crate::handler::{ExceptionHandlers, LoginHandler};
use crate::http::{content_type, HttpRequest, HttpResponse, StatusCode};
use crate::resource::ResourceLookup;
use crate::session::SessionStore;
use crate::user::UserStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Segmento del path que dispara un intento de login
const LOGIN_SEGMENT: &str = "login";

const SERVER_NAME: &str = "origin_server";

/// Router que despacha requests a recursos estáticos y handlers
pub struct Router {
    resources: Arc<dyn ResourceLookup>,
    sessions: Arc<SessionStore>,
    login: LoginHandler,
    exceptions: ExceptionHandlers,
}

impl Router {
    /// Crea un router con la tabla de exception handlers por defecto
    pub fn new(
        resources: Arc<dyn ResourceLookup>,
        users: Arc<dyn UserStore>,
        sessions: Arc<SessionStore>,
    ) -> Self {
        Self {
            resources,
            sessions,
            login: LoginHandler::new(users),
            exceptions: ExceptionHandlers::default(),
        }
    }

    /// Reemplaza la tabla de exception handlers
    pub fn with_exception_handlers(mut self, exceptions: ExceptionHandlers) -> Self {
        self.exceptions = exceptions;
        self
    }

    /// Store de sesiones compartido por todas las conexiones
    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// Genera la respuesta para un request
    ///
    /// # Ejemplo
    /// ```
    /// use std::sync::Arc;
    /// use origin_server::http::{HttpRequest, StatusCode};
    /// use origin_server::resource::MemoryResources;
    /// use origin_server::router::Router;
    /// use origin_server::session::SessionStore;
    /// use origin_server::user::InMemoryUserStore;
    ///
    /// let router = Router::new(
    ///     Arc::new(MemoryResources::new().with("/index.html", "<h1>hola</h1>")),
    ///     Arc::new(InMemoryUserStore::with_defaults()),
    ///     Arc::new(SessionStore::new()),
    /// );
    ///
    /// let request = HttpRequest::parse(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    /// let response = router.route(&request);
    /// assert_eq!(response.status(), StatusCode::Ok);
    /// ```
    pub fn route(&self, request: &HttpRequest) -> HttpResponse {
        let mut response = HttpResponse::new(StatusCode::Ok);

        if let Err(error) = self.dispatch(request, &mut response) {
            warn!(request_target = %request.target(), %error, "request fallido");
            self.exceptions.handle(&error, Some(request), &mut response);
        }

        self.add_common_headers(&mut response);
        response
    }

    /// Respuesta para un error ocurrido antes de tener un request (parsing)
    pub fn handle_error(&self, error: &ServerError) -> HttpResponse {
        let mut response = HttpResponse::new(StatusCode::Ok);
        self.exceptions.handle(error, None, &mut response);
        self.add_common_headers(&mut response);
        response
    }

    fn dispatch(&self, request: &HttpRequest, response: &mut HttpResponse) -> Result<()> {
        if request.path().contains(LOGIN_SEGMENT) {
            if let Some(session_id) = self.login.login(request, &self.sessions) {
                response.set_session_cookie(session_id.as_str());
            }
        }

        let path = request.resource_path();
        debug!(%path, "resolviendo recurso");

        let body = self
            .resources
            .lookup(&path)
            .map_err(|source| ServerError::Resource {
                path: path.clone(),
                source,
            })?
            .ok_or_else(|| ServerError::ResourceNotFound(path.clone()))?;

        response.set_body(content_type::from_path(&path), body);
        Ok(())
    }

    /// Agrega headers comunes a todas las respuestas
    fn add_common_headers(&self, response: &mut HttpResponse) {
        response.add_header("Server", SERVER_NAME);
        response.add_header("Connection", "close");
    }
}
