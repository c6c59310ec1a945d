//! # Handler de Login
//! src/handler/login.rs
//!
//! Valida `account` y `password` (query string en un GET, body del
//! formulario en un POST). Si son válidos crea una sesión con el atributo
//! `user`. Un login fallido no es un error: el request sigue su curso y se
//! muestra la página pedida.

use crate::http::HttpRequest;
use crate::session::{SessionId, SessionStore};
use crate::user::UserStore;
use std::sync::Arc;
use tracing::{info, warn};

pub const ACCOUNT_PARAM: &str = "account";
pub const PASSWORD_PARAM: &str = "password";

/// Atributo de sesión con la cuenta autenticada
pub const USER_ATTRIBUTE: &str = "user";

pub struct LoginHandler {
    users: Arc<dyn UserStore>,
}

impl LoginHandler {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Intenta autenticar el request
    ///
    /// Retorna el id de la sesión creada, o `None` si faltan credenciales o
    /// no son válidas.
    pub fn login(&self, request: &HttpRequest, sessions: &SessionStore) -> Option<SessionId> {
        let params = request.query_params();
        let (Some(account), Some(password)) =
            (params.get(ACCOUNT_PARAM), params.get(PASSWORD_PARAM))
        else {
            return None;
        };

        match self.users.authenticate(account, password) {
            Some(user) => {
                let id = sessions.create();
                sessions.put(&id, USER_ATTRIBUTE, &user.account);
                info!(account = %user.account, "login exitoso");
                Some(id)
            }
            None => {
                warn!(account = %account, "login fallido");
                None
            }
        }
    }
}
