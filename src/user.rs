//! # Usuarios
//! src/user.rs
//!
//! Store de credenciales consultado por el login. El servidor solo necesita
//! saber si una cuenta y contraseña son válidas.
//!
//! Formato del archivo de usuarios (`--users-file`):
//!
//! ```json
//! [
//!   {"account": "gugu", "password": "password", "email": "gugu@example.com"}
//! ]
//! ```

use crate::error::{Result, ServerError};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Cuenta registrada
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub account: String,
    pub password: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn new(account: &str, password: &str, email: &str) -> Self {
        Self {
            account: account.to_string(),
            password: password.to_string(),
            email: email.to_string(),
        }
    }

    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }
}

/// Fuente de usuarios para el login
pub trait UserStore: Send + Sync {
    fn find_by_account(&self, account: &str) -> Option<User>;

    /// Retorna el usuario si la contraseña coincide
    fn authenticate(&self, account: &str, password: &str) -> Option<User> {
        self.find_by_account(account)
            .filter(|user| user.check_password(password))
    }
}

/// Store de usuarios en memoria
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: HashMap<String, User>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store con la cuenta por defecto `gugu` / `password`
    pub fn with_defaults() -> Self {
        let mut store = Self::new();
        store.insert(User::new("gugu", "password", "hkkang@woowahan.com"));
        store
    }

    /// Carga usuarios desde un archivo JSON (arreglo de objetos)
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            ServerError::Config(format!("cannot read users file {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let users: Vec<User> = serde_json::from_str(raw)
            .map_err(|e| ServerError::Config(format!("invalid users file: {}", e)))?;

        let mut store = Self::new();
        for user in users {
            store.insert(user);
        }
        Ok(store)
    }

    pub fn insert(&mut self, user: User) {
        self.users.insert(user.account.clone(), user);
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_account(&self, account: &str) -> Option<User> {
        self.users.get(account).cloned()
    }
}
