//! # Store de Sesiones
//! src/session.rs
//!
//! Mapa concurrente `id de sesión → Session`, compartido por todos los
//! workers. Es el único estado compartido entre conexiones.
//!
//! - `create()` genera un id aleatorio de 128 bits (no un contador) y guarda
//!   una sesión vacía.
//! - `get()` retorna una copia de la sesión; su ausencia no es un error.
//! - `put()` solo modifica sesiones existentes.
//!
//! El store usa `DashMap`: operaciones sobre ids distintos no se bloquean
//! entre sí y los llamadores no necesitan locks propios. Las sesiones no
//! expiran en este servidor.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

/// Identificador opaco de sesión (32 dígitos hexadecimales)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    /// Genera un id con 128 bits aleatorios de un RNG criptográfico
    fn generate() -> Self {
        let bits: u128 = rand::random();
        SessionId(format!("{:032x}", bits))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId(value.to_string())
    }
}

/// Estado de servidor asociado a un cliente
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    attributes: HashMap<String, String>,
    created_at: SystemTime,
}

impl Session {
    fn new(id: SessionId) -> Self {
        Self {
            id,
            attributes: HashMap::new(),
            created_at: SystemTime::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(|s| s.as_str())
    }

    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

/// Store de sesiones thread-safe
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Crea una sesión vacía y retorna su id
    ///
    /// ```
    /// use origin_server::session::SessionStore;
    ///
    /// let store = SessionStore::new();
    /// let id = store.create();
    /// store.put(&id, "user", "gugu");
    ///
    /// let session = store.get(&id).unwrap();
    /// assert_eq!(session.attribute("user"), Some("gugu"));
    /// ```
    pub fn create(&self) -> SessionId {
        loop {
            let id = SessionId::generate();
            // La inserción es atómica: un id repetido nunca pisa otra sesión
            if let Entry::Vacant(slot) = self.sessions.entry(id.clone()) {
                slot.insert(Session::new(id.clone()));
                return id;
            }
        }
    }

    /// Busca una sesión; `None` significa que no hay sesión activa
    pub fn get(&self, id: &SessionId) -> Option<Session> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Asigna un atributo; si la sesión no existe no hace nada
    pub fn put(&self, id: &SessionId, key: &str, value: &str) {
        if let Some(mut session) = self.sessions.get_mut(id) {
            session
                .attributes
                .insert(key.to_string(), value.to_string());
        }
    }

    pub fn contains(&self, id: &SessionId) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
