//! # Headers HTTP
//! src/http/headers.rs
//!
//! Mapa ordenado de headers. En el wire los nombres conservan su forma
//! original, pero la búsqueda ignora mayúsculas/minúsculas. Si un nombre se
//! repite, gana el último valor y se conserva la posición de la primera
//! aparición.

use crate::error::{Result, ServerError};

/// Separador entre nombre y valor en una línea de header
pub const HEADER_DELIMITER: &str = ": ";

/// Mapa ordenado de headers HTTP
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsea una línea `Name: Value`
    ///
    /// Una línea sin el delimitador `": "` es un request malformado.
    pub fn parse_line(line: &str) -> Result<(String, String)> {
        line.split_once(HEADER_DELIMITER)
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .ok_or_else(|| ServerError::malformed(format!("Invalid header: {}", line)))
    }

    /// Inserta un header; si ya existe (sin importar mayúsculas) se reemplaza el valor
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.position(&name) {
            Some(index) => self.entries[index].1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Elimina un header y retorna su valor
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.position(name).map(|index| self.entries.remove(index).1)
    }

    /// Busca un header ignorando mayúsculas/minúsculas
    pub fn get(&self, name: &str) -> Option<&str> {
        self.position(name).map(|index| self.entries[index].1.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Itera los headers en orden de inserción
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Valor de `Content-Length`, si está presente
    pub fn content_length(&self) -> Result<Option<usize>> {
        match self.get("Content-Length") {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .map(Some)
                .map_err(|_| ServerError::malformed(format!("Invalid Content-Length: {}", raw))),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}
