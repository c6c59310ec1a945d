//! # Recursos Estáticos
//! src/resource.rs
//!
//! Dado un path normalizado (ej: `/index.html`) retorna sus bytes o una
//! señal de "no encontrado". El router no sabe de dónde salen los bytes.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Fuente de recursos estáticos
///
/// - `Ok(Some(bytes))`: el recurso existe
/// - `Ok(None)`: no existe
/// - `Err(_)`: existe pero no se pudo leer
pub trait ResourceLookup: Send + Sync {
    fn lookup(&self, path: &str) -> io::Result<Option<Vec<u8>>>;
}

/// Recursos servidos desde un directorio del sistema de archivos
#[derive(Debug, Clone)]
pub struct StaticFiles {
    base_dir: PathBuf,
}

impl StaticFiles {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base_dir: base.into() }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Mapea el path de la URL dentro de `base_dir`
    ///
    /// Rechaza `..` y paths absolutos para no salir del directorio.
    fn map_path(&self, url_path: &str) -> Option<PathBuf> {
        let mut path = self.base_dir.clone();
        for component in Path::new(url_path.trim_start_matches('/')).components() {
            match component {
                Component::Normal(segment) => path.push(segment),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(path)
    }
}

impl ResourceLookup for StaticFiles {
    fn lookup(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(file) = self.map_path(path) else {
            return Ok(None);
        };
        if !file.is_file() {
            return Ok(None);
        }

        match fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Recursos en memoria, útil para embeber páginas o para tests
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: &str, content: impl Into<Vec<u8>>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.insert(path.to_string(), content.into());
    }
}

impl ResourceLookup for MemoryResources {
    fn lookup(&self, path: &str) -> io::Result<Option<Vec<u8>>> {
        Ok(self.files.get(path).cloned())
    }
}
