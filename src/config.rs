//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte para
//! argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./origin_server --port 8080 \
//!   --static-dir ./static \
//!   --workers 200 \
//!   --queue-capacity 100
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=0.0.0.0 ./origin_server
//! ```

use crate::error::{Result, ServerError};
use clap::Parser;
use std::time::Duration;

/// Puerto usado cuando el configurado está fuera de 1–65535
pub const DEFAULT_PORT: u16 = 8080;

/// Configuración del servidor HTTP/1.1
#[derive(Debug, Clone, Parser)]
#[command(name = "origin_server")]
#[command(about = "Servidor HTTP/1.1 de origen: archivos estáticos, login y sesiones")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (fuera de 1–65535 se usa 8080)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PORT as i64,
        env = "HTTP_PORT",
        allow_negative_numbers = true
    )]
    pub port: i64,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio con los recursos estáticos
    #[arg(long = "static-dir", default_value = "./static", env = "STATIC_DIR")]
    pub static_dir: String,

    /// Número de workers que atienden conexiones
    #[arg(long, default_value = "200", env = "WORKERS")]
    pub workers: usize,

    /// Conexiones aceptadas que pueden esperar un worker libre
    #[arg(long = "queue-capacity", default_value = "100", env = "QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Timeout de lectura del socket en milisegundos (0 = sin timeout)
    #[arg(long = "read-timeout-ms", default_value = "30000", env = "READ_TIMEOUT_MS")]
    pub read_timeout_ms: u64,

    /// Archivo JSON con usuarios; sin él se usa la cuenta por defecto
    #[arg(long = "users-file", env = "USERS_FILE")]
    pub users_file: Option<String>,

    /// Filtro de logging (ej: "info", "origin_server=debug")
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Puerto efectivo: el configurado si está en 1–65535, si no 8080
    ///
    /// ```
    /// use origin_server::config::Config;
    ///
    /// let mut config = Config::default();
    /// config.port = 70000;
    /// assert_eq!(config.effective_port(), 8080);
    /// ```
    pub fn effective_port(&self) -> u16 {
        match u16::try_from(self.port) {
            Ok(port) if port >= 1 => port,
            _ => DEFAULT_PORT,
        }
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.effective_port())
    }

    /// Timeout de lectura por conexión; `None` si está deshabilitado
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(ServerError::Config("workers must be >= 1".to_string()));
        }
        if self.queue_capacity == 0 {
            return Err(ServerError::Config("queue capacity must be >= 1".to_string()));
        }
        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("╔══════════════════════════════════════════════════════════════╗");
        println!("║            origin_server HTTP/1.1 Configuration              ║");
        println!("╚══════════════════════════════════════════════════════════════╝");
        println!();
        println!("🌐 Network:");
        println!("   Address:      {}", self.address());
        if self.effective_port() as i64 != self.port {
            println!("   (port {} out of range, using {})", self.port, DEFAULT_PORT);
        }
        println!("   Static dir:   {}", self.static_dir);
        println!(
            "   Users:        {}",
            self.users_file.as_deref().unwrap_or("default account")
        );
        println!();
        println!("👷 Workers:");
        println!("   Pool size:    {}", self.workers);
        println!("   Queue:        {}", self.queue_capacity);
        match self.read_timeout() {
            Some(timeout) => println!("   Read timeout: {} ms", timeout.as_millis()),
            None => println!("   Read timeout: disabled"),
        }
        println!();
        println!("═══════════════════════════════════════════════════════════════");
        println!();
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT as i64,
            host: "127.0.0.1".to_string(),
            static_dir: "./static".to_string(),
            workers: 200,
            queue_capacity: 100,
            read_timeout_ms: 30_000,
            users_file: None,
            log_level: "info".to_string(),
        }
    }
}
