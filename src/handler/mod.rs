//! # Handlers
//! src/handler/mod.rs
//!
//! - `login`: autenticación y creación de sesiones
//! - `exception`: traducción de errores a respuestas

pub mod exception;
pub mod login;

pub use exception::{ExceptionHandler, ExceptionHandlers};
pub use login::LoginHandler;
