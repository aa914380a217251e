//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones entrantes (un thread por conexión)
//! 3. Acumula el request completo y lo parsea
//! 4. Genera y envía la response, y cierra la conexión

pub mod reader;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use reader::{read_request, ReadError};
pub use tcp::{ReadLimits, Server};
