//! # Comandos del Servidor
//!
//! Handlers de las rutas integradas.
//!
//! - **basic**: `/`, `/echo/<value>`, `/user-agent`
//! - **files**: `GET` y `POST` de `/files/<name>` sobre el directorio estático
//!
//! Cada handler recibe el Request (y lo que extrajo el router del path)
//! y retorna una Response.

pub mod basic;
pub mod files;

// Re-exportar funciones útiles
pub use basic::*;
pub use files::*;
