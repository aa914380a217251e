//! # HTTP Origin Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero: parsea un request
//! por conexión, lo despacha a una de las rutas integradas y responde,
//! comprimiendo con gzip cuando el cliente lo acepta.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing de requests, serialización de responses y gzip
//! - `router`: Enrutamiento de método + path a handlers
//! - `commands`: Handlers integrados (echo, user-agent, archivos)
//! - `server`: Listener TCP, lectura de requests y manejo de conexiones
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use http_origin::config::Config;
//! use http_origin::server::Server;
//!
//! let config = Config::default();
//! let server = Server::new(config);
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod commands;
pub mod config;
pub mod http;
pub mod router;
pub mod server;
