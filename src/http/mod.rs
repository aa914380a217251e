//! # Módulo HTTP
//!
//! Implementa la capa de protocolo HTTP/1.1 desde cero:
//!
//! - Parsing de requests (`request`)
//! - Construcción y serialización de responses (`response`, `writer`)
//! - Negociación de `Content-Encoding` con gzip (`encoding`)
//! - Códigos de estado (`status`)
//!
//! ### Formato de Request
//!
//! ```text
//! GET /echo/abc HTTP/1.1\r\n
//! Accept-Encoding: gzip\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Length: 3\r\n
//! \r\n
//! abc
//! ```

pub mod encoding;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;

// Re-exportamos los tipos principales para facilitar su uso
pub use encoding::ContentEncoding;
pub use request::{Method, ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
pub use writer::write_response;
