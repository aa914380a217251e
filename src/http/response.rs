//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Los handlers arman un [`Response`] con esta API y el servidor lo
//! serializa con [`write_response`](super::write_response).
//!
//! ## Ejemplo de uso
//!
//! ```
//! use http_origin::http::{Response, StatusCode};
//!
//! let response = Response::new(StatusCode::Ok)
//!     .with_header("Content-Type", "text/plain")
//!     .with_body(b"Hello".to_vec());
//!
//! let bytes = response.to_bytes(None);
//! assert!(bytes.ends_with(b"\r\n\r\nHello"));
//! ```

use std::io::{self, Write};

use super::{write_response, Request, StatusCode};

/// Respuesta HTTP lista para serializar
#[derive(Debug, Clone)]
pub struct Response {
    status: StatusCode,

    /// Headers en orden de inserción. Un nombre repetido reemplaza al anterior.
    headers: Vec<(String, String)>,

    /// Bytes válidos dentro de `body`
    content_length: usize,

    body: Vec<u8>,
}

impl Response {
    /// Crea una respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            content_length: 0,
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe en su misma posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.add_header(name, value);
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Establece el body; todo el buffer cuenta como contenido
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.content_length = body.len();
        self.body = body;
        self
    }

    /// Limita el contenido a los primeros `content_length` bytes del body
    ///
    /// Sirve cuando el buffer se reutiliza y es más grande que el contenido.
    pub fn with_content_length(mut self, content_length: usize) -> Self {
        self.content_length = content_length.min(self.body.len());
        self
    }

    /// Serializa la respuesta en `sink`, negociando la codificación con `request`
    pub fn write_to<W: Write>(&self, sink: &mut W, request: Option<&Request>) -> io::Result<()> {
        write_response(
            sink,
            request,
            self.status,
            &self.headers,
            self.content_length,
            &self.body,
        )
    }

    /// Serializa la respuesta en memoria
    pub fn to_bytes(&self, request: Option<&Request>) -> Vec<u8> {
        let mut out = Vec::new();
        // Escribir en un Vec no falla
        let _ = self.write_to(&mut out, request);
        out
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene los headers en orden
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// Obtiene un header específico
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Contenido lógico (los primeros `content_length` bytes)
    pub fn body(&self) -> &[u8] {
        &self.body[..self.content_length]
    }
}
