//! # Serialización de Respuestas
//! src/http/writer.rs
//!
//! Convierte status, headers y body en bytes HTTP/1.1 y los entrega al
//! socket de una sola vez.
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/plain\r\n
//! Content-Encoding: gzip\r\n        <- solo si el request lo acepta
//! Content-Length: 26\r\n
//! \r\n
//! <body>
//! ```

use std::io::{self, Write};

use tracing::error;

use super::{ContentEncoding, Request, StatusCode};

const ACCEPT_ENCODING: &str = "Accept-Encoding";

/// Escribe una respuesta completa en `sink`
///
/// - `request` es el request que se está respondiendo; de él sale el
///   `Accept-Encoding`. Es `None` cuando el request no se pudo parsear.
/// - `content_length` marca cuántos bytes de `body` son contenido real;
///   el buffer puede ser más grande. Si es mayor que el buffer se recorta.
///
/// Todo se arma en memoria y se hace un único `write_all` + `flush`.
/// Si falla la compresión se registra el error y no se envía nada.
pub fn write_response<W: Write>(
    sink: &mut W,
    request: Option<&Request>,
    status: StatusCode,
    headers: &[(String, String)],
    content_length: usize,
    body: &[u8],
) -> io::Result<()> {
    write_with_encoder(sink, request, status, headers, content_length, body, |encoding, content| {
        encoding.encode(content)
    })
}

/// Igual que `write_response` pero con el compresor como parámetro
fn write_with_encoder<W, F>(
    sink: &mut W,
    request: Option<&Request>,
    status: StatusCode,
    headers: &[(String, String)],
    content_length: usize,
    body: &[u8],
    encode: F,
) -> io::Result<()>
where
    W: Write,
    F: FnOnce(ContentEncoding, &[u8]) -> io::Result<Vec<u8>>,
{
    let content = &body[..content_length.min(body.len())];
    let mut out = Vec::with_capacity(128 + content.len());

    // 1. Status line
    write!(out, "HTTP/1.1 {}\r\n", status)?;

    // 2. Headers del handler
    for (name, value) in headers {
        write!(out, "{}: {}\r\n", name, value)?;
    }

    // 3. Negociación de codificación
    let encoding = request
        .and_then(|request| request.header(ACCEPT_ENCODING))
        .and_then(ContentEncoding::negotiate);

    match encoding {
        Some(encoding) => {
            let encoded = match encode(encoding, content) {
                Ok(encoded) => encoded,
                Err(e) => {
                    error!(%encoding, error = %e, "compression failed, response dropped");
                    return Ok(());
                }
            };

            write!(out, "Content-Encoding: {}\r\n", encoding)?;
            write!(out, "Content-Length: {}\r\n\r\n", encoded.len())?;
            out.extend_from_slice(&encoded);
        }
        None => {
            // Sin contenido no hace falta Content-Length: la conexión se cierra
            if !content.is_empty() {
                write!(out, "Content-Length: {}\r\n", content.len())?;
            }
            out.extend_from_slice(b"\r\n");
            out.extend_from_slice(content);
        }
    }

    sink.write_all(&out)?;
    sink.flush()
}
