//! # Lectura de Requests
//! src/server/reader.rs
//!
//! Acumula lecturas del socket hasta tener la cabecera completa
//! (`\r\n\r\n`) y luego exactamente `Content-Length` bytes de body.
//! Un request puede llegar partido en varios segmentos TCP.

use std::io::{self, Read};

use thiserror::Error;

use crate::http::request::{declared_content_length, find_head_end, HEAD_TERMINATOR};

/// Errores al leer un request de la conexión
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O error while reading request: {0}")]
    Io(#[from] io::Error),

    #[error("request exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Lee un request completo desde `reader`
///
/// - `chunk_size`: bytes pedidos en cada `read`
/// - `max_size`: tope para cabecera + body
///
/// Retorna `Ok(None)` si el cliente cerró sin mandar nada. Si cierra a
/// mitad del request, retorna lo que alcanzó a llegar y el parser decide.
/// Los bytes que sobren después del body se descartan.
pub fn read_request<R: Read>(
    reader: &mut R,
    chunk_size: usize,
    max_size: usize,
) -> Result<Option<Vec<u8>>, ReadError> {
    let mut data = Vec::with_capacity(chunk_size);
    let mut chunk = vec![0u8; chunk_size.max(1)];

    // 1. Cabecera. Solo se busca el terminador en lo que llegó nuevo,
    // más los 3 bytes anteriores por si quedó partido entre lecturas.
    let mut scanned = 0;
    let head_end = loop {
        if let Some(end) = find_head_end(&data[scanned..]) {
            break Some(scanned + end);
        }
        scanned = data.len().saturating_sub(HEAD_TERMINATOR.len() - 1);
        if data.len() > max_size {
            return Err(ReadError::TooLarge { limit: max_size });
        }
        match read_chunk(reader, &mut chunk)? {
            0 => break None,
            n => data.extend_from_slice(&chunk[..n]),
        }
    };

    let Some(head_end) = head_end else {
        return Ok((!data.is_empty()).then_some(data));
    };

    // 2. Body
    let expected = (head_end + HEAD_TERMINATOR.len())
        .checked_add(declared_content_length(&data[..head_end]))
        .filter(|&expected| expected <= max_size)
        .ok_or(ReadError::TooLarge { limit: max_size })?;

    while data.len() < expected {
        match read_chunk(reader, &mut chunk)? {
            0 => break,
            n => data.extend_from_slice(&chunk[..n]),
        }
    }

    data.truncate(expected);
    Ok(Some(data))
}

/// Un `read` que reintenta si lo interrumpe una señal
fn read_chunk<R: Read>(reader: &mut R, chunk: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(chunk) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
