//! # Negociación de Content-Encoding
//! src/http/encoding.rs
//!
//! El cliente anuncia en `Accept-Encoding` las codificaciones que acepta,
//! separadas por comas. El servidor elige la primera que soporta (hoy
//! solo gzip) y la anuncia con `Content-Encoding`.

use std::io::{self, Write};

use flate2::write::GzEncoder;
use flate2::Compression;

/// Codificaciones que el servidor sabe producir
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEncoding {
    Gzip,
}

impl ContentEncoding {
    const SUPPORTED: [ContentEncoding; 1] = [ContentEncoding::Gzip];

    /// Token tal como va en el header
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentEncoding::Gzip => "gzip",
        }
    }

    /// Elige la primera codificación soportada de un `Accept-Encoding`
    ///
    /// Los tokens se comparan tal cual después de quitar espacios, así que
    /// `gzip;q=0.5` no cuenta como gzip.
    ///
    /// # Ejemplo
    /// ```
    /// use http_origin::http::ContentEncoding;
    ///
    /// assert_eq!(ContentEncoding::negotiate("br, gzip"), Some(ContentEncoding::Gzip));
    /// assert_eq!(ContentEncoding::negotiate("br, deflate"), None);
    /// ```
    pub fn negotiate(accept_encoding: &str) -> Option<Self> {
        accept_encoding
            .split(',')
            .map(str::trim)
            .find_map(|token| {
                Self::SUPPORTED
                    .into_iter()
                    .find(|encoding| encoding.as_str() == token)
            })
    }

    /// Comprime `data` con esta codificación
    pub fn encode(&self, data: &[u8]) -> io::Result<Vec<u8>> {
        match self {
            ContentEncoding::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }
}

impl std::fmt::Display for ContentEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
