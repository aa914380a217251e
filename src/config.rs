//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./http_origin --directory /tmp/static/ --port 4221
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 STATIC_DIR=/srv/files ./http_origin
//! ```

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing::info;

/// Errores de validación de la configuración
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("buffer size must be >= 1")]
    ZeroBufferSize,

    #[error("max request size ({max}) must be >= buffer size ({buffer})")]
    MaxRequestTooSmall { max: usize, buffer: usize },
}

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "http_origin")]
#[command(about = "Servidor HTTP/1.1 minimo con archivos estaticos y compresion gzip")]
#[command(version)]
pub struct Config {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "4221", env = "HTTP_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Directorio desde donde se sirven y guardan archivos (/files/*)
    #[arg(short, long, default_value = ".", env = "STATIC_DIR")]
    pub directory: String,

    /// Bytes por cada lectura del socket
    #[arg(long = "buffer-size", default_value = "4096", env = "READ_BUFFER_SIZE")]
    pub buffer_size: usize,

    /// Tamaño máximo de un request (cabecera + body) en bytes
    #[arg(long = "max-request-size", default_value = "1048576", env = "MAX_REQUEST_SIZE")]
    pub max_request_size: usize,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use http_origin::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:4221");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Directorio estático sin `/` al final
    ///
    /// `/` se conserva tal cual; un valor vacío equivale a `.`.
    pub fn static_dir(&self) -> PathBuf {
        let trimmed = self.directory.trim_end_matches('/');

        match (trimmed.is_empty(), self.directory.is_empty()) {
            (true, false) => PathBuf::from("/"),
            (true, true) => PathBuf::from("."),
            _ => PathBuf::from(trimmed),
        }
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::ZeroBufferSize);
        }

        if self.max_request_size < self.buffer_size {
            return Err(ConfigError::MaxRequestTooSmall {
                max: self.max_request_size,
                buffer: self.buffer_size,
            });
        }

        Ok(())
    }

    /// Registra un resumen de la configuración
    pub fn print_summary(&self) {
        info!(
            address = %self.address(),
            static_dir = %self.static_dir().display(),
            buffer_size = self.buffer_size,
            max_request_size = self.max_request_size,
            "Configuration loaded"
        );

        if !self.static_dir().is_dir() {
            tracing::warn!(
                static_dir = %self.static_dir().display(),
                "static directory does not exist, /files requests will fail"
            );
        }
    }
}

impl Default for Config {
    /// Configuración por defecto (igual a los defaults del CLI)
    fn default() -> Self {
        Self {
            port: 4221,
            host: "0.0.0.0".to_string(),
            directory: ".".to_string(),
            buffer_size: 4096,
            max_request_size: 1024 * 1024,
        }
    }
}
