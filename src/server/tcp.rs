//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que maneja múltiples conexiones
//! simultáneas usando threads. Cada conexión se procesa en su propio
//! thread: una lectura, un parse, un handler, una escritura y se cierra.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};

use super::reader::{read_request, ReadError};
use crate::commands::StaticDir;
use crate::config::Config;
use crate::http::{Request, Response, StatusCode};
use crate::router::Router;

/// Tope de bytes que se descartan de un request rechazado antes de cerrar
const DRAIN_LIMIT: u64 = 8 * 1024 * 1024;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Límites de lectura compartidos por todas las conexiones
#[derive(Debug, Clone, Copy)]
pub struct ReadLimits {
    pub buffer_size: usize,
    pub max_request_size: usize,
}

impl ReadLimits {
    pub fn from_config(config: &Config) -> Self {
        Self {
            buffer_size: config.buffer_size,
            max_request_size: config.max_request_size,
        }
    }
}

/// Servidor HTTP/1.1 concurrente
pub struct Server {
    config: Config,
    router: Arc<Router>,
    limits: ReadLimits,
}

impl Server {
    pub fn new(config: Config) -> Self {
        let router = Router::new(StaticDir::new(config.static_dir()));
        let limits = ReadLimits::from_config(&config);

        Self {
            config,
            router: Arc::new(router),
            limits,
        }
    }

    /// Hace bind en la dirección configurada y atiende conexiones
    pub fn run(&self) -> io::Result<()> {
        let address = self.config.address();
        let listener = TcpListener::bind(&address)?;
        info!(address = %listener.local_addr()?, "Listening for connections");

        self.serve(listener)
    }

    /// Atiende conexiones de un listener ya creado
    ///
    /// Solo retorna si el listener deja de producir conexiones.
    pub fn serve(&self, listener: TcpListener) -> io::Result<()> {
        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    let router = Arc::clone(&self.router);
                    let limits = self.limits;

                    let peer = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());

                    debug!(%peer, "New connection");

                    thread::spawn(move || {
                        if let Err(e) = Self::handle_connection(stream, &router, limits) {
                            warn!(%peer, error = %e, "Connection failed");
                        }
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }

        Ok(())
    }

    /// Procesa una conexión completa y la cierra
    ///
    /// Si no llega nada o falla la lectura, la conexión se cierra sin
    /// respuesta. Un request que no se puede parsear recibe 400.
    pub fn handle_connection(
        mut stream: TcpStream,
        router: &Router,
        limits: ReadLimits,
    ) -> io::Result<()> {
        let start = Instant::now();

        let raw = match read_request(&mut stream, limits.buffer_size, limits.max_request_size) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("Connection closed without data");
                return Ok(());
            }
            Err(ReadError::Io(e)) => {
                debug!(error = %e, "Read failed, closing connection");
                return Ok(());
            }
            Err(e @ ReadError::TooLarge { .. }) => {
                warn!(error = %e, "Request rejected");
                Self::respond(&mut stream, None, Response::new(StatusCode::BadRequest), start)?;
                Self::drain(&mut stream);
                return Ok(());
            }
        };

        match Request::parse(&raw) {
            Ok(request) => {
                info!(method = %request.method(), path = request.path(), "Request");
                let response = router.route(&request);
                Self::respond(&mut stream, Some(&request), response, start)
            }
            Err(e) => {
                warn!(error = %e, "Parse error");
                Self::respond(&mut stream, None, Response::new(StatusCode::BadRequest), start)
            }
        }
    }

    /// Cierra la escritura y descarta lo que el cliente siga mandando
    ///
    /// Si el socket se cierra con bytes sin leer, el kernel manda RST y
    /// el cliente puede perder el 400 que ya se escribió.
    fn drain(stream: &mut TcpStream) {
        let _ = stream.shutdown(Shutdown::Write);
        let _ = stream.set_read_timeout(Some(DRAIN_TIMEOUT));

        match io::copy(&mut stream.take(DRAIN_LIMIT), &mut io::sink()) {
            Ok(bytes) => debug!(bytes, "Drained rejected request"),
            Err(e) => debug!(error = %e, "Drain stopped"),
        }
    }

    fn respond<W: Write>(
        sink: &mut W,
        request: Option<&Request>,
        response: Response,
        start: Instant,
    ) -> io::Result<()> {
        response.write_to(sink, request)?;

        let status = response.status();
        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        if status.is_error() {
            warn!(status = status.as_u16(), latency_ms, "Response sent");
        } else {
            info!(status = status.as_u16(), latency_ms, "Response sent");
        }
        Ok(())
    }
}
