//! # Comandos Básicos
//!
//! - `/`: raíz, 200 sin body
//! - `/echo/<value>`: devuelve `<value>` como texto
//! - `/user-agent`: devuelve el header `User-Agent` del cliente

use crate::http::{Request, Response, StatusCode};

pub const TEXT_PLAIN: &str = "text/plain";

/// Handler para /
pub fn root_handler(_req: &Request) -> Response {
    Response::new(StatusCode::Ok)
}

/// Handler para /echo/<value>
///
/// `value` ya viene decodificado desde el path.
///
/// # Ejemplo
/// ```
/// use http_origin::commands::echo_handler;
/// use http_origin::http::Request;
///
/// let req = Request::parse(b"GET /echo/abc HTTP/1.1\r\n\r\n").unwrap();
/// let response = echo_handler(&req, "abc");
/// assert_eq!(response.body(), b"abc");
/// ```
pub fn echo_handler(_req: &Request, value: &str) -> Response {
    Response::new(StatusCode::Ok)
        .with_header("Content-Type", TEXT_PLAIN)
        .with_body(value.as_bytes().to_vec())
}

/// Handler para /user-agent
///
/// Sin header `User-Agent` responde 200 con body vacío.
pub fn user_agent_handler(req: &Request) -> Response {
    let user_agent = req.header("User-Agent").unwrap_or_default();

    Response::new(StatusCode::Ok)
        .with_header("Content-Type", TEXT_PLAIN)
        .with_body(user_agent.as_bytes().to_vec())
}
