//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el parser de requests desde cero.
//!
//! ## Formato de un Request
//!
//! ```text
//! POST /files/notes.txt HTTP/1.1\r\n
//! Host: localhost:4221\r\n
//! Content-Length: 5\r\n
//! \r\n
//! hello
//! ```
//!
//! ## Componentes
//!
//! 1. **Request Line**: `METHOD target VERSION`
//! 2. **Headers**: Pares `Name: Value` (uno por línea)
//! 3. **Empty Line**: `\r\n` que separa headers del body
//! 4. **Body**: bytes restantes, acotados por `Content-Length`

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

/// Separador entre la cabecera y el body
pub(crate) const HEAD_TERMINATOR: &[u8] = b"\r\n\r\n";

const CRLF: &str = "\r\n";
const HEADER_SEPARATOR: &str = ": ";
const CONTENT_LENGTH: &str = "Content-Length";

/// Métodos HTTP soportados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
}

impl Method {
    /// Convierte el método a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::DELETE => "DELETE",
        }
    }
}

impl FromStr for Method {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(ParseError::InvalidMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errores que pueden ocurrir durante el parsing
///
/// Todos terminan en un 400 sin body; el detalle solo va al log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Buffer vacío o cabecera que no es UTF-8
    #[error("Invalid data")]
    InvalidData,

    /// La request line no tiene exactamente 3 tokens
    #[error("Invalid request line: {0:?}")]
    InvalidRequest(String),

    /// Método fuera de GET, POST, PUT, DELETE
    #[error("Invalid method: {0}")]
    InvalidMethod(String),

    /// Target que no es una URI con path
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Línea de header sin el separador `": "`
    #[error("Invalid header: {0:?}")]
    InvalidHeader(String),

    /// `Content-Length` que no es un entero no negativo
    #[error("Invalid content length: {0:?}")]
    InvalidContentLength(String),
}

/// Request HTTP parseado
///
/// Se construye una sola vez por conexión y no se modifica después.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,

    /// Target tal como llegó en la request line
    target: String,

    /// Path decodificado (sin query ni fragment)
    path: String,

    /// Query string sin decodificar, si existe
    query: Option<String>,

    version: String,

    /// Headers con el nombre tal como se recibió. Un nombre repetido
    /// sobrescribe el valor anterior.
    headers: HashMap<String, String>,

    content_length: usize,

    body: Vec<u8>,
}

impl Request {
    /// Parsea un request desde bytes
    ///
    /// La cabecera termina en la primera línea vacía (`\r\n\r\n`) y todo
    /// lo que sigue es el body, incluidos los `\r\n` que contenga. Si el
    /// buffer no trae la línea vacía (el cliente cerró a mitad de la
    /// cabecera), la última línea se toma como body.
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use http_origin::http::{Method, Request};
    ///
    /// let raw = b"GET /echo/abc?x=1 HTTP/1.1\r\nUser-Agent: curl\r\n\r\n";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), Method::GET);
    /// assert_eq!(request.path(), "/echo/abc");
    /// assert_eq!(request.query(), Some("x=1"));
    /// assert_eq!(request.header("User-Agent"), Some("curl"));
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.is_empty() {
            return Err(ParseError::InvalidData);
        }

        let (head, body) = Self::split_head(buffer)?;
        let mut lines = head.split(CRLF);

        // 1. Request line
        let request_line = lines.next().ok_or(ParseError::InvalidData)?;
        let (method, target, version) = Self::parse_request_line(request_line)?;

        // 2. Target
        let (path, query) = Self::parse_target(target)?;

        // 3. Headers
        let (headers, content_length) = Self::parse_headers(lines)?;

        Ok(Request {
            method,
            target: target.to_string(),
            path,
            query,
            version: version.to_string(),
            headers,
            content_length,
            body,
        })
    }

    /// Separa la cabecera (como texto) del body (como bytes)
    fn split_head(buffer: &[u8]) -> Result<(&str, Vec<u8>), ParseError> {
        let (head, body) = match find_head_end(buffer) {
            Some(end) => (&buffer[..end], &buffer[end + HEAD_TERMINATOR.len()..]),
            None => match rfind_crlf(buffer) {
                Some(pos) => (&buffer[..pos], &buffer[pos + CRLF.len()..]),
                None => (buffer, &[][..]),
            },
        };

        let head = std::str::from_utf8(head).map_err(|_| ParseError::InvalidData)?;
        Ok((head, body.to_vec()))
    }

    /// Parsea la request line
    ///
    /// Formato: `METHOD target VERSION`
    fn parse_request_line(line: &str) -> Result<(Method, &str, &str), ParseError> {
        let parts: Vec<&str> = line.split_whitespace().collect();

        let [method, target, version] = parts[..] else {
            return Err(ParseError::InvalidRequest(line.to_string()));
        };

        Ok((method.parse()?, target, version))
    }

    /// Valida el target como URI y extrae path y query
    ///
    /// Acepta origin-form (`/path?q`), absolute-form (`http://host/path`)
    /// y `*`. La forma authority (`host:port`) no tiene path y se rechaza.
    fn parse_target(target: &str) -> Result<(String, Option<String>), ParseError> {
        let invalid = || ParseError::InvalidUrl(target.to_string());

        let uri: http::Uri = target.parse().map_err(|_| invalid())?;
        if uri.path().is_empty() {
            return Err(invalid());
        }

        let path = percent_decode(uri.path()).ok_or_else(invalid)?;
        Ok((path, uri.query().map(str::to_string)))
    }

    /// Parsea los headers
    ///
    /// Las líneas vacías se saltan. Cada línea restante debe tener la
    /// forma `Name: Value`.
    fn parse_headers<'a, I>(lines: I) -> Result<(HashMap<String, String>, usize), ParseError>
    where
        I: Iterator<Item = &'a str>,
    {
        let mut headers = HashMap::new();
        let mut content_length = 0;

        for line in lines {
            if line.is_empty() {
                continue;
            }

            let (name, value) = line
                .split_once(HEADER_SEPARATOR)
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

            if name.eq_ignore_ascii_case(CONTENT_LENGTH) {
                content_length = value
                    .parse::<usize>()
                    .map_err(|_| ParseError::InvalidContentLength(value.to_string()))?;
            }

            headers.insert(name.to_string(), value.to_string());
        }

        Ok((headers, content_length))
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> Method {
        self.method
    }

    /// Obtiene el target sin procesar
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene el path decodificado
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la query string, si la hay
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico
    ///
    /// Primero busca el nombre exacto y luego sin distinguir mayúsculas.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .or_else(|| {
                self.headers
                    .iter()
                    .find(|(key, _)| key.eq_ignore_ascii_case(name))
                    .map(|(_, value)| value)
            })
            .map(|s| s.as_str())
    }

    /// Valor de `Content-Length` (0 si no vino)
    pub fn content_length(&self) -> usize {
        self.content_length
    }

    /// Body completo tal como llegó después de la cabecera
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Los primeros `content_length` bytes del body
    pub fn content(&self) -> &[u8] {
        &self.body[..self.content_length.min(self.body.len())]
    }
}

/// Posición donde empieza `\r\n\r\n`, si ya llegó
pub(crate) fn find_head_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(HEAD_TERMINATOR.len())
        .position(|window| window == HEAD_TERMINATOR)
}

fn rfind_crlf(buffer: &[u8]) -> Option<usize> {
    buffer.windows(CRLF.len()).rposition(|window| window == CRLF.as_bytes())
}

/// Lee `Content-Length` de una cabecera cruda
///
/// Lo usa el lector de conexiones para saber cuántos bytes de body
/// esperar. Un valor inválido cuenta como 0; el parser lo rechaza después.
pub(crate) fn declared_content_length(head: &[u8]) -> usize {
    String::from_utf8_lossy(head)
        .split(CRLF)
        .filter_map(|line| line.split_once(HEADER_SEPARATOR))
        .filter(|(name, _)| name.eq_ignore_ascii_case(CONTENT_LENGTH))
        .last()
        .and_then(|(_, value)| value.parse().ok())
        .unwrap_or(0)
}

/// Decodifica los escapes `%XX` de un path
///
/// Retorna `None` si hay un escape incompleto, con dígitos no hexadecimales
/// o si los bytes decodificados no son UTF-8 válido.
fn percent_decode(input: &str) -> Option<String> {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hi = hex_value(*bytes.get(i + 1)?)?;
            let lo = hex_value(*bytes.get(i + 2)?)?;
            decoded.push(hi << 4 | lo);
            i += 3;
        } else {
            decoded.push(bytes[i]);
            i += 1;
        }
    }

    String::from_utf8(decoded).ok()
}

fn hex_value(byte: u8) -> Option<u8> {
    (byte as char).to_digit(16).map(|digit| digit as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET / HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.version(), "HTTP/1.1");
        assert!(request.headers().is_empty());
        assert!(request.body().is_empty());
        assert_eq!(request.content_length(), 0);
    }

    #[test]
    fn test_parse_all_methods() {
        for (token, method) in [
            ("GET", Method::GET),
            ("POST", Method::POST),
            ("PUT", Method::PUT),
            ("DELETE", Method::DELETE),
        ] {
            let raw = format!("{} /x HTTP/1.1\r\n\r\n", token);
            let request = Request::parse(raw.as_bytes()).unwrap();
            assert_eq!(request.method(), method);
            assert_eq!(request.method().as_str(), token);
        }
    }

    #[test]
    fn test_invalid_method() {
        for token in ["PATCH", "HEAD", "OPTIONS", "get", "CONNECT"] {
            let raw = format!("{} / HTTP/1.1\r\n\r\n", token);
            let result = Request::parse(raw.as_bytes());
            assert_eq!(result.unwrap_err(), ParseError::InvalidMethod(token.to_string()));
        }
    }

    #[test]
    fn test_empty_request() {
        assert_eq!(Request::parse(b"").unwrap_err(), ParseError::InvalidData);
    }

    #[test]
    fn test_non_utf8_head() {
        let raw = b"GET /\xff\xfe HTTP/1.1\r\n\r\n";
        assert_eq!(Request::parse(raw).unwrap_err(), ParseError::InvalidData);
    }

    #[test]
    fn test_request_line_missing_version() {
        let raw = b"GET /\r\n\r\n";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidRequest(_))));
    }

    #[test]
    fn test_request_line_too_many_tokens() {
        let raw = b"GET / HTTP/1.1 extra\r\n\r\n";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidRequest(_))));
    }

    #[test]
    fn test_leading_blank_line_is_invalid_request() {
        let raw = b"\r\n\r\nGET / HTTP/1.1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidRequest(_))));
    }

    #[test]
    fn test_version_is_not_validated() {
        let raw = b"GET / HTTP/9.9\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.version(), "HTTP/9.9");
    }

    #[test]
    fn test_query_does_not_leak_into_path() {
        let raw = b"GET /echo/abc?x=1&y=2#frag HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.path(), "/echo/abc");
        assert_eq!(request.query(), Some("x=1&y=2"));
        assert_eq!(request.target(), "/echo/abc?x=1&y=2#frag");
    }

    #[test]
    fn test_absolute_form_target() {
        let raw = b"GET http://localhost:4221/user-agent HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.path(), "/user-agent");
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let raw = b"GET /echo/hello%20world HTTP/1.1\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.path(), "/echo/hello world");
    }

    #[test]
    fn test_bad_percent_escape_is_invalid_url() {
        let raw = b"GET /echo/%zz HTTP/1.1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidUrl(_))));

        let raw = b"GET /echo/abc% HTTP/1.1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidUrl(_))));
    }

    #[test]
    fn test_escape_decoding_to_invalid_utf8_is_invalid_url() {
        let raw = b"GET /echo/%FF HTTP/1.1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidUrl(_))));

        // Multibyte válido sigue funcionando
        let raw = b"GET /echo/%C3%A9 HTTP/1.1\r\n\r\n";
        assert_eq!(Request::parse(raw).unwrap().path(), "/echo/\u{e9}");
    }

    #[test]
    fn test_authority_form_is_invalid_url() {
        let raw = b"GET localhost:4221 HTTP/1.1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_with_headers() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\nUser-Agent: foobar/1.2.3\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("localhost:4221"));
        assert_eq!(request.header("User-Agent"), Some("foobar/1.2.3"));
        assert_eq!(request.header("user-agent"), Some("foobar/1.2.3"));
        assert_eq!(request.header("Accept"), None);
    }

    #[test]
    fn test_header_value_keeps_extra_colons() {
        let raw = b"GET / HTTP/1.1\r\nX-Time: 12:30: ok\r\n\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.header("X-Time"), Some("12:30: ok"));
    }

    #[test]
    fn test_repeated_header_overwrites() {
        let raw = b"GET / HTTP/1.1\r\nX-Foo: first\r\nX-Foo: second\r\n\r\n";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.headers().len(), 1);
        assert_eq!(request.header("X-Foo"), Some("second"));
    }

    #[test]
    fn test_header_without_separator() {
        let raw = b"GET / HTTP/1.1\r\nX-Foo\r\n\r\n";
        let result = Request::parse(raw);

        assert_eq!(result.unwrap_err(), ParseError::InvalidHeader("X-Foo".to_string()));
    }

    #[test]
    fn test_header_colon_without_space() {
        let raw = b"GET / HTTP/1.1\r\nHost:localhost\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_content_length_and_body() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.content_length(), 5);
        assert_eq!(request.body(), b"hello");
        assert_eq!(request.content(), b"hello");
    }

    #[test]
    fn test_content_slices_oversized_body() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nhello";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.body(), b"hello");
        assert_eq!(request.content(), b"hel");
    }

    #[test]
    fn test_content_clamps_short_body() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nabc";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.content(), b"abc");
    }

    #[test]
    fn test_body_with_embedded_crlf() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 13\r\n\r\nline1\r\n\r\nl2\r\n";
        let request = Request::parse(raw).unwrap();
        assert_eq!(request.content(), b"line1\r\n\r\nl2\r\n");
    }

    #[test]
    fn test_invalid_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: abc\r\n\r\n";
        assert_eq!(
            Request::parse(raw).unwrap_err(),
            ParseError::InvalidContentLength("abc".to_string())
        );
    }

    #[test]
    fn test_negative_content_length() {
        let raw = b"POST / HTTP/1.1\r\nContent-Length: -1\r\n\r\n";
        assert!(matches!(Request::parse(raw), Err(ParseError::InvalidContentLength(_))));
    }

    #[test]
    fn test_missing_terminator_takes_last_line_as_body() {
        let raw = b"POST /files/a HTTP/1.1\r\nContent-Length: 2\r\nok";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.content_length(), 2);
        assert_eq!(request.body(), b"ok");
    }

    #[test]
    fn test_request_line_only() {
        let request = Request::parse(b"GET /user-agent HTTP/1.1").unwrap();
        assert_eq!(request.path(), "/user-agent");
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_declared_content_length() {
        assert_eq!(declared_content_length(b"POST / HTTP/1.1\r\nContent-Length: 42"), 42);
        assert_eq!(declared_content_length(b"POST / HTTP/1.1\r\ncontent-length: 7"), 7);
        assert_eq!(declared_content_length(b"POST / HTTP/1.1\r\nContent-Length: x"), 0);
        assert_eq!(declared_content_length(b"GET / HTTP/1.1"), 0);
    }

    #[test]
    fn test_find_head_end() {
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n\r\nbody"), Some(14));
        assert_eq!(find_head_end(b"GET / HTTP/1.1\r\n"), None);
    }
}
