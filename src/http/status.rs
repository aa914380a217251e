//! # Códigos de Estado HTTP
//! src/http/status.rs
//!
//! Tabla fija de códigos que emite el servidor. Cualquier otro código
//! numérico se acepta igual y se serializa con la frase `Unknown`.
//!
//! - **2xx**: Éxito (200, 201)
//! - **4xx**: Error del cliente (400, 404, 405)
//! - **5xx**: Error del servidor (500)

/// Código de estado de una respuesta
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,

    /// 201 Created - Archivo escrito en el directorio estático
    Created,

    /// 400 Bad Request - Request que no se pudo parsear
    BadRequest,

    /// 404 Not Found - Ruta o archivo inexistente
    NotFound,

    /// 405 Method Not Allowed - Método no soportado en /files
    MethodNotAllowed,

    /// 500 Internal Server Error - Falla de I/O al escribir
    InternalServerError,

    /// Cualquier otro código numérico
    Other(u16),
}

impl StatusCode {
    /// Construye un código desde su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http_origin::http::StatusCode;
    /// assert_eq!(StatusCode::from_u16(404), StatusCode::NotFound);
    /// assert_eq!(StatusCode::from_u16(418), StatusCode::Other(418));
    /// ```
    pub fn from_u16(code: u16) -> Self {
        match code {
            200 => StatusCode::Ok,
            201 => StatusCode::Created,
            400 => StatusCode::BadRequest,
            404 => StatusCode::NotFound,
            405 => StatusCode::MethodNotAllowed,
            500 => StatusCode::InternalServerError,
            other => StatusCode::Other(other),
        }
    }

    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use http_origin::http::StatusCode;
    /// assert_eq!(StatusCode::Created.as_u16(), 201);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::InternalServerError => 500,
            StatusCode::Other(code) => *code,
        }
    }

    /// Texto de razón (reason phrase) para la status line
    ///
    /// # Ejemplo
    /// ```
    /// use http_origin::http::StatusCode;
    /// assert_eq!(StatusCode::MethodNotAllowed.reason_phrase(), "Method Not Allowed");
    /// assert_eq!(StatusCode::Other(299).reason_phrase(), "Unknown");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::Other(_) => "Unknown",
        }
    }

    /// Verifica si el código indica error (4xx o 5xx)
    pub fn is_error(&self) -> bool {
        self.as_u16() >= 400
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode::from_u16(code)
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
