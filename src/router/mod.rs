//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea método + path a una de las rutas integradas.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Route::resolve → handler → Response
//! ```
//!
//! | Path             | Método | Ruta              |
//! |------------------|--------|-------------------|
//! | `/`              | todos  | `Root`            |
//! | `/echo/<value>`  | todos  | `Echo`            |
//! | `/user-agent`    | todos  | `UserAgent`       |
//! | `/files/<name>`  | GET    | `FileGet`         |
//! | `/files/<name>`  | POST   | `FilePost`        |
//! | `/files/<name>`  | otros  | `MethodNotAllowed`|
//! | cualquier otro   | todos  | `NotFound`        |

use crate::commands::{self, StaticDir};
use crate::http::{Method, Request, Response, StatusCode};

const ECHO_PREFIX: &str = "/echo/";
const FILES_PREFIX: &str = "/files/";

/// Ruta resuelta, con lo que se extrajo del path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    Root,
    Echo(&'a str),
    UserAgent,
    FileGet(&'a str),
    FilePost(&'a str),
    MethodNotAllowed,
    NotFound,
}

impl<'a> Route<'a> {
    /// Resuelve la ruta para un método y un path ya decodificado
    ///
    /// # Ejemplo
    /// ```
    /// use http_origin::http::Method;
    /// use http_origin::router::Route;
    ///
    /// assert_eq!(Route::resolve(Method::GET, "/echo/hi"), Route::Echo("hi"));
    /// assert_eq!(Route::resolve(Method::PUT, "/files/a"), Route::MethodNotAllowed);
    /// ```
    pub fn resolve(method: Method, path: &'a str) -> Self {
        if path == "/" {
            return Route::Root;
        }

        if path == "/user-agent" {
            return Route::UserAgent;
        }

        if let Some(value) = path.strip_prefix(ECHO_PREFIX) {
            return Route::Echo(value);
        }

        if let Some(name) = path.strip_prefix(FILES_PREFIX) {
            if name.is_empty() {
                return Route::NotFound;
            }
            return match method {
                Method::GET => Route::FileGet(name),
                Method::POST => Route::FilePost(name),
                _ => Route::MethodNotAllowed,
            };
        }

        Route::NotFound
    }
}

/// Router con el directorio estático configurado
pub struct Router {
    static_dir: StaticDir,
}

impl Router {
    /// Crea un router que sirve `/files/*` desde `static_dir`
    pub fn new(static_dir: StaticDir) -> Self {
        Self { static_dir }
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    pub fn route(&self, request: &Request) -> Response {
        match Route::resolve(request.method(), request.path()) {
            Route::Root => commands::root_handler(request),
            Route::Echo(value) => commands::echo_handler(request, value),
            Route::UserAgent => commands::user_agent_handler(request),
            Route::FileGet(name) => commands::get_file_handler(&self.static_dir, name),
            Route::FilePost(name) => commands::post_file_handler(&self.static_dir, name, request),
            Route::MethodNotAllowed => Response::new(StatusCode::MethodNotAllowed),
            Route::NotFound => Response::new(StatusCode::NotFound),
        }
    }
}
