//! # Archivos Estáticos
//!
//! - `GET /files/<name>`: lee `<static_dir>/<name>`
//! - `POST /files/<name>`: escribe el body en `<static_dir>/<name>`
//!
//! Los nombres con `..`, rutas absolutas o segmentos `.` se rechazan con
//! 404 antes de tocar el disco.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};

use crate::http::{Request, Response, StatusCode};

pub const OCTET_STREAM: &str = "application/octet-stream";

/// Directorio raíz desde donde se sirven y guardan archivos
#[derive(Debug, Clone)]
pub struct StaticDir {
    root: PathBuf,
}

impl StaticDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resuelve `name` dentro del directorio
    ///
    /// Retorna `None` si el nombre está vacío o si alguno de sus
    /// componentes podría salir del directorio.
    ///
    /// # Ejemplo
    /// ```
    /// use http_origin::commands::StaticDir;
    ///
    /// let dir = StaticDir::new("/srv/static");
    /// assert!(dir.resolve("notes.txt").is_some());
    /// assert!(dir.resolve("../etc/passwd").is_none());
    /// ```
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        let relative = Path::new(name);
        let mut components = relative.components().peekable();
        components.peek()?;

        if components.all(|component| matches!(component, Component::Normal(_))) {
            Some(self.root.join(relative))
        } else {
            None
        }
    }

    /// Lee el archivo completo
    pub fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        fs::read(self.resolve(name).ok_or_else(|| invalid_name(name))?)
    }

    /// Crea o trunca el archivo y escribe `contents`
    pub fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        let path = self.resolve(name).ok_or_else(|| invalid_name(name))?;
        let mut file = File::create(path)?;
        file.write_all(contents)?;
        file.flush()
    }
}

fn invalid_name(name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidInput,
        format!("invalid file name: {}", name),
    )
}

/// Handler para GET /files/<name>
///
/// Cualquier falla al abrir o leer se responde con 404.
pub fn get_file_handler(dir: &StaticDir, name: &str) -> Response {
    if dir.resolve(name).is_none() {
        warn!(file = name, "rejected file name");
        return Response::new(StatusCode::NotFound);
    }

    match dir.read(name) {
        Ok(contents) => Response::new(StatusCode::Ok)
            .with_header("Content-Type", OCTET_STREAM)
            .with_body(contents),
        Err(e) => {
            debug!(file = name, error = %e, "file not readable");
            Response::new(StatusCode::NotFound)
        }
    }
}

/// Handler para POST /files/<name>
///
/// Escribe los primeros `Content-Length` bytes del body. 201 si se pudo
/// escribir, 500 si falló la apertura o la escritura.
pub fn post_file_handler(dir: &StaticDir, name: &str, req: &Request) -> Response {
    if dir.resolve(name).is_none() {
        warn!(file = name, "rejected file name");
        return Response::new(StatusCode::NotFound);
    }

    match dir.write(name, req.content()) {
        Ok(()) => {
            debug!(file = name, bytes = req.content().len(), "file written");
            Response::new(StatusCode::Created)
        }
        Err(e) => {
            warn!(file = name, error = %e, "file write failed");
            Response::new(StatusCode::InternalServerError)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_request(raw: &str) -> Request {
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn static_dir() -> (TempDir, StaticDir) {
        let tmp = TempDir::new().unwrap();
        let dir = StaticDir::new(tmp.path());
        (tmp, dir)
    }

    #[test]
    fn test_resolve_rejects_unsafe_names() {
        let dir = StaticDir::new("/srv");

        assert_eq!(dir.resolve("a.txt"), Some(PathBuf::from("/srv/a.txt")));
        assert_eq!(dir.resolve("sub/a.txt"), Some(PathBuf::from("/srv/sub/a.txt")));
        assert_eq!(dir.resolve(""), None);
        assert_eq!(dir.resolve(".."), None);
        assert_eq!(dir.resolve("../secret"), None);
        assert_eq!(dir.resolve("sub/../../secret"), None);
        assert_eq!(dir.resolve("/etc/passwd"), None);
    }

    #[test]
    fn test_get_existing_file() {
        let (tmp, dir) = static_dir();
        fs::write(tmp.path().join("foo"), b"Hello, World!").unwrap();

        let response = get_file_handler(&dir, "foo");

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some(OCTET_STREAM));
        assert_eq!(response.body(), b"Hello, World!");
    }

    #[test]
    fn test_get_binary_file() {
        let (tmp, dir) = static_dir();
        let data = vec![0x00, 0xFF, 0x10, 0x0D, 0x0A];
        fs::write(tmp.path().join("blob.bin"), &data).unwrap();

        let response = get_file_handler(&dir, "blob.bin");
        assert_eq!(response.body(), &data[..]);
    }

    #[test]
    fn test_get_missing_file() {
        let (_tmp, dir) = static_dir();
        let response = get_file_handler(&dir, "doesnotexist");

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_get_directory_is_not_found() {
        let (tmp, dir) = static_dir();
        fs::create_dir(tmp.path().join("sub")).unwrap();

        assert_eq!(get_file_handler(&dir, "sub").status(), StatusCode::NotFound);
    }

    #[test]
    fn test_get_traversal_is_not_found() {
        let (_tmp, dir) = static_dir();
        assert_eq!(get_file_handler(&dir, "../Cargo.toml").status(), StatusCode::NotFound);
    }

    #[test]
    fn test_post_writes_content() {
        let (tmp, dir) = static_dir();
        let req = create_request("POST /files/test.txt HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");

        let response = post_file_handler(&dir, "test.txt", &req);

        assert_eq!(response.status(), StatusCode::Created);
        assert!(response.body().is_empty());
        assert_eq!(fs::read(tmp.path().join("test.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_post_truncates_existing_file() {
        let (tmp, dir) = static_dir();
        fs::write(tmp.path().join("t.txt"), b"a much longer previous content").unwrap();
        let req = create_request("POST /files/t.txt HTTP/1.1\r\nContent-Length: 3\r\n\r\nnew");

        post_file_handler(&dir, "t.txt", &req);

        assert_eq!(fs::read(tmp.path().join("t.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_post_only_writes_content_length_bytes() {
        let (tmp, dir) = static_dir();
        let req = create_request("POST /files/t.txt HTTP/1.1\r\nContent-Length: 2\r\n\r\nabcdef");

        post_file_handler(&dir, "t.txt", &req);

        assert_eq!(fs::read(tmp.path().join("t.txt")).unwrap(), b"ab");
    }

    #[test]
    fn test_post_into_missing_subdirectory_fails() {
        let (_tmp, dir) = static_dir();
        let req = create_request("POST /files/nope/t.txt HTTP/1.1\r\nContent-Length: 1\r\n\r\nx");

        let response = post_file_handler(&dir, "nope/t.txt", &req);
        assert_eq!(response.status(), StatusCode::InternalServerError);
    }

    #[test]
    fn test_post_traversal_is_rejected() {
        let (tmp, dir) = static_dir();
        let req = create_request("POST /files/x HTTP/1.1\r\nContent-Length: 1\r\n\r\nx");

        let response = post_file_handler(&dir, "../escaped.txt", &req);

        assert_eq!(response.status(), StatusCode::NotFound);
        assert!(!tmp.path().parent().unwrap().join("escaped.txt").exists());
    }
}
