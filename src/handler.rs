//! # Procesamiento de Requests
//! src/handler.rs
//!
//! El `RequestProcessor` aplica la política del servidor sobre un
//! request ya parseado y produce la respuesta. La política es una
//! cadena ordenada de chequeos donde gana la primera regla que aplica:
//!
//! 1. **Validez estructural** → 400
//! 2. **Resolución del recurso** (existencia + contención en doc_root) → 404
//! 3. **Permiso de lectura** → 403
//! 4. **Éxito** → 200 con el contenido del archivo
//!
//! Todas las respuestas llevan `Server` y `Content-Length`; si el
//! cliente declaró `Connection: close`, la respuesta lo repite.

use crate::fs;
use crate::http::{ParseError, Request, Response, StatusCode};
use crate::server::ServerError;
use std::path::{Path, PathBuf};

/// Valor del header `Server` de todas las respuestas
pub const SERVER_NAME: &str = "web_server/0.1.0";

/// Versión de protocolo que el servidor acepta en requests
const SUPPORTED_VERSION: &str = "HTTP/1.1";

/// Aplica validación y resolución de archivos a los requests
///
/// Se construye una sola vez al arrancar, con el document root ya
/// canonicalizado, y se comparte entre todos los workers. No hay
/// estado mutable: el doc_root es configuración, no estado.
#[derive(Debug)]
pub struct RequestProcessor {
    doc_root: PathBuf,
}

impl RequestProcessor {
    /// Crea un procesador para el document root dado
    ///
    /// `doc_root` debe estar canonicalizado (lo garantiza el arranque
    /// del servidor); la contención de paths depende de eso.
    pub fn new(doc_root: PathBuf) -> Self {
        Self { doc_root }
    }

    /// Obtiene el document root del procesador
    pub fn doc_root(&self) -> &Path {
        &self.doc_root
    }

    /// Convierte el resultado del parser en una respuesta
    ///
    /// Los errores de parsing y de protocolo del cliente se recuperan
    /// localmente como 400/403/404. Un fallo de I/O sobre un archivo ya
    /// resuelto es `ServerError::Fatal` y se propaga: es un problema de
    /// entorno, no del request.
    pub fn process_request(
        &self,
        parsed: Result<Request, ParseError>,
    ) -> Result<Response, ServerError> {
        let request = match parsed {
            Ok(request) => request,
            // Request malformado: 400 sin eco de Connection (un request
            // inválido no declaró nada)
            Err(_) => return Ok(Self::error_response(StatusCode::BadRequest, None)),
        };

        if !Self::is_structurally_valid(&request) {
            return Ok(Self::error_response(StatusCode::BadRequest, Some(&request)));
        }

        // Existencia y contención fallan igual: 404 en ambos casos para
        // no revelar la estructura del filesystem
        let path = match fs::resolve_under_root(&self.doc_root, request.target()) {
            Some(path) => path,
            None => return Ok(Self::error_response(StatusCode::NotFound, Some(&request))),
        };

        if !fs::has_other_read_permission(&path).map_err(ServerError::Fatal)? {
            return Ok(Self::error_response(StatusCode::Forbidden, Some(&request)));
        }

        let modified = fs::last_modified(&path).map_err(ServerError::Fatal)?;
        let content = fs::read_file_content(&path).map_err(ServerError::Fatal)?;

        let mut response = Response::new(StatusCode::Ok)
            .with_header("Server", SERVER_NAME)
            .with_header("Content-Type", fs::content_type_for(&path))
            .with_header("Last-Modified", &modified)
            .with_body_bytes(content);

        Self::echo_connection_close(&mut response, Some(&request));

        Ok(response)
    }

    /// Chequeos estructurales de la tabla de validación
    ///
    /// El parser ya garantizó 3 tokens y headers bien formados; acá se
    /// valida método, forma del target, versión y presencia de `Host`
    /// (clave exacta, como exige HTTP/1.1).
    fn is_structurally_valid(request: &Request) -> bool {
        request.method() == "GET"
            && request.target().starts_with('/')
            && request.version() == SUPPORTED_VERSION
            && request.header("Host").is_some()
    }

    /// Construye una respuesta de error con body HTML genérico
    fn error_response(status: StatusCode, request: Option<&Request>) -> Response {
        let page = format!(
            "<html><head><title>{status}</title></head>\
             <body><h1>{status}</h1></body></html>",
        );

        let mut response = Response::new(status)
            .with_header("Server", SERVER_NAME)
            .with_header("Content-Type", "text/html")
            .with_body(&page);

        Self::echo_connection_close(&mut response, request);
        response
    }

    /// Repite `Connection: close` si el cliente lo declaró
    fn echo_connection_close(response: &mut Response, request: Option<&Request>) {
        if request.map(|r| r.wants_close()).unwrap_or(false) {
            response.set_header("Connection", "close");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Document root temporal con index.html, logo.png y notes.txt
    fn temp_doc_root() -> PathBuf {
        let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
        let dir = std::env::temp_dir().join(format!(
            "web_server_handler_test_{}_{}",
            std::process::id(),
            id
        ));
        std::fs::create_dir_all(&dir).unwrap();

        for (name, contents) in [
            ("index.html", b"<html>home</html>".as_slice()),
            ("logo.png", b"\x89PNG fake".as_slice()),
            ("notes.txt", b"apuntes".as_slice()),
        ] {
            let mut file = File::create(dir.join(name)).unwrap();
            file.write_all(contents).unwrap();
        }

        std::fs::canonicalize(dir).unwrap()
    }

    fn processor() -> RequestProcessor {
        RequestProcessor::new(temp_doc_root())
    }

    fn get(target: &str) -> Result<Request, ParseError> {
        let raw = format!("GET {} HTTP/1.1\r\nHost: localhost", target);
        Request::parse(raw.as_bytes())
    }

    #[test]
    fn test_existing_file_is_200() {
        let response = processor().process_request(get("/notes.txt")).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/plain"));
        assert_eq!(response.header("Content-Length"), Some("7"));
        assert_eq!(response.header("Server"), Some(SERVER_NAME));
        assert_eq!(response.body(), b"apuntes");
    }

    #[test]
    fn test_png_content_type() {
        let response = processor().process_request(get("/logo.png")).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("image/png"));
    }

    #[test]
    fn test_success_has_last_modified() {
        let response = processor().process_request(get("/index.html")).unwrap();

        let modified = response.header("Last-Modified").unwrap();
        assert!(modified.ends_with(" GMT"));
    }

    #[test]
    fn test_root_serves_index_html() {
        let response = processor().process_request(get("/")).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.header("Content-Type"), Some("text/html"));
        assert_eq!(response.body(), b"<html>home</html>");
    }

    #[test]
    fn test_missing_file_is_404() {
        let response = processor().process_request(get("/missing.html")).unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.header("Content-Type"), Some("text/html"));
        assert!(response.header("Content-Length").is_some());
    }

    #[test]
    fn test_traversal_is_404() {
        let response = processor()
            .process_request(get("/../../../etc/passwd"))
            .unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
    }

    #[test]
    fn test_parse_error_is_400() {
        let parsed = Request::parse(b"GET /index.html\r\nHost: a");
        let response = processor().process_request(parsed).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_missing_host_is_400() {
        let parsed = Request::parse(b"GET /index.html HTTP/1.1\r\nUser-Agent: test");
        let response = processor().process_request(parsed).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_non_get_method_is_400() {
        let parsed = Request::parse(b"POST /index.html HTTP/1.1\r\nHost: a");
        let response = processor().process_request(parsed).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_wrong_version_is_400() {
        let parsed = Request::parse(b"GET /index.html HTTP/1.0\r\nHost: a");
        let response = processor().process_request(parsed).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_relative_target_is_400() {
        let parsed = Request::parse(b"GET index.html HTTP/1.1\r\nHost: a");
        let response = processor().process_request(parsed).unwrap();

        assert_eq!(response.status(), StatusCode::BadRequest);
    }

    #[test]
    fn test_connection_close_is_echoed() {
        let raw = b"GET /notes.txt HTTP/1.1\r\nHost: a\r\nConnection: close";
        let response = processor()
            .process_request(Request::parse(raw))
            .unwrap();

        assert_eq!(response.header("Connection"), Some("close"));
    }

    #[test]
    fn test_connection_close_echoed_on_errors_too() {
        let raw = b"GET /missing HTTP/1.1\r\nHost: a\r\nConnection: close";
        let response = processor()
            .process_request(Request::parse(raw))
            .unwrap();

        assert_eq!(response.status(), StatusCode::NotFound);
        assert_eq!(response.header("Connection"), Some("close"));
    }

    #[test]
    fn test_no_echo_without_close() {
        let response = processor().process_request(get("/notes.txt")).unwrap();
        assert_eq!(response.header("Connection"), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_403() {
        use std::os::unix::fs::PermissionsExt;

        let root = temp_doc_root();
        std::fs::set_permissions(
            root.join("notes.txt"),
            std::fs::Permissions::from_mode(0o640),
        )
        .unwrap();

        let response = RequestProcessor::new(root)
            .process_request(get("/notes.txt"))
            .unwrap();

        assert_eq!(response.status(), StatusCode::Forbidden);
    }
}
