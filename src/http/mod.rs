//! # Módulo HTTP
//!
//! Este módulo implementa el subconjunto de HTTP/1.1 que usa el servidor,
//! sin librerías de alto nivel. Incluye:
//!
//! - Framing de mensajes sobre el stream de bytes (delimitador CRLF CRLF)
//! - Parsing de requests GET
//! - Construcción y marshaling de responses
//! - Manejo de status codes
//!
//! ## Formato de Request soportado
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Connection: close\r\n
//! \r\n
//! ```
//!
//! No se soportan bodies: el delimitador `\r\n\r\n` marca el final del
//! mensaje completo, no solo de los headers.
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Server: web_server/0.1.0\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <html>...</html>
//! ```

pub mod framer;
pub mod request;  // Parsing de HTTP requests
pub mod response; // Construcción de HTTP responses
pub mod status;   // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
// Esto permite usar `http::Request` en vez de `http::request::Request`
pub use framer::Framer;
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;

/// Fin de línea de protocolo
pub const CRLF: &str = "\r\n";

/// Delimitador de fin de mensaje (dos CRLF consecutivos)
pub const CRLF_CRLF: &[u8] = b"\r\n\r\n";
