//! # Web Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 de archivos estáticos implementado desde cero para
//! demostrar conceptos de sistemas operativos: sockets TCP, concurrencia
//! con threads y control de acceso a archivos.
//!
//! ## Arquitectura
//!
//! El flujo de una conexión es siempre el mismo pipeline:
//!
//! ```text
//! bytes → Framer → Request::parse → RequestProcessor → Response::to_bytes → bytes
//! ```
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: framing, parsing de requests y construcción de responses HTTP/1.1
//! - `handler`: política de validación y resolución de archivos (400/403/404/200)
//! - `fs`: colaboradores de filesystem (canonicalización, permisos, MIME, mtime)
//! - `server`: socket TCP, pool acotado de workers y loop por conexión
//! - `config`: configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```ignore
//! use web_server::config::Config;
//! use web_server::server::Server;
//!
//! let config = Config::new(); // puerto y doc_root desde la línea de comandos
//! Server::new(config).run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod fs;
pub mod handler;
pub mod http;
pub mod server;
