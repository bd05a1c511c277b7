//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto
//! 2. Acepta conexiones y las atiende en threads (acotados por un gate)
//! 3. Corre el pipeline read → frame → parse → process → marshal → write
//!
//! También define la taxonomía de errores del servidor: los errores de
//! transporte matan solo a su conexión; los errores fatales de entorno
//! abortan el proceso completo.

pub mod tcp;

pub use tcp::Server;

use std::io;

/// Errores del servidor, separados por alcance
///
/// La distinción se resuelve en un único punto (el worker de la
/// conexión) en vez de decidirse en cada llamada al sistema.
#[derive(Debug)]
pub enum ServerError {
    /// Error de transporte (timeout, reset del peer, fallo de escritura).
    /// Termina solo la conexión afectada.
    Transport(io::Error),

    /// Error fatal de entorno (fallo de I/O sobre un archivo ya
    /// resuelto, fallo de bind/listen). Aborta el proceso.
    Fatal(io::Error),
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerError::Transport(e) => write!(f, "connection error: {}", e),
            ServerError::Fatal(e) => write!(f, "fatal environment error: {}", e),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Transport(e) | ServerError::Fatal(e) => Some(e),
        }
    }
}
