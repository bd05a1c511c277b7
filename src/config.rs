//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor HTTP con soporte
//! para argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./web_server 8080 ./htdocs --workers 16 --timeout-ms 5000
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_HOST=0.0.0.0 WORKERS=32 ./web_server 8080 ./htdocs
//! ```

use clap::Parser;
use std::path::Path;

/// Configuración del servidor HTTP/1.1 de archivos estáticos
#[derive(Debug, Clone, Parser)]
#[command(name = "web_server")]
#[command(about = "Servidor HTTP/1.1 de archivos estáticos para Principios de Sistemas Operativos")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Puerto en el que escucha el servidor (1-65535)
    #[arg(value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Directorio raíz desde el que se sirven los archivos (document root)
    pub doc_root: String,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Número máximo de conexiones atendidas en simultáneo.
    ///
    /// Sin un límite, un pico de conexiones crea threads sin control;
    /// el accept loop se acota con un gate de este tamaño.
    #[arg(long, default_value = "16", env = "WORKERS")]
    pub workers: usize,

    /// Timeout de inactividad por conexión en milisegundos
    /// (aplica a lecturas y escrituras del socket)
    #[arg(long = "timeout-ms", default_value = "5000", env = "TIMEOUT_MS")]
    pub timeout_ms: u64,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    ///
    /// Si los argumentos son inválidos o faltan, clap imprime el mensaje
    /// de uso y termina el proceso con código distinto de cero.
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos que clap no puede
    /// verificar por sí solo (ej: que el doc_root exista).
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("workers must be >= 1".to_string());
        }

        if self.timeout_ms == 0 {
            return Err("timeout-ms must be > 0".to_string());
        }

        let root = Path::new(&self.doc_root);
        if !root.is_dir() {
            return Err(format!("doc_root is not a directory: {}", self.doc_root));
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Puerto: {}", self.port);
        println!("   Host: {}", self.host);
        println!("   Doc Root: {}", self.doc_root);
        println!("   Workers: {}", self.workers);
        println!("   Timeout: {} ms", self.timeout_ms);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(doc_root: &str) -> Config {
        Config {
            port: 8080,
            doc_root: doc_root.to_string(),
            host: "127.0.0.1".to_string(),
            workers: 16,
            timeout_ms: 5000,
        }
    }

    #[test]
    fn test_address_format() {
        let config = config_for(".");
        assert_eq!(config.address(), "127.0.0.1:8080");
    }

    #[test]
    fn test_validate_accepts_existing_dir() {
        let config = config_for(".");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_missing_doc_root() {
        let config = config_for("/no/such/directory/anywhere");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let mut config = config_for(".");
        config.workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = config_for(".");
        config.timeout_ms = 0;
        assert!(config.validate().is_err());
    }
}
