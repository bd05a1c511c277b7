//! # Web Server - Entry Point
//! src/main.rs
//!
//! Punto de entrada del servidor HTTP/1.1 de archivos estáticos.
//!
//! Uso: `web_server <port> <doc_root>`. Argumentos inválidos terminan
//! el proceso con el mensaje de uso y código distinto de cero; los
//! errores fatales de entorno (bind, doc_root ilegible) también.

use web_server::config::Config;
use web_server::server::Server;

fn main() {
    println!("=================================");
    println!("  Web Server HTTP/1.1");
    println!("  Principios de Sistemas Operativos");
    println!("=================================\n");

    // clap termina con usage + exit != 0 si faltan o sobran argumentos
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("Error de configuración: {}", e);
        eprintln!("Usage: web_server <port> <doc_root>");
        std::process::exit(2);
    }

    config.print_summary();

    // Iniciar el servidor (esto bloqueará el thread)
    let server = Server::new(config);
    if let Err(e) = server.run() {
        eprintln!("💥 Error fatal: {}", e);
        std::process::exit(1);
    }
}
