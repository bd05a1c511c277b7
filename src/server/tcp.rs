//! # Servidor TCP Concurrente
//! src/server/tcp.rs
//!
//! Implementación del servidor TCP que atiende múltiples conexiones
//! simultáneas usando threads, una conexión por thread.
//!
//! A diferencia del modelo clásico "un thread por conexión sin límite",
//! el accept loop está acotado por un `WorkerGate` (semáforo contador
//! con Mutex + Condvar): cuando hay `workers` conexiones activas, el
//! accept loop espera antes de lanzar la siguiente. Así la carga máxima
//! del proceso queda fija por configuración.

use crate::config::Config;
use crate::handler::RequestProcessor;
use crate::http::{Framer, Request};
use crate::server::ServerError;
use std::io::{ErrorKind, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

/// Tamaño del buffer de lectura del socket
const BUFSIZE: usize = 1024;

/// Semáforo contador que acota los workers de conexión activos
///
/// `acquire` bloquea cuando ya hay `capacity` workers corriendo;
/// `release` libera el cupo y despierta al accept loop.
pub struct WorkerGate {
    active: Mutex<usize>,
    condvar: Condvar,
    capacity: usize,
}

impl WorkerGate {
    /// Crea un gate con la capacidad máxima indicada
    pub fn new(capacity: usize) -> Self {
        Self {
            active: Mutex::new(0),
            condvar: Condvar::new(),
            capacity,
        }
    }

    /// Toma un cupo, bloqueando hasta que haya uno libre
    pub fn acquire(&self) {
        let mut active = self.active.lock().unwrap();
        while *active >= self.capacity {
            active = self.condvar.wait(active).unwrap();
        }
        *active += 1;
    }

    /// Devuelve un cupo y notifica al accept loop
    pub fn release(&self) {
        let mut active = self.active.lock().unwrap();
        *active -= 1;
        self.condvar.notify_one();
    }

    /// Cantidad de workers activos (para tests y diagnóstico)
    pub fn active(&self) -> usize {
        *self.active.lock().unwrap()
    }
}

/// Servidor HTTP/1.1 de archivos estáticos
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Arranca el servidor y atiende conexiones para siempre
    ///
    /// Los fallos de arranque (doc_root inválido, bind) son fatales y
    /// se retornan; los errores por conexión solo se loguean.
    pub fn run(&self) -> Result<(), ServerError> {
        // El doc_root se canonicaliza una única vez; la contención de
        // paths de cada request se compara contra esta forma canónica
        let doc_root = std::fs::canonicalize(&self.config.doc_root)
            .map_err(ServerError::Fatal)?;
        let processor = Arc::new(RequestProcessor::new(doc_root));

        let address = self.config.address();
        let listener = TcpListener::bind(&address).map_err(ServerError::Fatal)?;

        println!("[+] Servidor escuchando en {}", address);
        println!("[*] Document root: {}", processor.doc_root().display());
        println!("[*] Modo concurrente: un thread por conexión, máximo {}\n", self.config.workers);

        let gate = Arc::new(WorkerGate::new(self.config.workers));
        let timeout = Duration::from_millis(self.config.timeout_ms);

        for stream in listener.incoming() {
            match stream {
                Ok(stream) => {
                    // Esperar cupo antes de lanzar el worker: el accept
                    // loop es el único punto de admisión
                    gate.acquire();

                    let processor = Arc::clone(&processor);
                    let gate = Arc::clone(&gate);

                    let peer_addr = stream
                        .peer_addr()
                        .map(|addr| addr.to_string())
                        .unwrap_or_else(|_| "unknown".to_string());
                    println!(" ✅ Nueva conexión desde: {}", peer_addr);

                    thread::spawn(move || {
                        match Self::handle_connection(stream, &processor, timeout) {
                            Ok(()) => {}
                            Err(ServerError::Transport(e)) => {
                                eprintln!("   ❌ Error de conexión ({}): {}", peer_addr, e);
                            }
                            Err(error @ ServerError::Fatal(_)) => {
                                // Problema de entorno, no del cliente:
                                // abortar el proceso completo
                                eprintln!("💥 {}", error);
                                std::process::exit(1);
                            }
                        }
                        gate.release();
                    });
                }
                Err(e) => {
                    eprintln!("   ❌ Error al aceptar conexión: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Atiende una conexión hasta que el peer cierre, venza el timeout
    /// de inactividad o el cliente pida `Connection: close`
    ///
    /// Pipeline por mensaje: los bytes leídos se acumulan en el `Framer`
    /// de la conexión; cada mensaje completo se parsea, se procesa y la
    /// respuesta marshaled se escribe de vuelta. El único estado que
    /// sobrevive entre mensajes es el buffer del framer.
    pub(crate) fn handle_connection(
        mut stream: TcpStream,
        processor: &RequestProcessor,
        timeout: Duration,
    ) -> Result<(), ServerError> {
        stream
            .set_read_timeout(Some(timeout))
            .map_err(ServerError::Transport)?;
        stream
            .set_write_timeout(Some(timeout))
            .map_err(ServerError::Transport)?;

        let mut framer = Framer::new();
        let mut buffer = [0u8; BUFSIZE];

        loop {
            let bytes_read = match stream.read(&mut buffer) {
                // El peer cerró la conexión
                Ok(0) => return Ok(()),
                Ok(n) => n,
                // Timeout de inactividad: cerrar sin drama
                Err(e) if e.kind() == ErrorKind::WouldBlock => return Ok(()),
                Err(e) if e.kind() == ErrorKind::TimedOut => return Ok(()),
                Err(e) => return Err(ServerError::Transport(e)),
            };

            framer.append(&buffer[..bytes_read]);

            // Un solo read puede traer varios mensajes pipelined
            while framer.has_message() {
                let message = framer.top_message().to_vec();
                framer.pop_message();

                let parsed = Request::parse(&message);
                match &parsed {
                    Ok(request) => {
                        println!("   ✅ {} {}", request.method(), request.target());
                    }
                    Err(e) => {
                        println!("   ❌ Parse error: {}", e);
                    }
                }

                let close_requested = parsed
                    .as_ref()
                    .map(|request| request.wants_close())
                    .unwrap_or(false);

                let response = processor.process_request(parsed)?;

                stream
                    .write_all(&response.to_bytes())
                    .map_err(ServerError::Transport)?;
                stream.flush().map_err(ServerError::Transport)?;

                println!("   ✅ {}", response.status());

                if close_requested {
                    return Ok(());
                }
            }
        }
    }
}
