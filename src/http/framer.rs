//! # Framing de Mensajes HTTP
//! src/http/framer.rs
//!
//! El stream TCP entrega bytes sin noción de mensajes: una request puede
//! llegar partida en varios `read()` o pueden llegar varias requests en
//! un solo segmento. El `Framer` acumula los bytes de una conexión y
//! extrae mensajes completos delimitados por `\r\n\r\n`.
//!
//! Como el servidor no soporta bodies, el delimitador marca el final del
//! mensaje *entero*: si un cliente envía un body, esos bytes quedan en el
//! buffer y se interpretan como el inicio del siguiente mensaje. Es una
//! limitación conocida del protocolo soportado, no un bug.

use super::CRLF_CRLF;

/// Acumulador de bytes de una conexión (uno por conexión)
///
/// Los mensajes consumidos se eliminan del frente del buffer; el resto
/// queda a la espera de más datos.
#[derive(Debug, Default)]
pub struct Framer {
    buffer: Vec<u8>,
}

impl Framer {
    /// Crea un framer con el buffer vacío
    pub fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Agrega bytes recibidos del socket al final del buffer
    ///
    /// Nunca falla y no tiene otro efecto que la mutación del buffer.
    pub fn append(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// ¿Contiene el buffer al menos un mensaje completo?
    pub fn has_message(&self) -> bool {
        self.find_delimiter().is_some()
    }

    /// Retorna el primer mensaje, sin incluir el delimitador
    ///
    /// Si no hay mensaje completo retorna un slice vacío; los callers
    /// deben consultar `has_message()` primero.
    pub fn top_message(&self) -> &[u8] {
        match self.find_delimiter() {
            Some(pos) => &self.buffer[..pos],
            None => &[],
        }
    }

    /// Elimina el primer mensaje del buffer, delimitador incluido
    ///
    /// No hace nada si no hay un mensaje completo.
    pub fn pop_message(&mut self) {
        if let Some(pos) = self.find_delimiter() {
            self.buffer.drain(..pos + CRLF_CRLF.len());
        }
    }

    /// Posición de la primera ocurrencia de `\r\n\r\n`
    fn find_delimiter(&self) -> Option<usize> {
        self.buffer
            .windows(CRLF_CRLF.len())
            .position(|window| window == CRLF_CRLF)
    }
}
