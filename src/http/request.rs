//! # Parsing de Requests HTTP/1.1
//! src/http/request.rs
//!
//! Este módulo implementa el parser de requests del subconjunto de
//! HTTP/1.1 soportado: método GET, headers de una línea y sin body.
//!
//! ## Formato de un Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Connection: close\r\n
//! \r\n
//! ```
//!
//! El parser es estricto y fail-fast: un solo header malformado invalida
//! la request completa en vez de ignorarse. El resultado es siempre un
//! `Result` explícito; no existe el estado "request a medio parsear".

use std::collections::HashMap;

/// Representa un request HTTP parseado (sin body)
#[derive(Debug, Clone)]
pub struct Request {
    /// Método HTTP tal como llegó (ej: "GET")
    method: String,

    /// Target de la petición (ej: "/index.html")
    target: String,

    /// Versión HTTP tal como llegó (ej: "HTTP/1.1")
    version: String,

    /// Headers HTTP. Las claves son sensibles a mayúsculas tal como se
    /// recibieron; un header repetido sobrescribe al anterior.
    headers: HashMap<String, String>,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Request vacío
    EmptyRequest,

    /// Formato inválido de la request line (tokens distintos de 3,
    /// o bytes que no son UTF-8)
    InvalidRequestLine,

    /// Header malformado: sin ':', o con nombre/valor vacío
    InvalidHeader(String),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::InvalidRequestLine => write!(f, "Invalid request line format"),
            ParseError::InvalidHeader(h) => write!(f, "Invalid header: {}", h),
        }
    }
}

impl std::error::Error for ParseError {}

impl Request {
    /// Parsea un mensaje completo (ya extraído por el `Framer`, sin el
    /// delimitador final) en un `Request`
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use web_server::http::Request;
    ///
    /// let raw = b"GET /notes.txt HTTP/1.1\r\nHost: localhost";
    /// let request = Request::parse(raw).unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.target(), "/notes.txt");
    /// assert_eq!(request.header("Host"), Some("localhost"));
    /// ```
    pub fn parse(message: &[u8]) -> Result<Self, ParseError> {
        // Convertir a string (validando que sea UTF-8 válido)
        let message_str =
            std::str::from_utf8(message).map_err(|_| ParseError::InvalidRequestLine)?;

        if message_str.trim().is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        // Separar por \r\n para obtener líneas
        let lines: Vec<&str> = message_str.split("\r\n").collect();

        // 1. Parsear la request line (primera línea)
        let (method, target, version) = Self::parse_request_line(lines[0])?;

        // 2. Parsear headers (resto de líneas)
        let headers = Self::parse_headers(&lines[1..])?;

        Ok(Request {
            method,
            target,
            version,
            headers,
        })
    }

    /// Parsea la request line (primera línea del request)
    ///
    /// Formato: `GET /path HTTP/1.1` — exactamente 3 tokens separados
    /// por un espacio simple.
    fn parse_request_line(line: &str) -> Result<(String, String, String), ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        if parts.len() != 3 {
            return Err(ParseError::InvalidRequestLine);
        }

        let method = parts[0].to_string();
        let mut target = parts[1].to_string();
        let version = parts[2].to_string();

        // Redirección fija: '/' sirve '/index.html'
        if target == "/" {
            target.push_str("index.html");
        }

        Ok((method, target, version))
    }

    /// Parsea los headers HTTP
    ///
    /// Cada header tiene formato `Name: Value`; se separa en el *primer*
    /// ':' y ambos lados se recortan. Una línea sin ':' o con nombre o
    /// valor vacío invalida la request completa.
    fn parse_headers(lines: &[&str]) -> Result<HashMap<String, String>, ParseError> {
        let mut headers = HashMap::new();

        for line in lines {
            let colon_pos = line
                .find(':')
                .ok_or_else(|| ParseError::InvalidHeader(line.to_string()))?;

            let name = line[..colon_pos].trim();
            let value = line[colon_pos + 1..].trim();

            if name.is_empty() || value.is_empty() {
                return Err(ParseError::InvalidHeader(line.to_string()));
            }

            headers.insert(name.to_string(), value.to_string());
        }

        Ok(headers)
    }

    // === Métodos públicos para acceder a los campos ===

    /// Obtiene el método HTTP del request
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el target (path) del request
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Obtiene todos los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene un header específico (clave exacta)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(|s| s.as_str())
    }

    /// ¿Pidió el cliente cerrar la conexión tras la respuesta?
    ///
    /// El valor se compara sin distinguir mayúsculas; la clave del
    /// header es exacta.
    pub fn wants_close(&self) -> bool {
        self.header("Connection")
            .map(|v| v.eq_ignore_ascii_case("close"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_get() {
        let raw = b"GET /index.html HTTP/1.1\r\nHost: localhost:8080";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(request.target(), "/index.html");
        assert_eq!(request.version(), "HTTP/1.1");
        assert_eq!(request.header("Host"), Some("localhost:8080"));
    }

    #[test]
    fn test_root_redirects_to_index() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.target(), "/index.html");
    }

    #[test]
    fn test_parse_multiple_headers() {
        let raw = b"GET /a.png HTTP/1.1\r\nHost: localhost\r\nUser-Agent: test\r\nConnection: close";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("localhost"));
        assert_eq!(request.header("User-Agent"), Some("test"));
        assert_eq!(request.header("Connection"), Some("close"));
        assert_eq!(request.headers().len(), 3);
    }

    #[test]
    fn test_header_value_trimmed_around_first_colon() {
        let raw = b"GET / HTTP/1.1\r\nHost:   localhost:8080  ";
        let request = Request::parse(raw).unwrap();

        // Se separa en el primer ':'; el resto del valor lo conserva
        assert_eq!(request.header("Host"), Some("localhost:8080"));
    }

    #[test]
    fn test_duplicate_header_overwrites() {
        let raw = b"GET / HTTP/1.1\r\nHost: a\r\nHost: b";
        let request = Request::parse(raw).unwrap();

        assert_eq!(request.header("Host"), Some("b"));
    }

    #[test]
    fn test_request_line_with_two_tokens() {
        let raw = b"GET /index.html\r\nHost: a";
        let result = Request::parse(raw);

        assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
    }

    #[test]
    fn test_request_line_with_four_tokens() {
        let raw = b"GET /index.html HTTP/1.1 extra\r\nHost: a";
        let result = Request::parse(raw);

        assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
    }

    #[test]
    fn test_header_without_colon_is_invalid() {
        let raw = b"GET / HTTP/1.1\r\nHost localhost";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_header_with_empty_name_is_invalid() {
        let raw = b"GET / HTTP/1.1\r\n: localhost";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_header_with_empty_value_is_invalid() {
        let raw = b"GET / HTTP/1.1\r\nHost:   ";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_one_bad_header_invalidates_whole_request() {
        let raw = b"GET / HTTP/1.1\r\nHost: localhost\r\nbroken-line";
        let result = Request::parse(raw);

        assert!(matches!(result, Err(ParseError::InvalidHeader(_))));
    }

    #[test]
    fn test_empty_request() {
        let result = Request::parse(b"");
        assert_eq!(result.unwrap_err(), ParseError::EmptyRequest);
    }

    #[test]
    fn test_non_utf8_request_is_invalid() {
        let raw = [0xff, 0xfe, 0x20, 0x2f];
        let result = Request::parse(&raw);

        assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine);
    }

    #[test]
    fn test_wants_close() {
        let raw = b"GET / HTTP/1.1\r\nHost: a\r\nConnection: Close";
        let request = Request::parse(raw).unwrap();
        assert!(request.wants_close());

        let raw = b"GET / HTTP/1.1\r\nHost: a\r\nConnection: keep-alive";
        let request = Request::parse(raw).unwrap();
        assert!(!request.wants_close());

        let raw = b"GET / HTTP/1.1\r\nHost: a";
        let request = Request::parse(raw).unwrap();
        assert!(!request.wants_close());
    }
}
