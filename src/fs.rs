//! # Colaboradores de Filesystem
//! src/fs.rs
//!
//! Funciones que conectan el pipeline HTTP con el sistema de archivos:
//! resolución de paths dentro del document root, chequeo de permisos,
//! tipo de contenido por extensión, fecha de modificación y lectura.
//!
//! La resolución es la única defensa contra path traversal: el path
//! pedido se canonicaliza (absoluto, sin symlinks) y se acepta solo si
//! el document root canónico es prefijo literal del resultado. Un path
//! inexistente y un intento de escape fallan igual (ambos terminan en
//! 404) para no filtrar la estructura del filesystem al cliente.

use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Resuelve el target de una request a un path absoluto bajo `doc_root`
///
/// `doc_root` debe llegar ya canonicalizado (se hace una sola vez al
/// arrancar el servidor). Retorna `None` si el path no existe, si no es
/// un archivo regular o si su forma canónica escapa del document root.
///
/// # Ejemplo
///
/// ```
/// use std::fs;
/// use web_server::fs::resolve_under_root;
///
/// let root = fs::canonicalize(".").unwrap();
/// assert!(resolve_under_root(&root, "/Cargo.toml").is_some());
/// assert!(resolve_under_root(&root, "/../../etc/passwd").is_none());
/// ```
pub fn resolve_under_root(doc_root: &Path, target: &str) -> Option<PathBuf> {
    let joined = doc_root.join(target.trim_start_matches('/'));

    // canonicalize falla si el path no existe; None == 404
    let resolved = fs::canonicalize(joined).ok()?;

    if !resolved.starts_with(doc_root) {
        return None;
    }

    if !resolved.is_file() {
        return None;
    }

    Some(resolved)
}

/// ¿Tiene el archivo permiso de lectura para "otros"?
///
/// Consulta el bit `o+r` (0o004) del modo Unix. El chequeo es sobre el
/// bit del archivo, no sobre lo que el proceso puede leer.
#[cfg(unix)]
pub fn has_other_read_permission(path: &Path) -> io::Result<bool> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(path)?;
    Ok(metadata.permissions().mode() & 0o004 != 0)
}

/// En plataformas sin bits de permiso Unix todo archivo resuelto se
/// considera legible.
#[cfg(not(unix))]
pub fn has_other_read_permission(_path: &Path) -> io::Result<bool> {
    Ok(true)
}

/// Determina el Content-Type según la extensión del archivo
///
/// Extensiones reconocidas: html, png, jpg/jpeg; cualquier otra (o
/// ninguna) se sirve como `text/plain`. La comparación ignora
/// mayúsculas.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "html" => "text/html",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "text/plain",
    }
}

/// Formatea la fecha de modificación del archivo para `Last-Modified`
///
/// Formato RFC 1123 en GMT, ej: `Sun, 06 Nov 1994 08:49:37 GMT`.
pub fn last_modified(path: &Path) -> io::Result<String> {
    let modified = fs::metadata(path)?.modified()?;
    let datetime: DateTime<Utc> = modified.into();
    Ok(datetime.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
}

/// Lee el contenido completo del archivo
///
/// El path ya fue resuelto y validado; un error acá es un problema de
/// entorno, no del cliente, y lo trata el nivel superior como fatal.
pub fn read_file_content(path: &Path) -> io::Result<Vec<u8>> {
    fs::read(path)
}
