//! Client-facing message texts.
//!
//! These strings are part of the public contract of the API and are asserted
//! on by clients, so they must not be reworded.

pub const PONG: &str = "pong!!!";
pub const INVALID_PAYLOAD: &str = "Carga inválida.";
pub const EMAIL_EXISTS: &str = "Lo siento, ese email ya existe.";
pub const USER_NOT_FOUND: &str = "El usuario no existe";
pub const USER_FOUND: &str = "Usuario encontrado";
pub const USERS_LISTED: &str = "Usuarios listados";
pub const INTERNAL_ERROR: &str = "Error interno del servidor";

/// Success message for a newly added user
pub fn user_added(email: &str) -> String {
    format!("{email} fue agregado!!!")
}
