//! User-facing messages returned in the `message` field of every envelope.

pub const FILL_ALL_FIELDS: &str = "Por favor, completa todos los campos.";
pub const FILL_REQUIRED_FIELDS: &str = "Por favor, completa todos los campos obligatorios.";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Las contraseñas no coinciden";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";
pub const INVALID_EMAIL: &str = "Por favor, introduce un correo electrónico válido.";

pub const LOGIN_SUCCESS: &str = "¡Inicio de sesión exitoso!";
pub const USER_NOT_FOUND: &str = "El usuario no existe";
pub const WRONG_PASSWORD: &str = "Contraseña incorrecta";

pub const REGISTER_SUCCESS: &str = "¡Registro exitoso! Redirigiendo al inicio de sesión...";
pub const USERNAME_TAKEN: &str = "El nombre de usuario ya está en uso.";
pub const EMAIL_TAKEN: &str = "El correo electrónico ya está registrado.";

pub const RESET_SUCCESS: &str =
    "¡Contraseña actualizada con éxito! Redirigiendo al inicio de sesión...";
pub const EMAIL_NOT_FOUND: &str = "No existe ninguna cuenta asociada a este correo electrónico.";

pub const LOGOUT_SUCCESS: &str = "Sesión cerrada correctamente.";
pub const SESSION_INVALID: &str = "Sesión no válida o expirada";

pub const DRIVER_ID_MISSING: &str = "ID de conductor no proporcionado";
pub const DRIVER_NOT_FOUND: &str = "Conductor no encontrado";

pub const METHOD_NOT_ALLOWED: &str = "Método de solicitud inválido";
pub const INVALID_REQUEST_BODY: &str = "Solicitud inválida";

pub const SQL_SCRIPT_EXECUTED: &str = "Script SQL ejecutado.";
pub const SQL_SCRIPT_DISABLED: &str = "La ejecución del script SQL está deshabilitada.";

// Context prefixes for database failures, followed by the driver message.
pub const CTX_DATABASE: &str = "Error en la base de datos";
pub const CTX_CONNECTION: &str = "Error de conexión";
pub const CTX_LIST_DRIVERS: &str = "Error al obtener los conductores";
pub const CTX_GET_DRIVER: &str = "Error al obtener el conductor";
pub const CTX_GET_ALERTS: &str = "Error al obtener las alertas";

pub const INTERNAL_ERROR: &str = "Error interno del servidor";
/// Prefix of the error shown on the driver report page.
pub const LOAD_DATA_ERROR: &str = "Error al cargar los datos";
