//! User-facing response messages.

pub const TOKEN_MISSING: &str = "No autorizado, token no encontrado";
pub const TOKEN_INVALID: &str = "No autorizado, token inválido";
pub const USER_NOT_FOUND: &str = "Usuario no encontrado";

pub const EMAIL_TAKEN: &str = "El usuario ya existe con ese correo";
pub const INVALID_CREDENTIALS: &str = "El correo o la contraseña son incorrectos";
pub const REGISTER_FAILED: &str = "Error al registrar en el servidor";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión en el servidor";

pub const PRODUCT_NOT_FOUND: &str = "Producto no encontrado";
pub const PRODUCT_NOT_SAVED: &str = "No se pudo guardar el producto";
pub const PRODUCT_DELETED: &str = "Producto eliminado";
pub const FORBIDDEN_UPDATE: &str = "No tienes permisos para modificar este producto";
pub const FORBIDDEN_DELETE: &str = "No tienes permisos para eliminar este producto";

pub const ROUTE_NOT_FOUND: &str = "Recurso no encontrado";
pub const INVALID_BODY: &str = "Cuerpo de la petición inválido";
pub const INTERNAL: &str = "Error interno del servidor";

// Field validation.
pub const NAME_REQUIRED: &str = "El nombre es obligatorio";
pub const EMAIL_INVALID: &str = "Debe ser un email válido";
pub const PASSWORD_TOO_SHORT: &str = "La contraseña debe tener mínimo 6 caracteres";
pub const PASSWORD_REQUIRED: &str = "La contraseña es obligatoria";
pub const PRICE_REQUIRED: &str = "El precio es obligatorio";
pub const PRICE_INVALID: &str = "El precio debe ser un número mayor o igual a 0";
pub const DESCRIPTION_REQUIRED: &str = "La descripción es obligatoria";
