mod error;
mod handlers;
mod origin;
mod routes;

pub use error::AppError;
pub use origin::{ClientOrigin, extract_client_origin, resolve_client_origin};
pub use routes::{AppState, auth_routes};
