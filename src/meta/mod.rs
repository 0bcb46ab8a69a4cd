pub mod dtos;
pub mod errors;
pub mod handlers;

pub use errors::ApiError;
pub use handlers::{get_meta, preflight};
