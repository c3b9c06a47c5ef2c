mod api;
mod error;
mod http;
mod session;

pub use self::api::{ApiError, first_field_error};
pub use self::error::ErrorResponse;
pub use self::http::HttpError;
pub use self::session::SessionError;
