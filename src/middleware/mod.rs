pub mod auth;

pub use auth::{token_auth_middleware, TOKEN_HEADER};
