pub mod cors;

pub use cors::{cors_headers_middleware, method_not_allowed, preflight};
