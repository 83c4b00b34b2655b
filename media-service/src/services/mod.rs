pub mod auth;
pub mod extract;
pub mod providers;

pub use auth::{ServiceAccountCredentials, ServiceAccountTokenProvider, TokenProvider};
