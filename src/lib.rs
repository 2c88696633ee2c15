pub mod core;
pub mod auth;
pub mod util;

pub use crate::auth::{authenticate_client, check_client_secret, ClientCredentials};
pub use crate::core::models::{Client, DefaultClient, SecretMatcher};
pub use crate::core::types::UserData;
