use std::{fmt, sync::Arc};

use tracing::{event, Level};

use crate::core::models::{Client, SecretMatcher};
use crate::core::types::{ClientId, ClientSecret, HashedClientSecret, RedirectUri, UserData};

use super::random::FromRandom;

#[derive(Debug)]
pub struct Salt(pub String);

#[derive(Debug)]
pub enum Error {
    Argon2(argon2::Error),
}

impl From<argon2::Error> for Error {
    fn from(e: argon2::Error) -> Self {
        Self::Argon2(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Argon2(e) => write!(f, "argon2: {}", e),
        }
    }
}

impl std::error::Error for Error {}

pub struct HashingService {
    secret_key: String,
}

impl fmt::Debug for HashingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashingService {{ ... }}")
    }
}

impl HashingService {
    pub fn with_secret_key(secret_key: String) -> Self {
        Self { secret_key }
    }

    fn get_config(&self) -> argon2::Config<'_> {
        let mut config = argon2::Config::default();
        config.secret = self.secret_key.as_bytes();
        config
    }

    pub fn hash(&self, secret: &ClientSecret) -> Result<HashedClientSecret, Error> {
        let salt = Salt::from_random();
        let hash = argon2::hash_encoded(
            secret.as_ref().as_bytes(),
            salt.0.as_bytes(),
            &self.get_config(),
        )?;

        Ok(hash.into())
    }

    pub fn verify(&self, secret: &ClientSecret, hashed: &HashedClientSecret) -> Result<bool, Error> {
        let ok = argon2::verify_encoded_ext(
            hashed.as_ref(),
            secret.as_ref().as_bytes(),
            self.secret_key.as_bytes(),
            &[],
        )?;

        Ok(ok)
    }
}

/// A client whose secret is only ever held as an argon2 hash.
///
/// [`Client::secret`] returns the encoded hash, so the plain fallback
/// comparison would never succeed; verification goes through
/// [`SecretMatcher`] instead.
#[derive(Debug, Clone)]
pub struct HashedClient {
    pub id: ClientId,
    pub secret: HashedClientSecret,
    pub redirect_uri: RedirectUri,
    pub public: bool,
    pub user_data: UserData,
    hasher: Arc<HashingService>,
}

impl HashedClient {
    pub fn new(
        id: ClientId,
        secret: HashedClientSecret,
        redirect_uri: RedirectUri,
        hasher: Arc<HashingService>,
    ) -> Self {
        Self {
            id,
            secret,
            redirect_uri,
            public: false,
            user_data: UserData::empty(),
            hasher,
        }
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }
}

impl Client for HashedClient {
    fn id(&self) -> &str {
        &self.id.0
    }

    fn secret(&self) -> &str {
        &self.secret.0
    }

    fn redirect_uri(&self) -> &str {
        &self.redirect_uri.0
    }

    fn is_public(&self) -> bool {
        self.public
    }

    fn user_data(&self) -> &UserData {
        &self.user_data
    }

    fn as_secret_matcher(&self) -> Option<&dyn SecretMatcher> {
        Some(self)
    }
}

impl SecretMatcher for HashedClient {
    fn secret_matches(&self, candidate: &str) -> bool {
        match self.hasher.verify(&ClientSecret::from(candidate), &self.secret) {
            Ok(ok) => ok,
            Err(e) => {
                event!(
                    Level::WARN,
                    client_id = %self.id.0,
                    error = %e,
                    "Failed to verify hashed client secret"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::DefaultClient;

    fn hasher() -> Arc<HashingService> {
        Arc::new(HashingService::with_secret_key("server-key".to_string()))
    }

    fn hashed_client(hasher: Arc<HashingService>, secret: &str) -> HashedClient {
        let hashed = hasher.hash(&ClientSecret::from(secret)).unwrap();
        HashedClient::new(
            ClientId("abc".to_string()),
            hashed,
            RedirectUri("https://app.example/cb".to_string()),
            hasher,
        )
    }

    #[test]
    fn hash_then_verify() {
        let hasher = hasher();
        let hashed = hasher.hash(&ClientSecret::from("s3cr3t")).unwrap();

        assert_ne!(hashed.as_ref(), "s3cr3t");
        assert!(hasher.verify(&ClientSecret::from("s3cr3t"), &hashed).unwrap());
        assert!(!hasher.verify(&ClientSecret::from("s3cr3T"), &hashed).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let hasher = hasher();
        let a = hasher.hash(&ClientSecret::from("s3cr3t")).unwrap();
        let b = hasher.hash(&ClientSecret::from("s3cr3t")).unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn verify_depends_on_the_server_key() {
        let hashed = hasher().hash(&ClientSecret::from("s3cr3t")).unwrap();
        let other = HashingService::with_secret_key("another-key".to_string());

        assert!(!other
            .verify(&ClientSecret::from("s3cr3t"), &hashed)
            .unwrap_or(false));
    }

    #[test]
    fn hashed_client_matches_plaintext_not_hash() {
        let client = hashed_client(hasher(), "s3cr3t");
        let stored = client.secret().to_string();

        assert!(client.secret_matches("s3cr3t"));
        assert!(!client.secret_matches("s3cr3T"));
        assert!(!client.secret_matches(""));
        assert!(!client.secret_matches(&stored));
    }

    #[test]
    fn malformed_hash_is_a_mismatch() {
        let client = HashedClient::new(
            ClientId("abc".to_string()),
            HashedClientSecret("not-a-hash".to_string()),
            RedirectUri(String::new()),
            hasher(),
        );

        assert!(!client.secret_matches("not-a-hash"));
    }

    #[test]
    fn copying_a_hashed_client_keeps_the_encoded_hash() {
        let client = hashed_client(hasher(), "s3cr3t").with_user_data(UserData::new("meta"));
        let copy = DefaultClient::from_client(&client);

        assert_eq!(copy.secret(), client.secret());
        assert!(copy.user_data().ptr_eq(client.user_data()));
        assert!(!copy.secret_matches("s3cr3t"));
    }
}
