pub mod error;

pub use error::{AccessTokenError, AccessTokenErrorKind, ErrorResponse};

use tracing::{event, Level};

use crate::core::models::Client;
use crate::core::types::{ClientId, ClientSecret};
use crate::util::compare::constant_time_eq_str;

/// Credentials a client presents at the token endpoint.
#[derive(Debug, Clone)]
#[derive(serde::Deserialize)]
pub struct ClientCredentials {
    pub client_id: ClientId,
    #[serde(default)]
    pub client_secret: Option<ClientSecret>,
}

impl ClientCredentials {
    pub fn new(client_id: ClientId, client_secret: Option<ClientSecret>) -> Self {
        Self {
            client_id,
            client_secret,
        }
    }
}

/// Checks `candidate` against `client`'s secret.
///
/// A client's own [`SecretMatcher`](crate::core::models::SecretMatcher) wins
/// when it has one and [`Client::secret`] is not read at all. Otherwise the
/// stored secret is compared in constant time.
#[tracing::instrument(skip(client, candidate), fields(client_id = %client.id()))]
pub fn check_client_secret<C: Client + ?Sized>(client: &C, candidate: &str) -> bool {
    match client.as_secret_matcher() {
        Some(matcher) => {
            event!(Level::TRACE, "Using client secret matcher");
            matcher.secret_matches(candidate)
        }
        None => {
            event!(Level::TRACE, "Using default secret comparison");
            constant_time_eq_str(client.secret(), candidate)
        }
    }
}

/// Authenticates `credentials` as belonging to `client`.
///
/// Confidential clients must present a matching secret. A public client may
/// omit the secret, but one that is presented is still checked.
#[tracing::instrument(skip_all, fields(client_id = %credentials.client_id.0))]
pub fn authenticate_client<C: Client + ?Sized>(
    client: &C,
    credentials: &ClientCredentials,
) -> Result<(), AccessTokenError> {
    if client.id() != credentials.client_id.0 {
        event!(Level::DEBUG, "Client id does not match record");
        return Err(AccessTokenError::invalid_client());
    }

    let ok = match &credentials.client_secret {
        Some(secret) => check_client_secret(client, secret.as_ref()),
        None => client.is_public(),
    };

    if ok {
        event!(Level::DEBUG, "Client authenticated");
        Ok(())
    } else {
        event!(Level::DEBUG, "Client authentication failed");
        Err(AccessTokenError::invalid_client())
    }
}
