use super::types::*;
use crate::util::compare::constant_time_eq_str;

/// Read-only view of a registered client.
///
/// Anything that can answer these questions is a client: the in-memory
/// [`DefaultClient`], a wrapper around a database row, and so on.
pub trait Client {
    fn id(&self) -> &str;

    /// The secret as stored.
    ///
    /// Only compare against this when [`Client::as_secret_matcher`] returns
    /// `None`; see [`check_client_secret`](crate::auth::check_client_secret).
    fn secret(&self) -> &str;

    fn redirect_uri(&self) -> &str;

    fn is_public(&self) -> bool;

    fn user_data(&self) -> &UserData;

    /// Returns this client's own secret comparison, if it has one.
    ///
    /// When this is `Some`, the matcher is authoritative and
    /// [`Client::secret`] is never read for verification.
    fn as_secret_matcher(&self) -> Option<&dyn SecretMatcher> {
        None
    }
}

/// A client that decides for itself whether a presented secret matches.
///
/// Implementations comparing raw secrets must do so in constant time.
pub trait SecretMatcher {
    fn secret_matches(&self, candidate: &str) -> bool;
}

impl<C: Client + ?Sized> Client for &C {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn secret(&self) -> &str {
        (**self).secret()
    }
    fn redirect_uri(&self) -> &str {
        (**self).redirect_uri()
    }
    fn is_public(&self) -> bool {
        (**self).is_public()
    }
    fn user_data(&self) -> &UserData {
        (**self).user_data()
    }
    fn as_secret_matcher(&self) -> Option<&dyn SecretMatcher> {
        (**self).as_secret_matcher()
    }
}

impl<C: Client + ?Sized> Client for Box<C> {
    fn id(&self) -> &str {
        (**self).id()
    }
    fn secret(&self) -> &str {
        (**self).secret()
    }
    fn redirect_uri(&self) -> &str {
        (**self).redirect_uri()
    }
    fn is_public(&self) -> bool {
        (**self).is_public()
    }
    fn user_data(&self) -> &UserData {
        (**self).user_data()
    }
    fn as_secret_matcher(&self) -> Option<&dyn SecretMatcher> {
        (**self).as_secret_matcher()
    }
}

#[derive(Debug, Clone, Default)]
pub struct DefaultClient {
    pub id: ClientId,
    pub secret: ClientSecret,
    pub redirect_uri: RedirectUri,
    pub public: bool,
    pub user_data: UserData,
}

impl DefaultClient {
    pub fn new(id: ClientId, secret: ClientSecret, redirect_uri: RedirectUri) -> Self {
        Self {
            id,
            secret,
            redirect_uri,
            public: false,
            user_data: UserData::empty(),
        }
    }

    pub fn public(id: ClientId, redirect_uri: RedirectUri) -> Self {
        Self {
            id,
            secret: ClientSecret::default(),
            redirect_uri,
            public: true,
            user_data: UserData::empty(),
        }
    }

    pub fn with_user_data(mut self, user_data: UserData) -> Self {
        self.user_data = user_data;
        self
    }

    pub fn from_client<C: Client + ?Sized>(client: &C) -> Self {
        let mut d = Self::default();
        d.copy_from(client);
        d
    }

    /// Overwrites every field with the corresponding value of `client`.
    ///
    /// User data is shared with `client`, not copied.
    pub fn copy_from<C: Client + ?Sized>(&mut self, client: &C) {
        self.id = ClientId(client.id().to_string());
        self.secret = ClientSecret(client.secret().to_string());
        self.redirect_uri = RedirectUri(client.redirect_uri().to_string());
        self.public = client.is_public();
        self.user_data = client.user_data().clone();
    }
}

impl Client for DefaultClient {
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

impl SecretMatcher for DefaultClient {
    fn secret_matches(&self, candidate: &str) -> bool {
        constant_time_eq_str(&self.secret.0, candidate)
    }
}
