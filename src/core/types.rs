use std::{any::Any, fmt, str::FromStr, sync::Arc};

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct RedirectUri(pub String);

impl FromStr for RedirectUri {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl AsRef<str> for RedirectUri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A client secret as presented by, or stored in plain for, a client.
///
/// Not `PartialEq`. Compare with
/// [`constant_time_eq_str`](crate::util::compare::constant_time_eq_str).
#[derive(Clone, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(pub String);

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientSecret {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret([redacted])")
    }
}

/// An encoded argon2 hash of a [`ClientSecret`].
#[derive(Clone, Eq, PartialEq)]
pub struct HashedClientSecret(pub String);

impl From<String> for HashedClientSecret {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for HashedClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedClientSecret([redacted])")
    }
}

/// Caller-defined data attached to a client.
///
/// Nothing in this crate looks inside it. Cloning shares the payload rather
/// than copying it, so a clone is the *same* value as far as
/// [`UserData::ptr_eq`] is concerned.
#[derive(Clone, Default)]
pub struct UserData(Option<Arc<dyn Any + Send + Sync>>);

impl UserData {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Some(Arc::new(value)))
    }

    pub fn from_arc(value: Arc<dyn Any + Send + Sync>) -> Self {
        Self(Some(value))
    }

    pub fn empty() -> Self {
        Self(None)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.as_deref().and_then(|v| v.downcast_ref::<T>())
    }

    /// Whether both handles refer to the same payload, or are both empty.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl fmt::Debug for UserData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("UserData(..)"),
            None => f.write_str("UserData(None)"),
        }
    }
}
