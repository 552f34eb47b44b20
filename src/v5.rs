//! UUIDv5-related functionality

use sha1::{Digest, Sha1};

use crate::{uuid4, Uuid};

/// String forms of the namespaces predefined by RFC 4122.
pub mod namespace {
    /// Namespace for fully-qualified domain names
    pub const DNS: &str = "6ba7b810-9dad-11d1-80b4-00c04fd430c8";

    /// Namespace for URLs
    pub const URL: &str = "6ba7b811-9dad-11d1-80b4-00c04fd430c8";

    /// Namespace for ISO OIDs
    pub const OID: &str = "6ba7b812-9dad-11d1-80b4-00c04fd430c8";

    /// Namespace for X.500 distinguished names
    pub const X500: &str = "6ba7b814-9dad-11d1-80b4-00c04fd430c8";

    /// Nil namespace
    pub const NIL: &str = "00000000-0000-0000-0000-000000000000";
}

/// Options for [`uuid5`].
///
/// When `namespace` is `None`, `random_namespace` picks a freshly generated UUIDv4 (`true`) or
/// the Nil UUID (`false`) as the namespace.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct V5Options<'a> {
    /// Namespace UUID in any form accepted by [`Uuid::parse`].
    pub namespace: Option<&'a str>,

    /// Whether to use a random namespace if `namespace` is `None`.
    pub random_namespace: bool,
}

impl<'a> V5Options<'a> {
    /// Creates options that hash names under the Nil namespace.
    pub const fn new() -> Self {
        Self {
            namespace: None,
            random_namespace: false,
        }
    }

    /// Sets the namespace string.
    pub const fn namespace(mut self, namespace: &'a str) -> Self {
        self.namespace = Some(namespace);
        self
    }

    /// Sets whether to use a random namespace if none is given.
    pub const fn random_namespace(mut self, random_namespace: bool) -> Self {
        self.random_namespace = random_namespace;
        self
    }

    fn resolve_namespace(&self) -> Uuid {
        match self.namespace {
            Some(namespace) => Uuid::parse(namespace),
            None if self.random_namespace => uuid4(),
            None => Uuid::NIL,
        }
    }
}

impl Uuid {
    /// Creates a UUIDv5 object from the SHA-1 hash of the namespace bytes followed by the UTF-8
    /// bytes of `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let uuid = Uuid::from_name("example.com", &Uuid::NAMESPACE_DNS);
    /// assert_eq!(uuid.to_string(), "cfbff0d1-9375-5685-968c-48ce8b15ae17");
    /// ```
    pub fn from_name(name: &str, namespace: &Uuid) -> Self {
        let digest = Sha1::new()
            .chain_update(namespace.as_bytes())
            .chain_update(name.as_bytes())
            .finalize();

        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest[..16]);
        Self::with_version(bytes, 5)
    }
}

/// Generates a UUIDv5 object from `name` and the namespace resolved from `opts`.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{namespace, uuid5, V5Options};
///
/// let opts = V5Options::new().namespace(namespace::DNS);
/// let uuid = uuid5("example.com", &opts);
/// assert_eq!(uuid.to_string(), "cfbff0d1-9375-5685-968c-48ce8b15ae17");
/// assert_eq!(uuid, uuid5("example.com", &opts));
/// ```
pub fn uuid5(name: &str, opts: &V5Options<'_>) -> Uuid {
    Uuid::from_name(name, &opts.resolve_namespace())
}
