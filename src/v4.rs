//! UUIDv4-related functionality

use crate::generator::RandSource;
use crate::Uuid;
use rand::random;

impl Uuid {
    /// Creates a UUIDv4 object from 16 random bytes, overwriting the version and variant bits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let uuid = Uuid::from_random_bytes([0xff; 16]);
    /// assert_eq!(uuid.to_string(), "ffffffff-ffff-4fff-bfff-ffffffffffff");
    /// ```
    pub const fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self::with_version(bytes, 4)
    }
}

/// Generates a UUIDv4 object with the thread-local random number generator.
///
/// # Examples
///
/// ```rust
/// use rfc4122::uuid4;
///
/// let uuid = uuid4();
/// println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// ```
pub fn uuid4() -> Uuid {
    Uuid::from_random_bytes(random())
}

/// Generates a UUIDv4 object with a caller-chosen random number generator.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use rfc4122::{generator::with_rand08::Adapter, uuid4_with};
///
/// let uuid = uuid4_with(&mut Adapter(OsRng));
/// assert_eq!(uuid.version(), Some(4));
/// ```
pub fn uuid4_with<R: RandSource>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Uuid::from_random_bytes(bytes)
}
