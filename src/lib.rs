//! An implementation of RFC 4122 UUID versions 1, 4, and 5
//!
//! ```rust
//! use rfc4122::{namespace, uuid1, uuid4, uuid5, V5Options};
//!
//! let uuid = uuid1()?;
//! println!("{}", uuid); // e.g. "c232ab00-9414-11ec-b3c8-9f6bdeced846"
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = uuid5("example.com", &V5Options::new().namespace(namespace::DNS));
//! assert_eq!(uuid.to_string(), "cfbff0d1-9375-5685-968c-48ce8b15ae17");
//! # Ok::<(), rfc4122::Error>(())
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! Version 1 identifiers have the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |     time_high         |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp split into `time_low`, `time_mid`, and `time_high` counts
//!   100-nanosecond ticks since the Gregorian epoch (1582-10-15). It is derived from
//!   the Unix timestamp in milliseconds plus a tick counter that is incremented for
//!   each UUID generated within the same millisecond.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is randomly initialized and incremented whenever
//!   the clock moves backwards.
//! - The 48-bit `node` field is a random node ID with the multicast bit set, chosen
//!   once per generator.
//!
//! Since a millisecond holds only 10,000 ticks, generating more than 10,000 UUIDs
//! within the same millisecond fails with [`Error::TicksExhausted`]; the caller is
//! expected to retry after the clock advances.
//!
//! Version 4 identifiers carry 122 random bits, and version 5 identifiers carry the
//! first 122 bits of the SHA-1 hash of a namespace UUID followed by a name.
//!
//! # Parsing
//!
//! [`Uuid::parse`] is lenient: it collects up to 16 hexadecimal byte pairs from the
//! input, ignoring anything else, and zero-fills the rest. It never fails.
//!
//! ```rust
//! use rfc4122::Uuid;
//!
//! assert_eq!(Uuid::parse("{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}"), Uuid::NAMESPACE_DNS);
//! assert_eq!(Uuid::parse("zz"), Uuid::empty());
//! ```

mod error;
pub use error::Error;

mod id;
pub use id::{Uuid, Variant};

pub mod generator;
pub use generator::{V1Generator, V1Options};

mod v4;
pub use v4::{uuid4, uuid4_with};

mod v5;
pub use v5::{namespace, uuid5, V5Options};

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{uuid1, uuid1_with};
