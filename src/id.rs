use std::{convert, fmt, str, sync::OnceLock};

use fstr::FStr;
use regex::Regex;

use crate::Error;

/// Offset between the Gregorian epoch (1582-10-15) and the Unix epoch (1970-01-01) in
/// milliseconds.
pub(crate) const GREGORIAN_OFFSET_MS: u64 = 12_219_292_800_000;

/// Number of 100-nanosecond ticks in one millisecond.
pub(crate) const TICKS_PER_MS: u32 = 10_000;

/// Represents a Universally Unique IDentifier.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid([u8; 16]);

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self([0x00; 16]);

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self([0xff; 16]);

    /// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_DNS: Self = Self::namespace(0x10);

    /// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_URL: Self = Self::namespace(0x11);

    /// Namespace for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_OID: Self = Self::namespace(0x12);

    /// Namespace for X.500 distinguished names (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
    pub const NAMESPACE_X500: Self = Self::namespace(0x14);

    /// The RFC 4122 predefined namespaces differ only in the fourth octet.
    const fn namespace(octet3: u8) -> Self {
        Self([
            0x6b, 0xa7, 0xb8, octet3, 0x9d, 0xad, 0x11, 0xd1, 0x80, 0xb4, 0x00, 0xc0, 0x4f, 0xd4,
            0x30, 0xc8,
        ])
    }

    /// Returns the Nil UUID, which is equal to [`Uuid::NIL`].
    pub const fn empty() -> Self {
        Self::NIL
    }

    /// Creates a UUID from a 16-byte big-endian array.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Creates a UUID from a byte slice, failing unless the slice is exactly 16 bytes long.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::{Error, Uuid};
    ///
    /// assert_eq!(Uuid::from_slice(&[0u8; 16]), Ok(Uuid::NIL));
    /// assert_eq!(Uuid::from_slice(&[0u8; 15]), Err(Error::InvalidLength(15)));
    /// ```
    pub fn from_slice(src: &[u8]) -> Result<Self, Error> {
        <[u8; 16]>::try_from(src)
            .map(Self)
            .map_err(|_| Error::InvalidLength(src.len()))
    }

    /// Returns a reference to the underlying byte array.
    pub const fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Creates a UUIDv1 from its field values.
    ///
    /// `unix_ts_ms` is converted to the Gregorian epoch and combined with `ticks` (100-nanosecond
    /// units within the millisecond) to form the 60-bit timestamp.
    ///
    /// # Panics
    ///
    /// Panics if `ticks` is not less than 10,000 or `clock_seq` is not a 14-bit integer.
    pub const fn from_fields_v1(unix_ts_ms: u64, ticks: u32, clock_seq: u16, node: &[u8; 6]) -> Self {
        if ticks >= TICKS_PER_MS || clock_seq >= 1 << 14 {
            panic!("invalid field value");
        }

        let msecs = unix_ts_ms.wrapping_add(GREGORIAN_OFFSET_MS);
        let time_low = ((msecs & 0xfff_ffff) * TICKS_PER_MS as u64 + ticks as u64) as u32;
        let time_mid_hi = ((msecs as u128 * TICKS_PER_MS as u128) >> 32) as u32 & 0xfff_ffff;

        Self([
            (time_low >> 24) as u8,
            (time_low >> 16) as u8,
            (time_low >> 8) as u8,
            time_low as u8,
            (time_mid_hi >> 8) as u8,
            time_mid_hi as u8,
            0x10 | (time_mid_hi >> 24) as u8 & 0x0f,
            (time_mid_hi >> 16) as u8,
            0x80 | (clock_seq >> 8) as u8,
            clock_seq as u8,
            node[0],
            node[1],
            node[2],
            node[3],
            node[4],
            node[5],
        ])
    }

    /// Overwrites the version nibble and sets the variant bits to `10`.
    pub(crate) const fn with_version(mut bytes: [u8; 16], version: u8) -> Self {
        bytes[6] = (bytes[6] & 0x0f) | (version << 4);
        bytes[8] = (bytes[8] & 0x3f) | 0x80;
        Self(bytes)
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = Uuid::parse("6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let mut buffer = [0u8; 36];
        let mut buf_iter = buffer.iter_mut();
        for (i, e) in self.0.iter().enumerate() {
            let e = *e as usize;
            *buf_iter.next().unwrap() = DIGITS[e >> 4];
            *buf_iter.next().unwrap() = DIGITS[e & 15];
            if i == 3 || i == 5 || i == 7 || i == 9 {
                *buf_iter.next().unwrap() = b'-';
            }
        }
        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Creates a UUID from a string by collecting up to 16 hexadecimal byte pairs.
    ///
    /// The input is scanned case-insensitively for non-overlapping runs of two hexadecimal digits.
    /// The first 16 pairs fill the bytes in order and any byte left over stays zero. Separators,
    /// braces, prefixes, and other noise are skipped, and this function never fails: input with
    /// no hexadecimal pairs yields the Nil UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rfc4122::Uuid;
    ///
    /// let x = Uuid::parse("{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}");
    /// assert_eq!(x, Uuid::NAMESPACE_DNS);
    ///
    /// assert_eq!(Uuid::parse("zz"), Uuid::NIL);
    /// assert_eq!(&Uuid::parse("0102").encode() as &str, "01020000-0000-0000-0000-000000000000");
    /// ```
    pub fn parse(src: &str) -> Self {
        static HEX_PAIR: OnceLock<Regex> = OnceLock::new();
        let pattern = HEX_PAIR.get_or_init(|| Regex::new("[0-9a-f]{2}").expect("invalid hex pair pattern"));

        let src = src.to_ascii_lowercase();
        let mut dst = [0u8; 16];
        for (e, m) in dst.iter_mut().zip(pattern.find_iter(&src)) {
            let pair = m.as_str().as_bytes();
            *e = (decode_digit(pair[0]) << 4) | decode_digit(pair[1]);
        }
        Self(dst)
    }

    /// Reads bytes 0-3 as a big-endian integer.
    ///
    /// This is the `time_low` field of a UUIDv1, i.e., the lowest 32 bits of its 100-nanosecond
    /// timestamp. The bytes are read as is regardless of the version.
    pub const fn millis_since_epoch(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// Reads bytes 8-9 as a big-endian integer.
    ///
    /// The variant bits are included; mask the result with `0x3fff` to obtain the 14-bit clock
    /// sequence of a UUIDv1.
    pub const fn clock_sequence(&self) -> u16 {
        u16::from_be_bytes([self.0[8], self.0[9]])
    }

    /// Reports the variant field value of the UUID or, if appropriate, "NIL" or "MAX".
    ///
    /// For convenience, this method reports [`Variant::VarNil`] or [`Variant::VarMax`] if `self`
    /// represents the Nil or Max UUID, although the Nil and Max UUIDs are technically subsumed
    /// under the variants `0b0` and `0b111`, respectively.
    pub fn variant(&self) -> Variant {
        match self.0[8] >> 4 {
            0x0..=0x7 if *self == Self::NIL => Variant::VarNil,
            0x0..=0x7 => Variant::Var0,
            0x8..=0xb => Variant::Var10,
            0xc..=0xd => Variant::Var110,
            0xe..=0xf if *self == Self::MAX => Variant::VarMax,
            _ => Variant::VarReserved,
        }
    }

    /// Returns the version field value of the UUID or `None` if `self` does not have the variant
    /// field value of `0b10`.
    pub fn version(&self) -> Option<u8> {
        match self.variant() {
            Variant::Var10 => Some(self.0[6] >> 4),
            _ => None,
        }
    }
}

const fn decode_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => 0,
    }
}

/// UUID variants defined by RFC 4122.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Variant {
    /// Nil UUID.
    VarNil,
    /// The variant field value of `0b0`, reserved for NCS backward compatibility.
    Var0,
    /// The variant field value of `0b10`, used by all the UUIDs generated by this crate.
    Var10,
    /// The variant field value of `0b110`, reserved for Microsoft backward compatibility.
    Var110,
    /// The variant field value of `0b111`, reserved for future definition.
    VarReserved,
    /// Max UUID.
    VarMax,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = convert::Infallible;

    /// Creates an object leniently from a string. See [`Uuid::parse`].
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(src))
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.0
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self(src)
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        Self::from_slice(src)
    }
}

impl AsRef<[u8]> for Uuid {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        Self::from_be_bytes(src.0)
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self(src.to_be_bytes())
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_bytes(src.0)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            Self(src.into_bytes())
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(self.as_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(Uuid::parse(value))
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            Uuid::from_slice(value).map_err(de::Error::custom)
        }
    }

}
