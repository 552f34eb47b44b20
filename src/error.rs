//! Error type shared by the fallible operations of this crate.

/// Errors returned by UUID construction and generation.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum Error {
    /// A byte buffer passed to [`Uuid::from_slice`](crate::Uuid::from_slice) was not exactly 16
    /// bytes long.
    #[error("invalid UUID length: expected 16 bytes, found {0}")]
    InvalidLength(usize),

    /// More than 10,000 version 1 UUIDs were requested within the same millisecond.
    ///
    /// The caller should back off and retry once the clock advances.
    #[error("too many UUIDs requested within one millisecond tick in this process")]
    TicksExhausted,
}
