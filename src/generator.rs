//! UUIDv1 generator and the random number and clock interfaces consumed by the generators.

use crate::id::TICKS_PER_MS;
use crate::{Error, Uuid};

pub mod with_rand08;

#[cfg(test)]
mod tests;

/// A trait that defines the minimum random number generator interface consumed by
/// [`ClockState`] and [`uuid4_with`](crate::uuid4_with).
pub trait RandSource {
    /// Fills `dest` with random data.
    fn fill_bytes(&mut self, dest: &mut [u8]);
}

/// A trait that defines the minimum system clock interface for [`V1Generator`].
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that reads the current system time.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// Per-call overrides for UUIDv1 generation.
///
/// Every field left as `None` is resolved from the generator:
///
/// | Field       | Default                                        |
/// | ----------- | ---------------------------------------------- |
/// | `msecs`     | Current Unix time in milliseconds              |
/// | `nsecs`     | Previous tick plus one (reset on a new msec)   |
/// | `clock_seq` | Current clock sequence (bumped on clock rewind) |
/// | `node`      | Random node ID of the generator                |
///
/// # Examples
///
/// ```rust
/// use rfc4122::generator::V1Options;
///
/// let opts = V1Options::new()
///     .msecs(1_496_854_535_812)
///     .nsecs(9_460)
///     .clock_seq(0)
///     .node([1, 2, 3, 4, 5, 6]);
/// let uuid = rfc4122::uuid1_with(&opts)?;
/// assert_eq!(uuid.to_string(), "20616934-4ba2-11e7-8000-010203040506");
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct V1Options {
    /// Unix timestamp in milliseconds.
    pub msecs: Option<u64>,

    /// 100-nanosecond ticks within `msecs`; must be less than 10,000.
    pub nsecs: Option<u32>,

    /// Clock sequence; only the lower 14 bits are used.
    pub clock_seq: Option<u16>,

    /// 48-bit node ID.
    pub node: Option<[u8; 6]>,
}

impl V1Options {
    /// Creates an option set where every field falls back to the generator state.
    pub const fn new() -> Self {
        Self {
            msecs: None,
            nsecs: None,
            clock_seq: None,
            node: None,
        }
    }

    /// Sets the Unix timestamp in milliseconds.
    pub const fn msecs(mut self, msecs: u64) -> Self {
        self.msecs = Some(msecs);
        self
    }

    /// Sets the 100-nanosecond tick within the millisecond.
    pub const fn nsecs(mut self, nsecs: u32) -> Self {
        self.nsecs = Some(nsecs);
        self
    }

    /// Sets the clock sequence.
    pub const fn clock_seq(mut self, clock_seq: u16) -> Self {
        self.clock_seq = Some(clock_seq);
        self
    }

    /// Sets the node ID.
    pub const fn node(mut self, node: [u8; 6]) -> Self {
        self.node = Some(node);
        self
    }
}

/// Represents the mutable state that keeps UUIDv1 values unique within a generator: the last
/// timestamp and tick used, the clock sequence, and the node ID.
///
/// The state is seeded once from 16 random bytes. The first six become the node ID with the
/// multicast bit set, marking it as a random node ID rather than an IEEE 802 address (RFC 4122
/// section 4.1.6). Bytes 6 and 7 seed the 14-bit clock sequence.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ClockState {
    last_msecs: u64,
    last_nsecs: u32,
    clock_seq: u16,
    node_id: [u8; 6],
}

impl ClockState {
    /// Creates a state from 16 random seed bytes.
    pub fn from_seed(seed: [u8; 16]) -> Self {
        let node_id = [seed[0] | 0x01, seed[1], seed[2], seed[3], seed[4], seed[5]];
        let clock_seq = u16::from_be_bytes([seed[6], seed[7]]) & MAX_CLOCK_SEQ;
        tracing::debug!(?node_id, clock_seq, "seeded UUIDv1 clock state");
        Self {
            last_msecs: 0,
            last_nsecs: 0,
            clock_seq,
            node_id,
        }
    }

    /// Creates a state seeded with 16 bytes drawn from `rng`.
    ///
    /// A cryptographically strong source such as [`rand::rngs::OsRng`] should be used so that
    /// node IDs do not collide across processes.
    pub fn from_rand_source<R: RandSource>(rng: &mut R) -> Self {
        let mut seed = [0u8; 16];
        rng.fill_bytes(&mut seed);
        Self::from_seed(seed)
    }

    /// Returns the default node ID.
    pub const fn node_id(&self) -> &[u8; 6] {
        &self.node_id
    }

    /// Returns the current 14-bit clock sequence.
    pub const fn clock_seq(&self) -> u16 {
        self.clock_seq
    }

    /// Returns the Unix timestamp in milliseconds and the tick used by the last UUID.
    pub const fn last_timestamp(&self) -> (u64, u32) {
        (self.last_msecs, self.last_nsecs)
    }

    /// Generates a new UUIDv1 object from the `msecs` passed, resolving the other fields from
    /// `opts` and the state.
    ///
    /// The clock sequence is incremented when the timestamp moves backwards, unless `opts`
    /// specifies one. The tick restarts from zero when a new millisecond begins or the timestamp
    /// moves backwards, unless `opts` specifies one. The state is updated only when a UUID is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TicksExhausted`] if the resolved tick is 10,000 or greater, i.e., more
    /// than 10,000 UUIDs were requested within the same millisecond.
    pub fn generate_core(&mut self, msecs: u64, opts: &V1Options) -> Result<Uuid, Error> {
        let mut clock_seq = opts
            .clock_seq
            .map_or(self.clock_seq, |clock_seq| clock_seq & MAX_CLOCK_SEQ);
        let mut nsecs = opts.nsecs.unwrap_or(self.last_nsecs + 1);

        let dt = (i128::from(msecs) - i128::from(self.last_msecs)) * i128::from(TICKS_PER_MS)
            + (i128::from(nsecs) - i128::from(self.last_nsecs));

        if dt < 0 && opts.clock_seq.is_none() {
            clock_seq = (clock_seq + 1) & MAX_CLOCK_SEQ;
            tracing::debug!(msecs, last_msecs = self.last_msecs, clock_seq, "clock moved backwards");
        }

        if (dt < 0 || msecs > self.last_msecs) && opts.nsecs.is_none() {
            nsecs = 0;
        }

        if nsecs >= TICKS_PER_MS {
            tracing::debug!(msecs, nsecs, "UUIDv1 ticks exhausted");
            return Err(Error::TicksExhausted);
        }

        self.last_msecs = msecs;
        self.last_nsecs = nsecs;
        self.clock_seq = clock_seq;

        let node = opts.node.unwrap_or(self.node_id);
        Ok(Uuid::from_fields_v1(msecs, nsecs, clock_seq, &node))
    }
}

/// Represents a UUIDv1 generator that owns a [`ClockState`] and a [`TimeSource`].
///
/// A generator is not shared implicitly: it keeps its own node ID and clock sequence, and
/// generating requires `&mut self`. To share one across threads, wrap it in a mutex, as the
/// process-wide generator behind [`uuid1`](crate::uuid1) does.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::OsRng;
/// use rfc4122::V1Generator;
///
/// let mut g = V1Generator::with_rand08(OsRng);
/// let uuid = g.generate()?;
/// assert_eq!(uuid.version(), Some(1));
/// assert_eq!(&uuid.as_bytes()[10..], g.state().node_id());
/// # Ok::<(), rfc4122::Error>(())
/// ```
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct V1Generator<T = StdSystemTime> {
    state: ClockState,
    time: T,
}

impl V1Generator {
    /// Creates a generator that reads the system clock, seeding its state from `rng`.
    pub fn new<R: RandSource>(rng: &mut R) -> Self {
        Self::with_state_and_time_source(ClockState::from_rand_source(rng), StdSystemTime)
    }
}

impl<T: TimeSource> V1Generator<T> {
    /// Creates a generator from a prepared state and a custom time source.
    pub const fn with_state_and_time_source(state: ClockState, time: T) -> Self {
        Self { state, time }
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TicksExhausted`] if more than 10,000 UUIDs were requested within the same
    /// millisecond.
    pub fn generate(&mut self) -> Result<Uuid, Error> {
        self.generate_with(&V1Options::new())
    }

    /// Generates a new UUIDv1 object, applying the overrides in `opts`.
    ///
    /// See [`ClockState::generate_core`] for the resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TicksExhausted`] if the resolved tick is 10,000 or greater.
    pub fn generate_with(&mut self, opts: &V1Options) -> Result<Uuid, Error> {
        let msecs = match opts.msecs {
            Some(msecs) => msecs,
            None => self.time.unix_ts_ms(),
        };
        self.state.generate_core(msecs, opts)
    }

    /// Returns a reference to the clock state.
    pub const fn state(&self) -> &ClockState {
        &self.state
    }
}
