//! Integration with `rand` (v0.8) crate.

use super::{ClockState, RandSource, V1Generator};
use rand::RngCore;

/// An adapter that implements [`RandSource`] for [`RngCore`] types.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Adapter<T>(/** The wrapped [`RngCore`] type. */ pub T);

impl<T: RngCore> RandSource for Adapter<T> {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest)
    }
}

impl V1Generator {
    /// Creates a generator object that reads the system clock, seeding its node ID and clock
    /// sequence with a random number generator that implements [`RngCore`] from `rand` (v0.8)
    /// crate.
    pub fn with_rand08<T: RngCore>(rng: T) -> Self {
        Self::new(&mut Adapter(rng))
    }
}

impl ClockState {
    /// Creates a state seeded by a random number generator that implements [`RngCore`] from
    /// `rand` (v0.8) crate.
    pub fn with_rand08<T: RngCore>(rng: T) -> Self {
        Self::from_rand_source(&mut Adapter(rng))
    }
}
