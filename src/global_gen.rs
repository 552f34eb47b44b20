//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::generator::V1Options;
use crate::{Error, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    // the state is only written after validation, so a poisoned lock still holds a valid state
    G.get_or_init(Default::default)
        .lock()
        .unwrap_or_else(sync::PoisonError::into_inner)
}

/// Generates a UUIDv1 object.
///
/// This function employs a global generator whose node ID and clock sequence are seeded once
/// from the operating system's random number generator. Calls are serialized, so UUIDs are
/// unique across threads within the process. On Unix, this function re-seeds the generator when
/// the process ID changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Errors
///
/// Returns [`Error::TicksExhausted`] if more than 10,000 UUIDs were requested within the same
/// millisecond. The caller should retry after the clock advances.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::uuid1()?;
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
/// # Ok::<(), rfc4122::Error>(())
/// ```
pub fn uuid1() -> Result<Uuid, Error> {
    lock_global_gen().get_mut().generate()
}

/// Generates a UUIDv1 object with the global generator, applying the overrides in `opts`.
///
/// The overrides are recorded in the global generator state just as
/// [`V1Generator::generate_with`](crate::V1Generator::generate_with) does.
///
/// # Errors
///
/// Returns [`Error::TicksExhausted`] if the resolved tick is 10,000 or greater.
pub fn uuid1_with(opts: &V1Options) -> Result<Uuid, Error> {
    lock_global_gen().get_mut().generate_with(opts)
}

mod inner {
    use rand::rngs::OsRng;

    use crate::generator::V1Generator;

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: V1Generator,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: V1Generator::with_rand08(OsRng),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`V1Generator`] instance, reseting the
        /// generator state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut V1Generator {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    old_pid = self.pid,
                    "process ID changed; re-seeding global UUIDv1 generator"
                );
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}
