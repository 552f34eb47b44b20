use super::*;
use crate::{Error, Uuid, Variant};
use std::{cell::Cell, rc::Rc};

/// Time source whose reading is controlled by the test.
#[derive(Clone, Debug, Default)]
struct MockTimeSource(Rc<Cell<u64>>);

impl TimeSource for MockTimeSource {
    fn unix_ts_ms(&mut self) -> u64 {
        self.0.get()
    }
}

/// Random source that replays a fixed seed.
struct MockRandSource([u8; 16]);

impl RandSource for MockRandSource {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for (d, s) in dest.iter_mut().zip(self.0.iter().cycle()) {
            *d = *s;
        }
    }
}

const SEED: [u8; 16] = [
    0xa0, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5, 0x12, 0x34, 0, 0, 0, 0, 0, 0, 0, 0,
];

const TS: u64 = 1_700_000_000_000;

fn new_generator() -> (V1Generator<MockTimeSource>, Rc<Cell<u64>>) {
    let clock = Rc::new(Cell::new(TS));
    let g = V1Generator::with_state_and_time_source(
        ClockState::from_seed(SEED),
        MockTimeSource(Rc::clone(&clock)),
    );
    (g, clock)
}

/// Derives node ID and clock sequence from seed
#[test]
fn derives_node_id_and_clock_sequence_from_seed() {
    let state = ClockState::from_seed(SEED);
    assert_eq!(state.node_id(), &[0xa1, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5]);
    assert_eq!(state.clock_seq(), 0x1234);
    assert_eq!(state.last_timestamp(), (0, 0));

    let mut seed = [0xffu8; 16];
    seed[0] = 0xfe;
    let state = ClockState::from_rand_source(&mut MockRandSource(seed));
    assert_eq!(state.node_id(), &[0xff; 6]);
    assert_eq!(state.clock_seq(), 0x3fff);
}

/// Sets multicast bit of random node ID
#[test]
fn sets_multicast_bit_of_random_node_id() {
    for _ in 0..1_000 {
        let state = ClockState::with_rand08(rand::thread_rng());
        assert_eq!(state.node_id()[0] & 0x01, 0x01);
        assert!(state.clock_seq() < 1 << 14);
    }
}

/// Reproduces known UUIDv1 vector
#[test]
fn reproduces_known_uuidv1_vector() {
    let (mut g, _) = new_generator();
    let opts = V1Options::new()
        .msecs(1_496_854_535_812)
        .nsecs(9_460)
        .clock_seq(0)
        .node([1, 2, 3, 4, 5, 6]);
    assert_eq!(
        g.generate_with(&opts).unwrap().to_string(),
        "20616934-4ba2-11e7-8000-010203040506"
    );
    assert_eq!(g.state().clock_seq(), 0);
    assert_eq!(g.state().last_timestamp(), (1_496_854_535_812, 9_460));
}

/// Reads timestamp from time source and fills defaults from state
#[test]
fn reads_timestamp_from_time_source_and_fills_defaults_from_state() {
    let (mut g, _) = new_generator();
    let e = g.generate().unwrap();
    assert_eq!(
        e,
        Uuid::from_fields_v1(TS, 0, 0x1234, &[0xa1, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5])
    );
    assert_eq!(e.to_string(), "04afc000-833b-11ee-9234-a1b1c2d3e4f5");
    assert_eq!(e.version(), Some(1));
    assert_eq!(e.variant(), Variant::Var10);
}

/// Increments ticks within the same millisecond and resets them on a new one
#[test]
fn increments_ticks_within_the_same_millisecond_and_resets_them_on_a_new_one() {
    let (mut g, clock) = new_generator();
    let node = *g.state().node_id();
    for i in 0..100 {
        let e = g.generate().unwrap();
        assert_eq!(e, Uuid::from_fields_v1(TS, i, 0x1234, &node));
        assert_eq!(g.state().last_timestamp(), (TS, i));
    }

    clock.set(TS + 1);
    let e = g.generate().unwrap();
    assert_eq!(e, Uuid::from_fields_v1(TS + 1, 0, 0x1234, &node));
    assert_eq!(e.to_string(), "04afe710-833b-11ee-9234-a1b1c2d3e4f5");

    let e = g.generate().unwrap();
    assert_eq!(e, Uuid::from_fields_v1(TS + 1, 1, 0x1234, &node));
}

/// Increments clock sequence when clock moves backwards
#[test]
fn increments_clock_sequence_when_clock_moves_backwards() {
    let (mut g, clock) = new_generator();
    let node = *g.state().node_id();
    g.generate().unwrap();
    g.generate().unwrap();

    clock.set(TS - 1);
    let e = g.generate().unwrap();
    assert_eq!(e, Uuid::from_fields_v1(TS - 1, 0, 0x1235, &node));
    assert_eq!(e.to_string(), "04af98f0-833b-11ee-9235-a1b1c2d3e4f5");
    assert_eq!(g.state().clock_seq(), 0x1235);
    assert_eq!(g.state().last_timestamp(), (TS - 1, 0));

    // going forward again keeps the bumped sequence
    clock.set(TS);
    let e = g.generate().unwrap();
    assert_eq!(e, Uuid::from_fields_v1(TS, 0, 0x1235, &node));
}

/// Wraps clock sequence around at 14 bits
#[test]
fn wraps_clock_sequence_around_at_14_bits() {
    let mut seed = SEED;
    seed[6] = 0xff;
    seed[7] = 0xff;
    let mut state = ClockState::from_seed(seed);
    assert_eq!(state.clock_seq(), 0x3fff);

    state.generate_core(TS, &V1Options::new()).unwrap();
    let e = state.generate_core(TS - 1, &V1Options::new()).unwrap();
    assert_eq!(state.clock_seq(), 0);
    assert_eq!(e.clock_sequence(), 0x8000);
}

/// Treats a smaller tick within the same millisecond as clock rollback
#[test]
fn treats_a_smaller_tick_within_the_same_millisecond_as_clock_rollback() {
    let mut state = ClockState::from_seed(SEED);
    state
        .generate_core(TS, &V1Options::new().nsecs(5))
        .unwrap();
    let e = state
        .generate_core(TS, &V1Options::new().nsecs(3))
        .unwrap();
    assert_eq!(state.clock_seq(), 0x1235);
    assert_eq!(state.last_timestamp(), (TS, 3));
    assert_eq!(e, Uuid::from_fields_v1(TS, 3, 0x1235, state.node_id()));
}

/// Keeps caller-supplied clock sequence even when clock moves backwards
#[test]
fn keeps_caller_supplied_clock_sequence_even_when_clock_moves_backwards() {
    let (mut g, _) = new_generator();
    g.generate().unwrap();

    let opts = V1Options::new().msecs(TS - 10).clock_seq(7);
    let e = g.generate_with(&opts).unwrap();
    assert_eq!(e.clock_sequence() & 0x3fff, 7);
    assert_eq!(g.state().clock_seq(), 7);

    // subsequent calls continue from the persisted sequence
    let e = g.generate_with(&V1Options::new().msecs(TS - 20)).unwrap();
    assert_eq!(e.clock_sequence() & 0x3fff, 8);
}

/// Masks caller-supplied clock sequence to 14 bits
#[test]
fn masks_caller_supplied_clock_sequence_to_14_bits() {
    let (mut g, _) = new_generator();
    let e = g.generate_with(&V1Options::new().clock_seq(0xffff)).unwrap();
    assert_eq!(e.as_bytes()[8], 0xbf);
    assert_eq!(e.as_bytes()[9], 0xff);
    assert_eq!(g.state().clock_seq(), 0x3fff);
}

/// Uses caller-supplied tick and node as is
#[test]
fn uses_caller_supplied_tick_and_node_as_is() {
    let (mut g, _) = new_generator();
    let node = [0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
    let e = g
        .generate_with(&V1Options::new().nsecs(42).node(node))
        .unwrap();
    assert_eq!(e, Uuid::from_fields_v1(TS, 42, 0x1234, &node));
    assert_eq!(&e.as_bytes()[10..], &node);
    assert_eq!(g.state().node_id(), &[0xa1, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5]);
}

/// Returns error once ticks reach 10,000 with explicit ticks
#[test]
fn returns_error_once_ticks_reach_10000_with_explicit_ticks() {
    let (mut g, _) = new_generator();
    assert!(g.generate_with(&V1Options::new().nsecs(9_999)).is_ok());
    assert_eq!(
        g.generate_with(&V1Options::new().nsecs(10_000)),
        Err(Error::TicksExhausted)
    );
    assert_eq!(
        g.generate_with(&V1Options::new().nsecs(10_001)),
        Err(Error::TicksExhausted)
    );
    // state is left untouched by failed calls
    assert_eq!(g.state().last_timestamp(), (TS, 9_999));
    assert_eq!(g.state().clock_seq(), 0x1234);
}

/// Returns error once ticks reach 10,000 with incrementing ticks
#[test]
fn returns_error_once_ticks_reach_10000_with_incrementing_ticks() {
    let (mut g, clock) = new_generator();
    for i in 0..10_000 {
        let e = g.generate().unwrap();
        assert_eq!(g.state().last_timestamp(), (TS, i));
        assert_eq!(e.millis_since_epoch(), 0x04af_c000 + i);
    }
    assert_eq!(g.generate(), Err(Error::TicksExhausted));
    assert_eq!(g.generate(), Err(Error::TicksExhausted));

    // recovers once the clock advances
    clock.set(TS + 1);
    assert!(g.generate().is_ok());
    assert_eq!(g.state().last_timestamp(), (TS + 1, 0));
}

/// Generates unique identifiers under rapid successive calls
#[test]
fn generates_unique_identifiers_under_rapid_successive_calls() {
    use std::collections::HashSet;

    let mut g = V1Generator::with_rand08(rand::thread_rng());
    let mut s = HashSet::new();
    while s.len() < 50_000 {
        match g.generate() {
            Ok(e) => {
                assert_eq!(e.version(), Some(1));
                assert_eq!(e.variant(), Variant::Var10);
                assert!(s.insert(e));
            }
            Err(Error::TicksExhausted) => std::thread::yield_now(),
            Err(err) => panic!("unexpected error: {}", err),
        }
    }
}
