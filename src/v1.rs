//! Time-based (version 1) UUIDs
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                           time_low                            |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |           time_mid            |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             node                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! The 60-bit timestamp counts 100-nanosecond intervals since 1582-10-15T00:00:00Z and is split
//! into its low 32, middle 16 and high 12 bits.

use std::cmp;

use crate::{bits, Clock, NodeId, Uuid};

const MAX_NODE: u64 = (1 << 48) - 1;

/// Generates a time-based UUID from `node` and the next tick of `clock`.
///
/// Two calls sharing the same clock always produce different UUIDs, since the clock never returns
/// the same tick twice.
///
/// # Examples
///
/// ```rust
/// use memeid::{v1, Clock, Node};
///
/// let node = Node::new(0x9f6b_dece_d846);
/// let clock = Clock::new(0x33c8);
/// let uuid = v1::next(&node, &clock);
/// assert_eq!(uuid.version(), 1);
/// assert_eq!(uuid.node(), Some(0x9f6b_dece_d846));
/// assert_eq!(uuid.clock_seq(), Some(0x33c8));
/// ```
pub fn next<N: NodeId + ?Sized>(node: &N, clock: &Clock) -> Uuid {
    let sample = clock.sample();
    Uuid::from_fields_v1(sample.ticks, sample.clock_seq, node.node_id() & MAX_NODE)
}

impl Uuid {
    /// Creates a version 1 UUID from a 60-bit timestamp, a 14-bit clock sequence and a 48-bit
    /// node.
    ///
    /// # Panics
    ///
    /// Panics if any argument is out of its field's range.
    pub const fn from_fields_v1(ticks: u64, clock_seq: u16, node: u64) -> Self {
        if ticks >= 1 << 60 || clock_seq >= 1 << 14 || node > MAX_NODE {
            panic!("invalid field value");
        }

        let high = (ticks & 0xffff_ffff) << 32 | (ticks >> 32 & 0xffff) << 16 | ticks >> 48;
        let low = (clock_seq as u64) << 48 | node;
        bits::with_version_and_variant(high, low, 1)
    }

    /// Returns the 60-bit timestamp of a version 1 UUID.
    pub const fn timestamp(&self) -> Option<u64> {
        if self.version() != 1 {
            return None;
        }

        let high = self.high();
        Some((high & 0x0fff) << 48 | (high >> 16 & 0xffff) << 32 | high >> 32)
    }

    /// Returns the 14-bit clock sequence of a version 1 UUID.
    pub const fn clock_seq(&self) -> Option<u16> {
        if self.version() != 1 {
            return None;
        }

        Some((self.low() >> 48) as u16 & 0x3fff)
    }

    /// Returns the 48-bit node of a version 1 UUID.
    pub const fn node(&self) -> Option<u64> {
        if self.version() != 1 {
            return None;
        }

        Some(self.low() & MAX_NODE)
    }

    /// Compares two UUIDs by creation time.
    ///
    /// UUIDs of different versions are ordered by version. Two version 1 UUIDs are ordered by
    /// their 60-bit timestamps, then by clock sequence and node. Any other pair is ordered by
    /// the full 128-bit value.
    pub fn cmp_by_time(&self, other: &Self) -> cmp::Ordering {
        match (self.timestamp(), other.timestamp()) {
            (Some(a), Some(b)) => a.cmp(&b).then(self.low().cmp(&other.low())),
            _ => self.version().cmp(&other.version()).then(self.cmp(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::next;
    use crate::{Clock, Kind, Node, Uuid, Variant};

    const MAX_UINT60: u64 = (1 << 60) - 1;
    const MAX_UINT14: u16 = (1 << 14) - 1;
    const MAX_UINT48: u64 = (1 << 48) - 1;

    /// Returns a collection of prepared cases
    fn prepare_cases() -> &'static [((u64, u16, u64), &'static str)] {
        &[
            ((0, 0, 0), "00000000-0000-1000-8000-000000000000"),
            ((MAX_UINT60, 0, 0), "ffffffff-ffff-1fff-8000-000000000000"),
            ((0, MAX_UINT14, 0), "00000000-0000-1000-bfff-000000000000"),
            ((0, 0, MAX_UINT48), "00000000-0000-1000-8000-ffffffffffff"),
            (
                (MAX_UINT60, MAX_UINT14, MAX_UINT48),
                "ffffffff-ffff-1fff-bfff-ffffffffffff",
            ),
            (
                (0x01ec_9414_c232_ab00, 0x1234, 0x1234_5678_9abc),
                "c232ab00-9414-11ec-9234-123456789abc",
            ),
            (
                (0x01ec_9414_c232_ab00, 0x33c8, 0x9f6b_dece_d846),
                "c232ab00-9414-11ec-b3c8-9f6bdeced846",
            ),
        ]
    }

    /// Encodes and decodes prepared cases correctly
    #[test]
    fn encodes_and_decodes_prepared_cases_correctly() {
        for ((ticks, clock_seq, node), text) in prepare_cases() {
            let e = Uuid::from_fields_v1(*ticks, *clock_seq, *node);
            assert_eq!(&e.to_string(), text);
            assert_eq!(e.kind(), Kind::V1);

            let parsed = Uuid::parse_or_nil(text);
            assert_eq!(parsed, e);
            assert_eq!(parsed.timestamp(), Some(*ticks));
            assert_eq!(parsed.clock_seq(), Some(*clock_seq));
            assert_eq!(parsed.node(), Some(*node));
        }
    }

    /// Returns no fields for other versions
    #[test]
    fn returns_no_fields_for_other_versions() {
        for e in [Uuid::NIL, Uuid::MAX, crate::v4::from_parts(0, 0)] {
            assert_eq!(e.timestamp(), None);
            assert_eq!(e.clock_seq(), None);
            assert_eq!(e.node(), None);
        }
    }

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<Uuid> = {
        let node = Node::new(0x1234_5678_9abc);
        let clock = Clock::new(0x0abc);
        (0..N_SAMPLES).map(|_| next(&node, &clock)).collect()
    });

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(&e.to_string()));
                assert_eq!(e.version(), 1);
                assert_eq!(e.variant(), Variant::Rfc4122);
            }
        });
    }

    /// Generates 100k identifiers without collision
    #[test]
    fn generates_100k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&Uuid> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Encodes strictly increasing timestamp with fixed clock sequence and node
    #[test]
    fn encodes_strictly_increasing_timestamp_with_fixed_clock_sequence_and_node() {
        SAMPLES.with(|samples| {
            for w in samples.windows(2) {
                assert!(w[0].timestamp() < w[1].timestamp());
                assert_eq!(w[0].cmp_by_time(&w[1]), std::cmp::Ordering::Less);
            }
            for e in samples {
                assert_eq!(e.clock_seq(), Some(0x0abc));
                assert_eq!(e.node(), Some(0x1234_5678_9abc));
            }
        });
    }

    /// Encodes up-to-date timestamp
    #[test]
    fn encodes_up_to_date_timestamp() {
        use crate::clock::UUID_EPOCH_OFFSET;
        use std::time;

        let node = Node::new(0);
        let clock = Clock::new(0);
        for _ in 0..10_000 {
            let ts_now = time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_millis() as i64;
            let ticks = next(&node, &clock).timestamp().unwrap();
            let timestamp = ((ticks - UUID_EPOCH_OFFSET) / 10_000) as i64;
            assert!((ts_now - timestamp).abs() < 16);
        }
    }

    /// Orders by time rather than by bytes
    #[test]
    fn orders_by_time_rather_than_by_bytes() {
        // time_low wraps around, so the later UUID sorts first byte-wise
        let earlier = Uuid::from_fields_v1(0x0000_0000_ffff_ffff, 0, 0);
        let later = Uuid::from_fields_v1(0x0000_0001_0000_0000, 0, 0);
        assert!(earlier > later);
        assert_eq!(earlier.cmp_by_time(&later), std::cmp::Ordering::Less);

        let v4 = crate::v4::from_parts(0, 0);
        assert_eq!(earlier.cmp_by_time(&v4), std::cmp::Ordering::Less);
        assert_eq!(Uuid::NIL.cmp_by_time(&earlier), std::cmp::Ordering::Less);
    }

    /// Never collides under multithreading with shared clock
    #[test]
    fn never_collides_under_multithreading_with_shared_clock() {
        use std::{collections::HashSet, sync::Arc, thread};

        let node = Node::new(0x0100_0000_0001);
        let clock = Arc::new(Clock::new(0));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let clock = Arc::clone(&clock);
                thread::spawn(move || {
                    (0..10_000)
                        .map(|_| next(&node, &clock))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut s = HashSet::new();
        for handle in handles {
            s.extend(handle.join().unwrap());
        }
        assert_eq!(s.len(), 4 * 10_000);
    }

    /// Rejects timestamps wider than sixty bits
    #[test]
    #[should_panic]
    fn rejects_timestamps_wider_than_sixty_bits() {
        Uuid::from_fields_v1(1 << 60, 0, 0);
    }
}
