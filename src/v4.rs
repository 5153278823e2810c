//! Random (version 4) UUIDs and SQUUIDs
//!
//! A SQUUID is a version 4 UUID whose leading 32 bits hold a Unix timestamp in seconds, so that
//! SQUUIDs sort approximately by creation time while the remaining bits stay random.

use rand::RngCore;

use crate::{bits, Uuid};

/// Creates a version 4 UUID from two halves, stamping the version and variant fields over them.
///
/// # Examples
///
/// ```rust
/// let uuid = memeid::v4::from_parts(u64::MAX, 0);
/// assert_eq!(uuid.to_string(), "ffffffff-ffff-4fff-8000-000000000000");
/// ```
pub const fn from_parts(high: u64, low: u64) -> Uuid {
    bits::with_version_and_variant(high, low, 4)
}

/// Represents a version 4 UUID generator that wraps a random number generator.
///
/// Any [`RngCore`] works, as these identifiers are not meant to be secrets.
///
/// # Examples
///
/// ```rust
/// use memeid::v4::Generator;
///
/// let mut g = Generator::new(rand::thread_rng());
/// println!("{}", g.generate_v4());
/// println!("{}", g.generate_squuid());
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Generator<R> {
    /// The random number generator used by the generator.
    rng: R,
}

impl<R: RngCore> Generator<R> {
    /// Creates a generator instance.
    pub const fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates a new random UUID.
    pub fn generate_v4(&mut self) -> Uuid {
        from_parts(self.rng.next_u64(), self.rng.next_u64())
    }

    /// Generates a new SQUUID from the current Unix time.
    pub fn generate_squuid(&mut self) -> Uuid {
        use std::time;
        self.generate_squuid_core(
            time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)
                .expect("clock may have gone backwards")
                .as_secs() as u32,
        )
    }

    /// Generates a new SQUUID whose leading 32 bits hold `unix_ts_secs`.
    pub fn generate_squuid_core(&mut self, unix_ts_secs: u32) -> Uuid {
        from_parts(
            u64::from(unix_ts_secs) << 32 | u64::from(self.rng.next_u32()),
            self.rng.next_u64(),
        )
    }
}

/// Supports operations as an infinite iterator that produces a new version 4 UUID for each call
/// of `next()`.
///
/// # Examples
///
/// ```rust
/// use memeid::v4::Generator;
///
/// Generator::new(rand::thread_rng())
///     .enumerate()
///     .skip(4)
///     .take(4)
///     .for_each(|(i, e)| println!("[{}] {}", i, e));
/// ```
impl<R: RngCore> Iterator for Generator<R> {
    type Item = Uuid;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.generate_v4())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

impl<R: RngCore> std::iter::FusedIterator for Generator<R> {}

#[cfg(test)]
mod tests {
    use super::{from_parts, Generator};
    use crate::{Kind, Variant};
    use rand::rngs::ThreadRng;

    const N_SAMPLES: usize = 200_000;
    thread_local!(static SAMPLES: Vec<String> = {
        let mut g: Generator<ThreadRng> = Default::default();
        (0..N_SAMPLES).map(|_| g.generate_v4().into()).collect()
    });

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Generates 200k identifiers without collision
    #[test]
    fn generates_200k_identifiers_without_collision() {
        use std::collections::HashSet;
        SAMPLES.with(|samples| {
            let s: HashSet<&String> = samples.iter().collect();
            assert_eq!(s.len(), N_SAMPLES);
        });
    }

    /// Sets constant bits and random bits properly
    #[test]
    fn sets_constant_bits_and_random_bits_properly() {
        // count '1' of each bit
        let bins = SAMPLES.with(|samples| {
            let mut bins = [0u32; 128];
            for e in samples {
                let mut it = bins.iter_mut().rev();
                for c in e.chars().rev() {
                    if let Some(mut num) = c.to_digit(16) {
                        for _ in 0..4 {
                            *it.next().unwrap() += num & 1;
                            num >>= 1;
                        }
                    }
                }
            }
            bins
        });

        // test if constant bits are all set to 1 or 0
        let n = N_SAMPLES as u32;
        assert_eq!(bins[48], 0, "version bit 48");
        assert_eq!(bins[49], n, "version bit 49");
        assert_eq!(bins[50], 0, "version bit 50");
        assert_eq!(bins[51], 0, "version bit 51");
        assert_eq!(bins[64], n, "variant bit 64");
        assert_eq!(bins[65], 0, "variant bit 65");

        // test if random bits are set to 1 at ~50% probability
        // set margin based on binom dist 99.999% confidence interval
        let margin = 4.417173 * (0.5 * 0.5 / N_SAMPLES as f64).sqrt();
        for i in (0..48).chain(52..64).chain(66..128) {
            let p = bins[i] as f64 / N_SAMPLES as f64;
            assert!((p - 0.5).abs() < margin, "random bit {}: {}", i, p);
        }
    }

    /// Stamps version and variant over caller parts without randomizing them
    #[test]
    fn stamps_version_and_variant_over_caller_parts_without_randomizing_them() {
        let cases = [
            ((0, 0), "00000000-0000-4000-8000-000000000000"),
            ((u64::MAX, u64::MAX), "ffffffff-ffff-4fff-bfff-ffffffffffff"),
            (
                (0x0123_4567_89ab_cdef, 0x0123_4567_89ab_cdef),
                "01234567-89ab-4def-8123-456789abcdef",
            ),
        ];

        for ((high, low), text) in cases {
            let e = from_parts(high, low);
            assert_eq!(e.to_string(), text);
            assert_eq!(from_parts(high, low), e);
            assert_eq!(e.kind(), Kind::V4);
            assert_eq!(e.variant(), Variant::Rfc4122);
        }
    }

    /// Encodes given seconds in leading bits of SQUUID
    #[test]
    fn encodes_given_seconds_in_leading_bits_of_squuid() {
        let mut g: Generator<ThreadRng> = Default::default();
        for secs in [0, 1, 0x5e0b_e100, u32::MAX] {
            let e = g.generate_squuid_core(secs);
            assert_eq!((e.high() >> 32) as u32, secs);
            assert_eq!(e.to_string()[..8], format!("{:08x}", secs));
            assert_eq!(e.kind(), Kind::V4);
            assert_eq!(e.variant(), Variant::Rfc4122);
        }
    }

    /// Generates SQUUIDs sortable by seconds
    #[test]
    fn generates_squuids_sortable_by_seconds() {
        let mut g: Generator<ThreadRng> = Default::default();
        let mut prev = g.generate_squuid_core(0x5e0b_e100);
        for secs in 0x5e0b_e101..0x5e0b_e101 + 10_000 {
            let curr = g.generate_squuid_core(secs);
            assert!(prev < curr);
            assert!(prev.to_string() < curr.to_string());
            prev = curr;
        }

        let a = g.generate_squuid_core(42);
        let b = g.generate_squuid_core(42);
        assert_ne!(a, b);
    }

    /// Encodes up-to-date seconds in SQUUID
    #[test]
    fn encodes_up_to_date_seconds_in_squuid() {
        use std::time;
        let mut g: Generator<ThreadRng> = Default::default();
        let ts_now = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_secs() as i64;
        let secs = (g.generate_squuid().high() >> 32) as i64;
        assert!((ts_now - secs).abs() <= 1);
    }

    /// Works as an infinite iterator
    #[test]
    fn works_as_an_infinite_iterator() {
        let g = Generator::new(rand::thread_rng());
        let values: Vec<_> = g.take(1_000).collect();
        assert_eq!(values.len(), 1_000);
        assert!(values.iter().all(|e| e.version() == 4));
        assert_ne!(values[0], values[1]);
    }
}
