//! Monotonic Gregorian clock for time-based UUIDs

use std::sync::atomic::{AtomicU64, Ordering};
use std::time;

/// Number of 100-nanosecond intervals between the UUID epoch (1582-10-15T00:00:00Z) and the
/// Unix epoch.
pub const UUID_EPOCH_OFFSET: u64 = 0x01b2_1dd2_1381_4000;

const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// Returns the current system time as 100-nanosecond ticks since the UUID epoch.
pub fn gregorian_ticks_now() -> u64 {
    let elapsed = time::SystemTime::now()
        .duration_since(time::UNIX_EPOCH)
        .expect("clock may have gone backwards");
    UUID_EPOCH_OFFSET + elapsed.as_secs() * 10_000_000 + u64::from(elapsed.subsec_nanos() / 100)
}

/// A timestamp and clock sequence pair taken from a [`Clock`].
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct ClockSample {
    /// 100-nanosecond ticks since the UUID epoch.
    pub ticks: u64,

    /// 14-bit clock sequence.
    pub clock_seq: u16,
}

/// Represents a clock that returns strictly increasing 100-nanosecond ticks since the UUID epoch.
///
/// The last returned tick is kept in an atomic and updated with a compare-and-swap loop, so a
/// single clock shared by reference (or through an `Arc`) across threads never hands out the same
/// tick twice. When the system clock does not advance between calls, or moves backwards, the
/// clock returns the last tick plus one instead.
///
/// # Examples
///
/// ```rust
/// use memeid::Clock;
/// use std::{sync::Arc, thread};
///
/// let clock = Arc::new(Clock::new(0x1234));
/// let handle = {
///     let clock = Arc::clone(&clock);
///     thread::spawn(move || clock.monotonic())
/// };
///
/// let a = clock.monotonic();
/// let b = handle.join().unwrap();
/// assert_ne!(a, b);
/// ```
#[derive(Debug)]
pub struct Clock {
    last: AtomicU64,
    clock_seq: u16,
}

impl Clock {
    /// Creates a clock with a fixed 14-bit clock sequence.
    ///
    /// # Panics
    ///
    /// Panics if `clock_seq` is not a 14-bit integer.
    pub const fn new(clock_seq: u16) -> Self {
        if clock_seq > MAX_CLOCK_SEQ {
            panic!("`clock_seq` must be a 14-bit integer");
        }

        Self {
            last: AtomicU64::new(0),
            clock_seq,
        }
    }

    /// Creates a clock with a clock sequence drawn from `rng`.
    pub fn with_rng<R: rand::RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.next_u32() as u16 & MAX_CLOCK_SEQ)
    }

    /// Returns the clock sequence.
    pub const fn clock_seq(&self) -> u16 {
        self.clock_seq
    }

    /// Returns a tick count strictly greater than any previously returned by this clock.
    pub fn monotonic(&self) -> u64 {
        self.monotonic_core(gregorian_ticks_now())
    }

    /// Returns `now` if it is greater than the last returned tick, or the last returned tick plus
    /// one otherwise.
    pub fn monotonic_core(&self, now: u64) -> u64 {
        let mut last = self.last.load(Ordering::Acquire);
        loop {
            let next = if now > last { now } else { last + 1 };
            match self
                .last
                .compare_exchange_weak(last, next, Ordering::AcqRel, Ordering::Acquire)
            {
                Ok(_) => {
                    if next != now {
                        log::trace!("clock advanced {} ticks past system time", next - now);
                    }
                    return next;
                }
                Err(actual) => last = actual,
            }
        }
    }

    /// Returns a fresh monotonic tick together with the clock sequence.
    pub fn sample(&self) -> ClockSample {
        ClockSample {
            ticks: self.monotonic(),
            clock_seq: self.clock_seq,
        }
    }
}
