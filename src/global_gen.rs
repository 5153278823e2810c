//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{v1, Node, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("memeid: could not lock global generator")
}

/// Returns the process-wide node derived from host information.
///
/// The node is computed once with [`Node::from_host`] and reused for the process lifetime.
pub fn default_node() -> Node {
    static NODE: sync::OnceLock<Node> = sync::OnceLock::new();
    *NODE.get_or_init(Node::from_host)
}

/// Generates a time-based UUID.
///
/// This function employs the [`default_node`] and a process-wide clock, so every call within a
/// process returns a distinct value. On Unix, the clock sequence is redrawn when the process ID
/// changes (i.e., upon process forks) to prevent collisions across processes.
///
/// # Examples
///
/// ```rust
/// let uuid = memeid::uuid1();
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// assert_eq!(uuid.version(), 1);
/// ```
pub fn uuid1() -> Uuid {
    let node = default_node();
    v1::next(&node, lock_global_gen().get_mut().clock())
}

/// Generates a random UUID.
///
/// # Examples
///
/// ```rust
/// let uuid = memeid::uuid4();
/// println!("{}", uuid); // e.g., "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
/// ```
pub fn uuid4() -> Uuid {
    lock_global_gen().get_mut().generator().generate_v4()
}

/// Generates a SQUUID from the current Unix time.
///
/// # Examples
///
/// ```rust
/// let uuid = memeid::squuid();
/// println!("{}", uuid); // e.g., "6351a7f2-09e0-4c3e-8a5b-2bd4b4a1c4d7"
/// assert_eq!(uuid.version(), 4);
/// ```
pub fn squuid() -> Uuid {
    lock_global_gen().get_mut().generator().generate_squuid()
}

mod inner {
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    use crate::{v4::Generator, Clock};

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: Generator<ChaCha12Rng>,
        clock: Clock,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            let mut rng = ChaCha12Rng::from_entropy();
            let clock = Clock::with_rng(&mut rng);
            log::debug!(
                "initialized global generator with clock sequence {:#06x}",
                clock.clock_seq()
            );
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: Generator::new(rng),
                clock,
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner instance, reseting the state on Unix if the
        /// process ID has changed.
        pub fn get_mut(&mut self) -> &mut Self {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                log::debug!("process ID changed; resetting global generator");
                *self = Default::default();
            }
            self
        }

        pub fn generator(&mut self) -> &mut Generator<ChaCha12Rng> {
            &mut self.generator
        }

        pub fn clock(&self) -> &Clock {
            &self.clock
        }
    }
}
