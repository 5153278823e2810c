//! 48-bit node identifiers for time-based UUIDs

use md5::{Digest, Md5};

const MAX_NODE: u64 = (1 << 48) - 1;

/// The multicast bit of the first octet, which RFC 4122 sets on node identifiers that are not
/// real IEEE 802 addresses.
const MULTICAST_BIT: u64 = 1 << 40;

/// A source of the 48-bit node identifier stamped into time-based UUIDs.
pub trait NodeId {
    /// Returns the node identifier. Only the lower 48 bits are used.
    fn node_id(&self) -> u64;
}

/// A fixed 48-bit node identifier.
///
/// # Examples
///
/// ```rust
/// use memeid::{Node, NodeId};
///
/// let node = Node::from_bytes([0x9f, 0x6b, 0xde, 0xce, 0xd8, 0x46]);
/// assert_eq!(node.node_id(), 0x9f6b_dece_d846);
///
/// let node = Node::random(&mut rand::thread_rng());
/// assert!(node.is_multicast());
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct Node(u64);

impl Node {
    /// Creates a node from a 48-bit integer.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a 48-bit integer.
    pub const fn new(id: u64) -> Self {
        if id > MAX_NODE {
            panic!("`id` must be a 48-bit integer");
        }
        Self(id)
    }

    /// Creates a node from six octets, such as a hardware network address.
    pub const fn from_bytes(bytes: [u8; 6]) -> Self {
        Self(
            (bytes[0] as u64) << 40
                | (bytes[1] as u64) << 32
                | (bytes[2] as u64) << 24
                | (bytes[3] as u64) << 16
                | (bytes[4] as u64) << 8
                | bytes[5] as u64,
        )
    }

    /// Creates a random node with the multicast bit set.
    pub fn random<R: rand::RngCore + ?Sized>(rng: &mut R) -> Self {
        Self((rng.next_u64() & MAX_NODE) | MULTICAST_BIT)
    }

    /// Derives a node from host information with the multicast bit set.
    ///
    /// The host name, user name, operating system and architecture are hashed with MD5, so the
    /// result is stable for the same host and account without reading any network hardware.
    pub fn from_host() -> Self {
        let mut hasher = Md5::new();
        for source in host_sources() {
            hasher.update(source.as_bytes());
        }
        let digest = hasher.finalize();

        let mut bytes = [0u8; 6];
        bytes.copy_from_slice(&digest[..6]);
        let node = Self(Self::from_bytes(bytes).0 | MULTICAST_BIT);
        log::debug!("derived node {:012x} from host information", node.0);
        node
    }

    /// Returns the node identifier as an integer.
    pub const fn id(&self) -> u64 {
        self.0
    }

    /// Returns the node identifier as six octets.
    pub const fn to_bytes(&self) -> [u8; 6] {
        let b = self.0.to_be_bytes();
        [b[2], b[3], b[4], b[5], b[6], b[7]]
    }

    /// Returns `true` if the multicast bit is set.
    pub const fn is_multicast(&self) -> bool {
        self.0 & MULTICAST_BIT != 0
    }
}

impl NodeId for Node {
    fn node_id(&self) -> u64 {
        self.0
    }
}

impl From<Node> for u64 {
    fn from(src: Node) -> Self {
        src.0
    }
}

/// Collects non-empty, de-duplicated host identifying strings in a stable order.
fn host_sources() -> Vec<String> {
    use std::env;

    let mut sources: Vec<String> = ["HOSTNAME", "COMPUTERNAME", "USER", "USERNAME"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .collect();

    #[cfg(unix)]
    if let Ok(hostname) = std::fs::read_to_string("/etc/hostname") {
        sources.push(hostname.trim().to_owned());
    }

    sources.push(env::consts::OS.to_owned());
    sources.push(env::consts::ARCH.to_owned());
    sources.push(env::consts::FAMILY.to_owned());

    let mut seen = std::collections::HashSet::new();
    sources.retain(|e| !e.is_empty() && seen.insert(e.clone()));
    sources
}
