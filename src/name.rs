//! Name-based (version 3 and version 5) UUIDs
//!
//! A name-based UUID is derived by hashing the 16-byte namespace UUID followed by the bytes of a
//! name, taking the first 16 bytes of the hash, and stamping the version and variant fields.
//! The result is deterministic: the same namespace, name and algorithm always produce the same
//! UUID.
//!
//! ```rust
//! use memeid::name::{v3_from, v5_from, NAMESPACE_DNS};
//!
//! assert_eq!(
//!     v3_from(&NAMESPACE_DNS, "python.org").to_string(),
//!     "6fa459ea-ee8a-3ca4-894e-db77e160355e"
//! );
//! assert_eq!(
//!     v5_from(&NAMESPACE_DNS, "python.org").to_string(),
//!     "886313e1-3b8a-5372-9b90-0c9aee199e5d"
//! );
//! ```

use md5::{Digest, Md5};
use sha1::Sha1;

use crate::{bits, DigestInput, Uuid};

/// Namespace for fully-qualified domain names (6ba7b810-9dad-11d1-80b4-00c04fd430c8)
pub const NAMESPACE_DNS: Uuid = Uuid::from_u64_pair(0x6ba7_b810_9dad_11d1, 0x80b4_00c0_4fd4_30c8);

/// Namespace for URLs (6ba7b811-9dad-11d1-80b4-00c04fd430c8)
pub const NAMESPACE_URL: Uuid = Uuid::from_u64_pair(0x6ba7_b811_9dad_11d1, 0x80b4_00c0_4fd4_30c8);

/// Namespace for ISO OIDs (6ba7b812-9dad-11d1-80b4-00c04fd430c8)
pub const NAMESPACE_OID: Uuid = Uuid::from_u64_pair(0x6ba7_b812_9dad_11d1, 0x80b4_00c0_4fd4_30c8);

/// Namespace for X.500 DNs (6ba7b814-9dad-11d1-80b4-00c04fd430c8)
pub const NAMESPACE_X500: Uuid = Uuid::from_u64_pair(0x6ba7_b814_9dad_11d1, 0x80b4_00c0_4fd4_30c8);

/// Hash function used to derive a name-based UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum HashAlgorithm {
    /// MD5, producing version 3 UUIDs.
    Md5,

    /// SHA-1 truncated to 16 bytes, producing version 5 UUIDs.
    Sha1,
}

impl HashAlgorithm {
    /// Returns the UUID version produced with this algorithm.
    pub const fn version(self) -> u8 {
        match self {
            Self::Md5 => 3,
            Self::Sha1 => 5,
        }
    }

    /// Hashes the concatenation of `parts` and returns the first 16 bytes.
    fn hash(self, parts: &[&[u8]]) -> [u8; 16] {
        fn run<D: Digest>(parts: &[&[u8]]) -> [u8; 16] {
            let mut hasher = D::new();
            for e in parts {
                hasher.update(e);
            }
            let mut dst = [0u8; 16];
            dst.copy_from_slice(&hasher.finalize()[..16]);
            dst
        }

        match self {
            Self::Md5 => run::<Md5>(parts),
            Self::Sha1 => run::<Sha1>(parts),
        }
    }
}

/// Generates a name-based UUID from `namespace` and `name` with the given hash algorithm.
///
/// `name` is anything convertible into a [`DigestInput`]: a string, another UUID, or a custom
/// value built with [`DigestInput::custom`].
pub fn from<'a>(
    namespace: &Uuid,
    name: impl Into<DigestInput<'a>>,
    algorithm: HashAlgorithm,
) -> Uuid {
    let namespace = DigestInput::from(namespace).digest();
    let name = name.into().digest();
    let (high, low) = Uuid::from_bytes(algorithm.hash(&[&*namespace, &*name])).as_u64_pair();
    bits::with_version_and_variant(high, low, algorithm.version())
}

/// Generates a version 3 (MD5) UUID from `namespace` and `name`.
pub fn v3_from<'a>(namespace: &Uuid, name: impl Into<DigestInput<'a>>) -> Uuid {
    from(namespace, name, HashAlgorithm::Md5)
}

/// Generates a version 5 (SHA-1) UUID from `namespace` and `name`.
pub fn v5_from<'a>(namespace: &Uuid, name: impl Into<DigestInput<'a>>) -> Uuid {
    from(namespace, name, HashAlgorithm::Sha1)
}
