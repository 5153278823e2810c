//! Bit-level layout of the 128-bit UUID value
//!
//! A [`Uuid`] is held as two 64-bit halves. Bit positions below are counted from the most
//! significant bit of the whole 128-bit value, as in RFC 4122:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                             high                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |             high              |  ver  |         high          |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|                          low                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              low                              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Every constructor except the raw ones ([`compose`], [`Uuid::from_u64_pair`], parsing) passes
//! through [`with_version_and_variant`].

use crate::Uuid;

/// Mask of the 4-bit version field within the `high` half.
pub const VERSION_MASK: u64 = 0x0000_0000_0000_f000;

/// Mask of the 2-bit variant field within the `low` half.
pub const VARIANT_MASK: u64 = 0xc000_0000_0000_0000;

/// The `10` variant pattern defined by RFC 4122, placed in the `low` half.
const VARIANT_RFC4122: u64 = 0x8000_0000_0000_0000;

/// Creates a UUID from its two halves verbatim.
pub const fn compose(high: u64, low: u64) -> Uuid {
    Uuid::from_u64_pair(high, low)
}

/// Creates a UUID from two halves, overwriting the version field with `version` and the variant
/// field with the RFC 4122 pattern.
///
/// # Panics
///
/// Panics if `version` is not a 4-bit integer.
///
/// # Examples
///
/// ```rust
/// use memeid::bits;
///
/// let uuid = bits::with_version_and_variant(u64::MAX, u64::MAX, 4);
/// assert_eq!(uuid.to_string(), "ffffffff-ffff-4fff-bfff-ffffffffffff");
/// ```
pub const fn with_version_and_variant(high: u64, low: u64, version: u8) -> Uuid {
    if version >= 1 << 4 {
        panic!("`version` must be a 4-bit integer");
    }

    Uuid::from_u64_pair(
        (high & !VERSION_MASK) | ((version as u64) << 12),
        (low & !VARIANT_MASK) | VARIANT_RFC4122,
    )
}

/// Returns the 4-bit version field.
pub const fn version(uuid: &Uuid) -> u8 {
    ((uuid.high() & VERSION_MASK) >> 12) as u8
}

/// Returns the numeric variant: `0` (NCS), `2` (RFC 4122), `6` (Microsoft) or `7` (future).
pub const fn variant(uuid: &Uuid) -> u8 {
    match uuid.low() >> 61 {
        0..=3 => 0,
        4 | 5 => 2,
        6 => 6,
        _ => 7,
    }
}

/// Returns the 16-byte big-endian form: `high` followed by `low`.
pub const fn to_be_bytes(uuid: &Uuid) -> [u8; 16] {
    (((uuid.high() as u128) << 64) | uuid.low() as u128).to_be_bytes()
}

/// Creates a UUID from its 16-byte big-endian form.
pub const fn from_be_bytes(bytes: [u8; 16]) -> Uuid {
    let value = u128::from_be_bytes(bytes);
    Uuid::from_u64_pair((value >> 64) as u64, value as u64)
}
