//! RFC 4122 UUIDs: time-based, name-based and random identifiers
//!
//! ```rust
//! use memeid::{uuid1, uuid4, v5_from, NAMESPACE_DNS};
//!
//! let uuid = uuid1();
//! println!("{}", uuid); // e.g. "c232ab00-9414-11ec-b3c8-9f6bdeced846"
//! println!("{:?}", uuid.to_bytes()); // as 16-byte big-endian array
//!
//! let uuid = uuid4();
//! println!("{}", uuid); // e.g. "2ca4b2ce-6c13-40d4-bccf-37d222820f6f"
//!
//! let uuid = v5_from(&NAMESPACE_DNS, "python.org");
//! assert_eq!(uuid.to_string(), "886313e1-3b8a-5372-9b90-0c9aee199e5d");
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Supported versions
//!
//! - Version 1 ([`v1`]): a 60-bit count of 100-nanosecond intervals since 1582-10-15, a 14-bit
//!   clock sequence and a 48-bit node. A [`Clock`] hands out strictly increasing timestamps, so
//!   UUIDs sharing a clock never collide, even when requested faster than the clock resolution.
//! - Version 3 and version 5 ([`name`]): the MD5 or SHA-1 hash of a namespace UUID followed by a
//!   name. Names are strings, other UUIDs, or caller-defined values through [`DigestInput`].
//! - Version 4 ([`v4`]): 122 random bits. The module also produces SQUUIDs, version 4 UUIDs whose
//!   leading 32 bits hold the Unix time in seconds so that they sort roughly by creation time.
//!
//! All versions share the RFC 4122 variant (`10`) and store their version number in bits 48
//! through 51. See [`bits`] for the layout helpers.
//!
//! # Parsing
//!
//! ```rust
//! use memeid::{Kind, Uuid};
//!
//! let uuid: Uuid = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse()?;
//! assert_eq!(uuid.kind(), Kind::V1);
//!
//! assert!("not a uuid".parse::<Uuid>().is_err());
//! assert_eq!(Uuid::parse_or_nil("not a uuid"), Uuid::NIL);
//! # Ok::<(), memeid::ParseError>(())
//! ```
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: enables the process-wide generators behind [`uuid1`], [`uuid4`] and
//!   [`squuid`], seeded from the operating system.
//!
//! Optional features:
//!
//! - `serde` enables serialization and deserialization of `Uuid` objects.
//! - `uuid` enables conversion to and from the [uuid](https://crates.io/crates/uuid) crate's
//!   `Uuid` type.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod bits;

mod id;
pub use id::{Kind, ParseError, ParseErrorKind, Uuid, Variant};

pub mod clock;
pub use clock::{Clock, ClockSample};

pub mod digest;
pub use digest::{ConfigurationError, DigestInput};

pub mod node;
pub use node::{Node, NodeId};

pub mod v1;

pub mod name;
pub use name::{
    v3_from, v5_from, HashAlgorithm, NAMESPACE_DNS, NAMESPACE_OID, NAMESPACE_URL, NAMESPACE_X500,
};

pub mod v4;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{default_node, squuid, uuid1, uuid4};

pub use fstr::FStr;
