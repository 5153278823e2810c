use std::{fmt, str};

use fstr::FStr;

use crate::bits;

/// Represents a Universally Unique IDentifier.
///
/// The 128-bit value is held as its most significant (`high`) and least significant (`low`)
/// 64-bit halves. Equality, hashing and ordering are defined over the full 128-bit value, and
/// the ordering matches that of the 16-byte big-endian representation.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
pub struct Uuid {
    high: u64,
    low: u64,
}

impl Uuid {
    /// Nil UUID (00000000-0000-0000-0000-000000000000)
    pub const NIL: Self = Self { high: 0, low: 0 };

    /// Max UUID (ffffffff-ffff-ffff-ffff-ffffffffffff)
    pub const MAX: Self = Self {
        high: u64::MAX,
        low: u64::MAX,
    };

    /// Creates a UUID from the most and least significant 64 bits as they are, performing no
    /// validation of the version and variant fields.
    pub const fn from_u64_pair(high: u64, low: u64) -> Self {
        Self { high, low }
    }

    /// Returns the most and least significant 64 bits.
    pub const fn as_u64_pair(&self) -> (u64, u64) {
        (self.high, self.low)
    }

    /// Returns the most significant 64 bits.
    pub const fn high(&self) -> u64 {
        self.high
    }

    /// Returns the least significant 64 bits.
    pub const fn low(&self) -> u64 {
        self.low
    }

    /// Creates a UUID from its 16-byte big-endian representation.
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        bits::from_be_bytes(bytes)
    }

    /// Returns the 16-byte big-endian representation.
    pub const fn to_bytes(&self) -> [u8; 16] {
        bits::to_be_bytes(self)
    }

    /// Returns the version field value, which is `0` for the Nil UUID.
    pub const fn version(&self) -> u8 {
        bits::version(self)
    }

    /// Returns the variant field value.
    pub const fn variant(&self) -> Variant {
        match bits::variant(self) {
            0 => Variant::Ncs,
            2 => Variant::Rfc4122,
            6 => Variant::Microsoft,
            _ => Variant::Future,
        }
    }

    /// Classifies the UUID by its version field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memeid::{Kind, Uuid};
    ///
    /// assert_eq!(Uuid::NIL.kind(), Kind::Nil);
    /// assert_eq!(memeid::v4::from_parts(0, 0).kind(), Kind::V4);
    /// ```
    pub const fn kind(&self) -> Kind {
        if self.is_nil() {
            return Kind::Nil;
        }
        match self.version() {
            1 => Kind::V1,
            2 => Kind::V2,
            3 => Kind::V3,
            4 => Kind::V4,
            5 => Kind::V5,
            _ => Kind::Unknown,
        }
    }

    /// Returns `true` if all 128 bits are zero.
    pub const fn is_nil(&self) -> bool {
        self.high == 0 && self.low == 0
    }

    /// Parses the 8-4-4-4-12 hexadecimal string representation, falling back on the Nil UUID if
    /// the string is malformed.
    ///
    /// Use [`str::parse`] instead to tell a malformed string apart from a literal Nil UUID.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memeid::Uuid;
    ///
    /// assert_eq!(Uuid::parse_or_nil("1-1-1-1-1"), Uuid::NIL);
    /// assert_eq!(
    ///     Uuid::parse_or_nil("886313E1-3B8A-5372-9B90-0C9AEE199E5D").to_string(),
    ///     "886313e1-3b8a-5372-9b90-0c9aee199e5d"
    /// );
    /// ```
    pub fn parse_or_nil(src: &str) -> Self {
        src.parse().unwrap_or(Self::NIL)
    }

    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// string type.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memeid::Uuid;
    ///
    /// let x = "6ba7b810-9dad-11d1-80b4-00c04fd430c8".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// assert_eq!(format!("{}", y), "6ba7b810-9dad-11d1-80b4-00c04fd430c8");
    /// # Ok::<(), memeid::ParseError>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        const DIGITS: &[u8; 16] = b"0123456789abcdef";

        let bytes = self.to_bytes();
        let mut buffer = [0u8; 36];
        let mut j = 0;
        for (i, e) in bytes.iter().enumerate() {
            buffer[j] = DIGITS[(e >> 4) as usize];
            buffer[j + 1] = DIGITS[(e & 15) as usize];
            j += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                buffer[j] = b'-';
                j += 1;
            }
        }

        debug_assert!(buffer.is_ascii());
        // SAFETY: ok because buffer consists of ASCII code points
        unsafe { FStr::from_inner_unchecked(buffer) }
    }
}

/// The variant field, which determines the layout of the rest of the UUID.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[repr(u8)]
pub enum Variant {
    /// `0xx`: reserved for NCS backward compatibility. The Nil UUID reports this variant.
    Ncs = 0,

    /// `10x`: the layout specified by RFC 4122.
    Rfc4122 = 2,

    /// `110`: reserved for Microsoft backward compatibility.
    Microsoft = 6,

    /// `111`: reserved for future definition.
    Future = 7,
}

impl From<Variant> for u8 {
    fn from(src: Variant) -> Self {
        src as u8
    }
}

/// Classification of a UUID derived from its version field.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Kind {
    /// All 128 bits are zero.
    Nil,
    /// Time-based.
    V1,
    /// DCE security. Recognized but never generated.
    V2,
    /// Name-based with MD5.
    V3,
    /// Random.
    V4,
    /// Name-based with SHA-1.
    V5,
    /// Any other version field value.
    Unknown,
}

impl fmt::Display for Uuid {
    /// Returns the 8-4-4-4-12 canonical hexadecimal string representation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl str::FromStr for Uuid {
    type Err = ParseError;

    /// Creates an object from the 8-4-4-4-12 hexadecimal string representation.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        let src = src.as_bytes();
        if src.len() != 36 {
            return Err(ParseError::new(ParseErrorKind::InvalidLength { len: src.len() }));
        }

        let mut dst = [0u8; 16];
        let mut index = 0;
        for (i, e) in dst.iter_mut().enumerate() {
            let hi = decode_hex_digit(src, index)?;
            let lo = decode_hex_digit(src, index + 1)?;
            *e = (hi << 4) | lo;
            index += 2;
            if i == 3 || i == 5 || i == 7 || i == 9 {
                if src[index] != b'-' {
                    return Err(ParseError::new(ParseErrorKind::InvalidGroup { index }));
                }
                index += 1;
            }
        }
        Ok(Self::from_bytes(dst))
    }
}

fn decode_hex_digit(src: &[u8], index: usize) -> Result<u8, ParseError> {
    match src[index] {
        c @ b'0'..=b'9' => Ok(c - b'0'),
        c @ b'a'..=b'f' => Ok(c - b'a' + 10),
        c @ b'A'..=b'F' => Ok(c - b'A' + 10),
        b'-' => Err(ParseError::new(ParseErrorKind::InvalidGroup { index })),
        _ => Err(ParseError::new(ParseErrorKind::InvalidCharacter { index })),
    }
}

impl From<Uuid> for [u8; 16] {
    fn from(src: Uuid) -> Self {
        src.to_bytes()
    }
}

impl From<[u8; 16]> for Uuid {
    fn from(src: [u8; 16]) -> Self {
        Self::from_bytes(src)
    }
}

impl From<Uuid> for u128 {
    fn from(src: Uuid) -> Self {
        ((src.high as u128) << 64) | src.low as u128
    }
}

impl From<u128> for Uuid {
    fn from(src: u128) -> Self {
        Self::from_u64_pair((src >> 64) as u64, src as u64)
    }
}

impl From<Uuid> for String {
    fn from(src: Uuid) -> Self {
        src.to_string()
    }
}

impl TryFrom<String> for Uuid {
    type Error = ParseError;

    fn try_from(src: String) -> Result<Self, Self::Error> {
        src.parse()
    }
}

impl TryFrom<&str> for Uuid {
    type Error = ParseError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        src.parse()
    }
}

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ParseError {
    kind: ParseErrorKind,
}

/// Reason a string failed to parse as a UUID.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// The string is not 36 bytes long.
    InvalidLength {
        /// Length of the input in bytes.
        len: usize,
    },

    /// A byte that should be a hexadecimal digit is not one.
    InvalidCharacter {
        /// Byte offset of the offending character.
        index: usize,
    },

    /// A hyphen is missing or misplaced.
    InvalidGroup {
        /// Byte offset where the group structure breaks.
        index: usize,
    },
}

impl ParseError {
    const fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the reason for the failure.
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid string representation: ")?;
        match self.kind {
            ParseErrorKind::InvalidLength { len } => {
                write!(f, "expected 36 characters, found {}", len)
            }
            ParseErrorKind::InvalidCharacter { index } => {
                write!(f, "invalid hexadecimal digit at {}", index)
            }
            ParseErrorKind::InvalidGroup { index } => {
                write!(f, "expected 8-4-4-4-12 groups, broken at {}", index)
            }
        }
    }
}

impl std::error::Error for ParseError {}

#[cfg(feature = "uuid")]
#[cfg_attr(docsrs, doc(cfg(feature = "uuid")))]
mod uuid_support {
    use super::Uuid;

    impl From<Uuid> for uuid::Uuid {
        fn from(src: Uuid) -> Self {
            uuid::Uuid::from_u64_pair(src.high, src.low)
        }
    }

    impl From<uuid::Uuid> for Uuid {
        fn from(src: uuid::Uuid) -> Self {
            let (high, low) = src.as_u64_pair();
            Self::from_u64_pair(high, low)
        }
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_support {
    use super::{fmt, Uuid};
    use serde::{de, Deserializer, Serializer};

    impl serde::Serialize for Uuid {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&self.encode())
            } else {
                serializer.serialize_bytes(&self.to_bytes())
            }
        }
    }

    impl<'de> serde::Deserialize<'de> for Uuid {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            if deserializer.is_human_readable() {
                deserializer.deserialize_str(VisitorImpl)
            } else {
                deserializer.deserialize_bytes(VisitorImpl)
            }
        }
    }

    struct VisitorImpl;

    impl<'de> de::Visitor<'de> for VisitorImpl {
        type Value = Uuid;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(formatter, "a UUID representation")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse::<Self::Value>().map_err(de::Error::custom)
        }

        fn visit_bytes<E: de::Error>(self, value: &[u8]) -> Result<Self::Value, E> {
            <[u8; 16]>::try_from(value)
                .map(Self::Value::from)
                .map_err(de::Error::custom)
        }
    }

}
