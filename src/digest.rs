//! Byte representations of name-based UUID inputs
//!
//! Name-based UUIDs hash a namespace followed by a name. Both are turned into bytes through
//! [`DigestInput`], which covers text, other UUIDs, and any caller-defined type that comes with
//! its own serialization function.
//!
//! ```rust
//! use memeid::{name, DigestInput, HashAlgorithm, Uuid};
//!
//! struct Person {
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! let person = Person {
//!     first_name: "Federico".into(),
//!     last_name: "García Lorca".into(),
//! };
//!
//! let input = DigestInput::custom(person, |p| {
//!     [p.first_name.as_bytes(), p.last_name.as_bytes()].concat()
//! });
//! let uuid = name::from(&Uuid::NIL, input, HashAlgorithm::Sha1);
//! assert_eq!(uuid.to_string(), "8bad138b-ef9e-5029-a607-eccab121d564");
//! ```

use std::{borrow::Cow, fmt};

use crate::Uuid;

/// An input to name-based UUID generation, consumed once to produce the bytes to hash.
pub enum DigestInput<'a> {
    /// UTF-8 text, digested byte-for-byte.
    Str(&'a str),

    /// A UUID, digested as its 16-byte big-endian form.
    Uuid(Uuid),

    /// A caller-defined value bound to its serialization function.
    Custom(Box<dyn FnOnce() -> Vec<u8> + 'a>),
}

impl<'a> DigestInput<'a> {
    /// Binds a caller-defined value to the function that serializes it.
    ///
    /// The bytes returned by `to_bytes` are forwarded to the hash function as they are.
    pub fn custom<T, F>(value: T, to_bytes: F) -> Self
    where
        T: 'a,
        F: FnOnce(&T) -> Vec<u8> + 'a,
    {
        Self::Custom(Box::new(move || to_bytes(&value)))
    }

    /// Same as [`DigestInput::custom`], but for call sites where the serialization function is
    /// optional.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if `to_bytes` is `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use memeid::DigestInput;
    ///
    /// let to_bytes: Option<fn(&u32) -> Vec<u8>> = None;
    /// assert!(DigestInput::try_custom(42u32, to_bytes).is_err());
    ///
    /// let to_bytes = Some(|x: &u32| x.to_be_bytes().to_vec());
    /// assert_eq!(&*DigestInput::try_custom(42u32, to_bytes)?.digest(), &[0, 0, 0, 42]);
    /// # Ok::<(), memeid::ConfigurationError>(())
    /// ```
    pub fn try_custom<T, F>(value: T, to_bytes: Option<F>) -> Result<Self, ConfigurationError>
    where
        T: 'a,
        F: FnOnce(&T) -> Vec<u8> + 'a,
    {
        match to_bytes {
            Some(f) => Ok(Self::custom(value, f)),
            None => Err(ConfigurationError {}),
        }
    }

    /// Consumes the input and returns its byte representation.
    pub fn digest(self) -> Cow<'a, [u8]> {
        match self {
            Self::Str(s) => Cow::Borrowed(s.as_bytes()),
            Self::Uuid(u) => Cow::Owned(u.to_bytes().to_vec()),
            Self::Custom(f) => Cow::Owned(f()),
        }
    }
}

impl fmt::Debug for DigestInput<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Uuid(u) => f.debug_tuple("Uuid").field(u).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl<'a> From<&'a str> for DigestInput<'a> {
    fn from(src: &'a str) -> Self {
        Self::Str(src)
    }
}

impl<'a> From<&'a String> for DigestInput<'a> {
    fn from(src: &'a String) -> Self {
        Self::Str(src)
    }
}

impl From<Uuid> for DigestInput<'_> {
    fn from(src: Uuid) -> Self {
        Self::Uuid(src)
    }
}

impl From<&Uuid> for DigestInput<'_> {
    fn from(src: &Uuid) -> Self {
        Self::Uuid(*src)
    }
}

/// Error building a custom digest input without a serialization function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConfigurationError {}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "custom digest input requires a serialization function")
    }
}

impl std::error::Error for ConfigurationError {}
