// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bytemuck::{Pod, Zeroable};
use core::fmt::{self, Display, Formatter};
use core::mem;
use core::str::FromStr;

#[cfg(feature = "serde")]
use {
    core::str,
    serde::de::{self, Visitor},
    serde::{Deserialize, Deserializer, Serialize, Serializer},
};

/// Globally-unique identifier: 16 opaque bytes.
///
/// The textual form is `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`, where
/// each pair of hex digits maps to one byte in the order written. No
/// field-level byte swapping is performed in either direction, so the
/// stored bytes always match a left-to-right reading of the string.
///
/// # Examples
///
/// Construct a GUID at compile time with the [`guid!`] macro:
///
/// ```
/// use gpt_image_types::guid;
///
/// let guid = guid!("01234567-89ab-cdef-0123-456789abcdef");
/// assert_eq!(guid.to_string(), "01234567-89ab-cdef-0123-456789abcdef");
/// assert_eq!(
///     guid.to_bytes(),
///     [
///         0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef, 0x01, 0x23,
///         0x45, 0x67, 0x89, 0xab, 0xcd, 0xef
///     ]
/// );
/// ```
///
/// Parse one at runtime:
///
/// ```
/// use gpt_image_types::Guid;
///
/// let guid: Guid = "01234567-89ab-cdef-0123-456789abcdef".parse().unwrap();
/// ```
///
/// [`guid!`]: crate::guid!
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Pod,
    Zeroable,
)]
#[repr(transparent)]
pub struct Guid(pub [u8; 16]);

/// Byte offsets of the sixteen hex pairs within the 36-byte string form.
const HEX_PAIR_OFFSETS: [usize; 16] = [
    0, 2, 4, 6, 9, 11, 14, 16, 19, 21, 24, 26, 28, 30, 32, 34,
];

/// Byte offsets of the four separators within the 36-byte string form.
const SEPARATOR_OFFSETS: [usize; 4] = [8, 13, 18, 23];

impl Guid {
    /// GUID with all bytes set to zero.
    pub const ZERO: Self = Self([0; 16]);

    /// Create a GUID from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes of the GUID.
    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Parse a GUID from the dashed-hex string form. This is functionally
    /// the same as [`Self::from_str`], but is a `const` function.
    #[allow(clippy::as_conversions)] // `?` and `From` are not const.
    pub const fn try_parse(s: &str) -> Result<Self, GuidFromStrError> {
        let s = s.as_bytes();
        if s.len() != 36 {
            return Err(GuidFromStrError::Length);
        }

        let mut i = 0;
        while i < SEPARATOR_OFFSETS.len() {
            let offset = SEPARATOR_OFFSETS[i];
            if s[offset] != b'-' {
                return Err(GuidFromStrError::Separator(offset as u8));
            }
            i += 1;
        }

        let mut bytes = [0; 16];
        let mut i = 0;
        while i < HEX_PAIR_OFFSETS.len() {
            let offset = HEX_PAIR_OFFSETS[i];
            match parse_byte_from_ascii_char_pair(s[offset], s[offset + 1]) {
                Some(byte) => bytes[i] = byte,
                None => return Err(GuidFromStrError::Hex(offset as u8)),
            }
            i += 1;
        }

        Ok(Self(bytes))
    }

    /// The string form as lowercase ASCII.
    #[must_use]
    pub fn to_ascii_hex_lower(self) -> [u8; 36] {
        const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

        let mut ascii = [b'-'; 36];
        for (src, offset) in self.0.iter().zip(HEX_PAIR_OFFSETS) {
            ascii[offset] = HEX_CHARS[usize::from(src >> 4)];
            ascii[offset + 1] = HEX_CHARS[usize::from(src & 0xf)];
        }
        ascii
    }
}

impl Display for Guid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i == 4 || i == 6 || i == 8 || i == 10 {
                f.write_str("-")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for Guid {
    type Err = GuidFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse(s)
    }
}

/// Parse a hexadecimal ASCII character as a `u8`.
const fn parse_byte_from_ascii_char(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Parse a pair of hexadecimal ASCII characters as a `u8`. For example,
/// `(b'1', b'a')` is parsed as `0x1a`.
const fn parse_byte_from_ascii_char_pair(a: u8, b: u8) -> Option<u8> {
    let a = if let Some(a) = parse_byte_from_ascii_char(a) {
        a
    } else {
        return None;
    };

    let b = if let Some(b) = parse_byte_from_ascii_char(b) {
        b
    } else {
        return None;
    };

    Some(a << 4 | b)
}

/// Error type for [`Guid::try_parse`] and [`Guid::from_str`].
///
/// [`Guid::from_str`]: core::str::FromStr::from_str
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum GuidFromStrError {
    /// Input has the wrong length, expected 36 bytes.
    Length,

    /// Input is missing a separator (`-`) at this byte index.
    Separator(u8),

    /// Input contains invalid ASCII hex at this byte index.
    Hex(u8),
}

impl Default for GuidFromStrError {
    fn default() -> Self {
        Self::Length
    }
}

impl Display for GuidFromStrError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => {
                f.write_str("GUID string has wrong length (expected 36 bytes)")
            }
            Self::Separator(index) => write!(
                f,
                "GUID string is missing a separator (`-`) at index {index}",
            ),
            Self::Hex(index) => {
                write!(
                    f,
                    "GUID string contains invalid ASCII hex at index {index}",
                )
            }
        }
    }
}

impl core::error::Error for GuidFromStrError {}

/// Create a [`Guid`] from a string at compile time.
///
/// # Examples
///
/// ```
/// use gpt_image_types::{guid, Guid};
///
/// const EXAMPLE: Guid = guid!("01234567-89ab-cdef-0123-456789abcdef");
/// ```
#[macro_export]
macro_rules! guid {
    ($s:literal) => {
        match $crate::Guid::try_parse($s) {
            Ok(g) => g,
            Err(_) => panic!("invalid GUID string"),
        }
    };
}

const _: () = assert!(mem::size_of::<Guid>() == 16);

#[cfg(feature = "serde")]
impl Serialize for Guid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let ascii = self.to_ascii_hex_lower();
        // OK to unwrap since the ascii output is valid utf-8.
        let s = str::from_utf8(&ascii).unwrap();
        serializer.serialize_str(s)
    }
}

#[cfg(feature = "serde")]
struct GuidDeserializeVisitor;

#[cfg(feature = "serde")]
impl Visitor<'_> for GuidDeserializeVisitor {
    type Value = Guid;

    fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
        formatter.write_str(
            "a string in the format \"xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx\"",
        )
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Guid::try_parse(value).map_err(E::custom)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Guid {
    fn deserialize<D>(deserializer: D) -> Result<Guid, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(GuidDeserializeVisitor)
    }
}
