// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::U32Le;
use bytemuck::{Pod, Zeroable};
use core::fmt::{self, Display, Formatter, LowerHex};

/// 32-bit CRC (cyclic redundancy check), stored little-endian as it
/// appears in GPT structures.
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
pub struct Crc32(pub U32Le);

impl Crc32 {
    /// CRC32 algorithm used for GPT: [`crc::CRC_32_ISO_HDLC`]
    ///
    /// # Notes
    ///
    /// The UEFI Specification is somewhat vague about the CRC algorithm
    /// used. Section 4.2 EFI Table Header says: "Unless otherwise
    /// specified, UEFI uses a standard CCITT32 CRC algorithm with a
    /// seed polynomial value of 0x04c11db7 for its CRC calculations."
    /// Of the catalogued algorithms using that polynomial,
    /// CRC-32/ISO-HDLC is the reflected variant (processing each byte
    /// least-significant-bit first, initial accumulator `0xffff_ffff`,
    /// inverted output) that GPT tooling agrees on in practice. Its
    /// check vector is `crc32(b"123456789") == 0xcbf43926`.
    pub const ALGORITHM: crc::Algorithm<u32> = crc::CRC_32_ISO_HDLC;

    /// Compute the CRC32 of `bytes`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gpt_image_types::Crc32;
    ///
    /// assert_eq!(Crc32::of(b"123456789").to_u32(), 0xcbf43926);
    /// ```
    #[must_use]
    pub fn of(bytes: &[u8]) -> Self {
        let crc = crc::Crc::<u32>::new(&Self::ALGORITHM);
        let mut digest = crc.digest();
        digest.update(bytes);
        Self(U32Le(digest.finalize().to_le_bytes()))
    }

    /// Convert to [`u32`] with the host's endianness.
    #[must_use]
    pub const fn to_u32(self) -> u32 {
        self.0.to_u32()
    }
}

impl Display for Crc32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl LowerHex for Crc32 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        LowerHex::fmt(&self.0, f)
    }
}
