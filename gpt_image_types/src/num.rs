// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use bytemuck::{Pod, Zeroable};
use core::fmt::{self, Debug, Display, Formatter, LowerHex};

macro_rules! le_int {
    ($name:ident, $prim:ident, $len:literal, $to:ident, $from:ident) => {
        #[doc = concat!(
            stringify!($len),
            "-byte unsigned integer stored little-endian."
        )]
        #[derive(
            Clone,
            Copy,
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
        pub struct $name(pub [u8; $len]);

        impl $name {
            #[doc = concat!(
                "Convert to [`",
                stringify!($prim),
                "`] with the host's endianness."
            )]
            #[must_use]
            pub const fn $to(self) -> $prim {
                $prim::from_le_bytes(self.0)
            }

            #[doc = concat!(
                "Create from a [`",
                stringify!($prim),
                "`] with the host's endianness."
            )]
            #[must_use]
            pub const fn $from(v: $prim) -> Self {
                Self(v.to_le_bytes())
            }

            #[doc = concat!(
                "Update the value to a [`",
                stringify!($prim),
                "`] with the host's endianness."
            )]
            pub fn set(&mut self, v: $prim) {
                *self = Self::$from(v);
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Debug::fmt(&self.$to(), f)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                Display::fmt(&self.$to(), f)
            }
        }

        impl LowerHex for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                format_u8_slice_lower_hex_le(f, &self.0)
            }
        }
    };
}

le_int!(U32Le, u32, 4, to_u32, from_u32);
le_int!(U64Le, u64, 8, to_u64, from_u64);

pub(crate) fn format_u8_slice_lower_hex_le(
    f: &mut Formatter<'_>,
    s: &[u8],
) -> fmt::Result {
    if f.alternate() {
        f.write_str("0x")?;
    }
    for byte in s.iter().rev() {
        write!(f, "{byte:02x}")?;
    }
    Ok(())
}
