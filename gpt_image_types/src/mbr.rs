// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::num::format_u8_slice_lower_hex_le;
use crate::U32Le;
use bytemuck::{Pod, Zeroable};
use core::fmt::{self, Display, Formatter};
use core::mem;

/// Legacy MBR cylinder/head/sector.
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
pub struct Chs(pub [u8; 3]);

impl Chs {
    /// Get the 10 cylinder bits as a [`u16`].
    #[must_use]
    pub fn cylinder(self) -> u16 {
        let h = self.0[1] & 0b1100_0000;
        let l = self.0[2];
        (u16::from(h) << 2) | u16::from(l)
    }

    /// Get the 8 head bits as a [`u8`].
    #[must_use]
    pub fn head(self) -> u8 {
        self.0[0]
    }

    /// Get the 6 sector bits as a [`u8`].
    #[must_use]
    pub fn sector(self) -> u8 {
        self.0[1] & 0b0011_1111
    }

    /// Get a tuple of `(cylinder, head, sector)`.
    #[must_use]
    pub fn as_tuple(self) -> (u16, u8, u8) {
        (self.cylinder(), self.head(), self.sector())
    }
}

impl Display for Chs {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CHS={}/{}/{}",
            self.cylinder(),
            self.head(),
            self.sector()
        )
    }
}

/// Legacy MBR partition record.
///
/// See Table 5-2 "Legacy MBR Partition Record" in the UEFI Specification.
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
#[repr(C)]
pub struct MbrPartitionRecord {
    /// A value of `0x80` indicates this is a legacy bootable
    /// partition. Any other value indicates it is not bootable. UEFI
    /// firmware does not use this field's value.
    pub boot_indicator: u8,

    /// Start of the partition. UEFI firmware does not use this field's
    /// value.
    pub start_chs: Chs,

    /// Type of partition. A value of `0xee` is used in a protective MBR
    /// to define a fake partition covering the entire disk.
    ///
    /// See section 5.2.2 "OS Types" in the UEFI Specification.
    pub os_type: u8,

    /// End of the partition. UEFI firmware does not use this field's
    /// value.
    pub end_chs: Chs,

    /// Starting LBA of the partition.
    pub starting_lba: U32Le,

    /// Size of the partition in logical blocks.
    pub size_in_lba: U32Le,
}

impl Display for MbrPartitionRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("MbrPartitionRecord { ")?;
        write!(f, "boot_indicator: {:#x}", self.boot_indicator)?;
        write!(f, ", start_chs: {}", self.start_chs)?;
        write!(f, ", os_type: {:#x}", self.os_type)?;
        write!(f, ", end_chs: {}", self.end_chs)?;
        write!(f, ", starting_lba: {}", self.starting_lba)?;
        write!(f, ", size_in_lba: {}", self.size_in_lba)?;
        f.write_str(" }")
    }
}

/// Legacy master boot record.
///
/// See Table 5-1 "Legacy MBR" in the UEFI Specification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(C)]
pub struct MasterBootRecord {
    /// Executable code used on non-UEFI systems to select a partition
    /// and load the first logical block of that partition. Always zero
    /// in the records this library produces.
    pub boot_strap_code: [u8; 440],

    /// Unique identifier for the disk. This value is not used by UEFI
    /// firmware.
    pub unique_mbr_disk_signature: [u8; 4],

    /// Reserved field that is not used by UEFI firmware.
    pub unknown: [u8; 2],

    /// Four legacy MBR partitions.
    pub partitions: [MbrPartitionRecord; 4],

    /// MBR signature, set to `0xaa55`.
    pub signature: [u8; 2],
}

// Manual implementations needed because of the large boot_strap_code
// array field.
#[allow(unsafe_code)]
unsafe impl Pod for MasterBootRecord {}
#[allow(unsafe_code)]
unsafe impl Zeroable for MasterBootRecord {}

impl Default for MasterBootRecord {
    fn default() -> Self {
        Self {
            boot_strap_code: [0; 440],
            unique_mbr_disk_signature: [0; 4],
            unknown: [0; 2],
            partitions: [MbrPartitionRecord::default(); 4],
            signature: [0; 2],
        }
    }
}

impl MasterBootRecord {
    /// Return whether the [`boot_strap_code`] field is all zeros or not.
    ///
    /// [`boot_strap_code`]: Self::boot_strap_code
    #[must_use]
    pub fn is_boot_strap_code_zero(&self) -> bool {
        self.boot_strap_code.iter().all(|b| *b == 0)
    }

    /// Create a protective MBR for a disk of `num_blocks` blocks.
    ///
    /// A single partition record spans the disk: it starts at LBA 1 and
    /// covers `num_blocks - 1` blocks, or `0x0fff_ffff` blocks when
    /// that count does not fit in the 32-bit field. (Deliberately
    /// capped at 28 bits rather than the UEFI Specification's
    /// `0xffff_ffff`.)
    ///
    /// `num_blocks` must be at least 1.
    ///
    /// See section 5.2.3 "Protective MBR" of the UEFI Specification.
    #[must_use]
    pub fn protective_mbr(num_blocks: u64) -> Self {
        let size_in_lba =
            u32::try_from(num_blocks - 1).unwrap_or(0x0fff_ffff);

        Self {
            partitions: [
                MbrPartitionRecord {
                    boot_indicator: 0,
                    // CHS=0,0,2
                    start_chs: Chs([0x00, 0x02, 0x00]),
                    os_type: 0xee,
                    // TODO: derive the ending CHS from the disk
                    // geometry instead of pinning the all-ones value.
                    end_chs: Chs([0xff, 0xff, 0xff]),
                    starting_lba: U32Le::from_u32(1),
                    size_in_lba: U32Le::from_u32(size_in_lba),
                },
                MbrPartitionRecord::default(),
                MbrPartitionRecord::default(),
                MbrPartitionRecord::default(),
            ],
            signature: [0x55, 0xaa],
            ..Self::default()
        }
    }
}

impl Display for MasterBootRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("MasterBootRecord { boot_strap_code: ")?;

        if self.is_boot_strap_code_zero() {
            write!(f, "[0; {}]", self.boot_strap_code.len())?;
        } else {
            f.write_str("<non-zero>")?;
        }

        f.write_str(", unique_mbr_disk_signature: 0x")?;
        format_u8_slice_lower_hex_le(f, &self.unique_mbr_disk_signature)?;

        f.write_str(", partitions: [")?;
        for (i, partition) in self.partitions.iter().enumerate() {
            if i != 0 {
                f.write_str(", ")?;
            }
            partition.fmt(f)?;
        }

        f.write_str("], signature: 0x")?;
        format_u8_slice_lower_hex_le(f, &self.signature)?;

        f.write_str(" }")
    }
}

const _: () = assert!(mem::size_of::<MbrPartitionRecord>() == 16);
const _: () = assert!(mem::size_of::<MasterBootRecord>() == 512);
