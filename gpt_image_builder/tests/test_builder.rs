// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use common::{create_descriptor, create_partition_entry, u32_at, u64_at};
use gpt_image_builder::{make_gpt, validate, GptDescriptor, InvalidDescriptor};
use gpt_image_types::{Crc32, Lba, LbaLe};

/// Build a descriptor whose single partition covers `starting..=ending`.
fn descriptor_with_range(starting: u64, ending: u64) -> GptDescriptor {
    let mut descriptor = create_descriptor();
    descriptor.partitions[0].starting_lba = LbaLe::from_u64(starting);
    descriptor.partitions[0].ending_lba = LbaLe::from_u64(ending);
    descriptor
}

#[test]
fn test_validate_layout() {
    let layout = validate(&create_descriptor()).unwrap();
    assert_eq!(layout.partition_entry_blocks(), 1);
    assert_eq!(layout.first_usable_lba(), Lba(3));
    assert_eq!(layout.last_usable_lba(), Lba(2045));
}

#[test]
fn test_blob_sizes() {
    // One entry block: header is MBR + header + entries, footer is
    // entries + header.
    let data = make_gpt(&create_descriptor()).unwrap();
    assert_eq!(data.header.len(), 3 * 512);
    assert_eq!(data.footer.len(), 2 * 512);

    // Five entries need two entry blocks.
    let mut descriptor = create_descriptor();
    descriptor.partitions = (0..5)
        .map(|i| {
            let mut entry = create_partition_entry();
            entry.starting_lba = LbaLe::from_u64(34 + i * 100);
            entry.ending_lba = LbaLe::from_u64(34 + i * 100 + 99);
            entry
        })
        .collect();
    let data = make_gpt(&descriptor).unwrap();
    assert_eq!(data.header.len(), 4 * 512);
    assert_eq!(data.footer.len(), 3 * 512);
}

#[test]
fn test_protective_mbr_in_header() {
    let data = make_gpt(&create_descriptor()).unwrap();
    let header = &data.header;

    assert!(header[..446].iter().all(|b| *b == 0));
    assert_eq!(header[446], 0);
    assert_eq!(header[447..450], [0x00, 0x02, 0x00]);
    assert_eq!(header[450], 0xee);
    assert_eq!(header[451..454], [0xff, 0xff, 0xff]);
    assert_eq!(u32_at(header, 454), 1);
    assert_eq!(u32_at(header, 458), 2047);
    assert_eq!(header[510], 0x55);
    assert_eq!(header[511], 0xaa);
}

#[test]
fn test_primary_header_fields() {
    let data = make_gpt(&create_descriptor()).unwrap();
    let header = &data.header;

    assert_eq!(&header[512..520], b"EFI PART");
    assert_eq!(u32_at(header, 512 + 8), 0x0001_0000); // revision
    assert_eq!(u32_at(header, 512 + 12), 92); // header_size
    assert_eq!(u32_at(header, 512 + 20), 0); // reserved
    assert_eq!(u64_at(header, 512 + 24), 1); // my_lba
    assert_eq!(u64_at(header, 512 + 32), 2047); // alternate_lba
    assert_eq!(u64_at(header, 512 + 40), 3); // first_usable_lba
    assert_eq!(u64_at(header, 512 + 48), 2045); // last_usable_lba
    assert_eq!(
        header[512 + 56..512 + 72],
        create_descriptor().disk_guid.to_bytes()
    );
    assert_eq!(u64_at(header, 512 + 72), 2); // partition_entry_lba
    assert_eq!(u32_at(header, 512 + 80), 1); // number_of_partition_entries
    assert_eq!(u32_at(header, 512 + 84), 128); // size_of_partition_entry

    // The rest of the header block is zero.
    assert!(header[512 + 92..1024].iter().all(|b| *b == 0));
}

#[test]
fn test_backup_header_fields() {
    let data = make_gpt(&create_descriptor()).unwrap();
    let backup = &data.footer[512..];

    assert_eq!(&backup[..8], b"EFI PART");
    assert_eq!(u64_at(backup, 24), 2047); // my_lba
    assert_eq!(u64_at(backup, 32), 1); // alternate_lba
    assert_eq!(u64_at(backup, 40), 3); // first_usable_lba
    assert_eq!(u64_at(backup, 48), 2045); // last_usable_lba
    assert_eq!(u64_at(backup, 72), 2046); // partition_entry_lba
    assert_eq!(u32_at(backup, 80), 1);
    assert_eq!(u32_at(backup, 84), 128);

    assert!(backup[92..].iter().all(|b| *b == 0));
}

/// Both headers store a CRC over their own 92 bytes with the checksum
/// field zeroed.
#[test]
fn test_header_crc_round_trip() {
    let data = make_gpt(&create_descriptor()).unwrap();

    for header_bytes in
        [&data.header[512..512 + 92], &data.footer[512..512 + 92]]
    {
        let stored = u32_at(header_bytes, 16);
        let mut copy = header_bytes.to_vec();
        copy[16..20].fill(0);
        assert_eq!(Crc32::of(&copy).to_u32(), stored);
    }

    // The two headers differ, so their checksums should too.
    assert_ne!(
        u32_at(&data.header, 512 + 16),
        u32_at(&data.footer, 512 + 16)
    );
}

/// Both headers carry the CRC of the 128·N entry-array bytes.
#[test]
fn test_entry_array_crc() {
    let data = make_gpt(&create_descriptor()).unwrap();

    let entry_array = &data.header[1024..1024 + 128];
    let crc = Crc32::of(entry_array).to_u32();
    assert_eq!(u32_at(&data.header, 512 + 88), crc);
    assert_eq!(u32_at(&data.footer, 512 + 88), crc);
}

/// The backup entry array is byte-identical to the primary one.
#[test]
fn test_backup_entry_array_matches_primary() {
    let data = make_gpt(&create_descriptor()).unwrap();
    assert_eq!(data.header[1024..1024 + 128], data.footer[..128]);

    // Padding after the entries is zero in both blobs.
    assert!(data.header[1024 + 128..].iter().all(|b| *b == 0));
    assert!(data.footer[128..512].iter().all(|b| *b == 0));
}

#[test]
fn test_determinism() {
    let descriptor = create_descriptor();
    assert_eq!(make_gpt(&descriptor).unwrap(), make_gpt(&descriptor).unwrap());
}

#[test]
fn test_large_block_size() {
    let mut descriptor = create_descriptor();
    descriptor.block_size = 4096;
    let data = make_gpt(&descriptor).unwrap();

    assert_eq!(data.header.len(), 3 * 4096);
    assert_eq!(data.footer.len(), 2 * 4096);
    // The MBR still occupies only the first 512 bytes of block 0.
    assert_eq!(data.header[510], 0x55);
    assert_eq!(data.header[511], 0xaa);
    assert!(data.header[512..4096].iter().all(|b| *b == 0));
    assert_eq!(&data.header[4096..4104], b"EFI PART");
    assert_eq!(&data.header[8192..8208], &create_partition_entry().partition_type_guid.0.to_bytes());
}

/// A disk beyond 2³² blocks caps the protective MBR's size field.
#[test]
fn test_huge_disk_caps_mbr_size() {
    let mut descriptor = create_descriptor();
    descriptor.number_of_blocks = 1 << 33;
    let data = make_gpt(&descriptor).unwrap();

    assert_eq!(u32_at(&data.header, 458), 0x0fff_ffff);
    assert_eq!(u64_at(&data.header, 512 + 32), (1 << 33) - 1);
}

#[test]
fn test_invalid_block_size() {
    for block_size in [0, 511, 513, 1000] {
        let mut descriptor = create_descriptor();
        descriptor.block_size = block_size;
        assert_eq!(
            make_gpt(&descriptor).unwrap_err(),
            InvalidDescriptor::BlockSize(block_size)
        );
    }
}

#[test]
fn test_empty_partition_list() {
    let mut descriptor = create_descriptor();
    descriptor.partitions.clear();
    assert_eq!(
        make_gpt(&descriptor).unwrap_err(),
        InvalidDescriptor::NoPartitions
    );
}

#[test]
fn test_too_few_blocks() {
    // One entry block: the minimum viable disk is 6 blocks.
    let mut descriptor = descriptor_with_range(3, 3);
    descriptor.number_of_blocks = 5;
    assert_eq!(
        make_gpt(&descriptor).unwrap_err(),
        InvalidDescriptor::TooFewBlocks {
            actual: 5,
            required: 6
        }
    );

    descriptor.number_of_blocks = 6;
    let data = make_gpt(&descriptor).unwrap();
    assert_eq!(data.header.len(), 3 * 512);
}

#[test]
fn test_partition_bounds() {
    // Exactly filling the usable region is accepted.
    assert!(make_gpt(&descriptor_with_range(3, 2045)).is_ok());

    assert_eq!(
        make_gpt(&descriptor_with_range(2, 2045)).unwrap_err(),
        InvalidDescriptor::StartBeforeUsable {
            index: 0,
            starting: Lba(2),
            first_usable: Lba(3)
        }
    );
    assert_eq!(
        make_gpt(&descriptor_with_range(3, 2046)).unwrap_err(),
        InvalidDescriptor::EndAfterUsable {
            index: 0,
            ending: Lba(2046),
            last_usable: Lba(2045)
        }
    );
}

#[test]
fn test_start_after_end() {
    assert_eq!(
        make_gpt(&descriptor_with_range(200, 100)).unwrap_err(),
        InvalidDescriptor::StartAfterEnd {
            index: 0,
            starting: Lba(200),
            ending: Lba(100)
        }
    );
}

#[test]
fn test_overlap_rejected() {
    let mut descriptor = descriptor_with_range(100, 200);
    let mut second = create_partition_entry();
    second.starting_lba = LbaLe::from_u64(150);
    second.ending_lba = LbaLe::from_u64(250);
    descriptor.partitions.push(second);

    assert_eq!(
        make_gpt(&descriptor).unwrap_err(),
        InvalidDescriptor::Overlap {
            first: 0,
            second: 1
        }
    );
}

/// The overlap check only tests an earlier partition's endpoints
/// against later ranges, so a later partition strictly inside an
/// earlier one slips through, while the mirrored order is caught.
#[test]
fn test_overlap_check_is_asymmetric() {
    let nested = |outer: (u64, u64), inner: (u64, u64)| {
        let mut descriptor = descriptor_with_range(outer.0, outer.1);
        let mut second = create_partition_entry();
        second.starting_lba = LbaLe::from_u64(inner.0);
        second.ending_lba = LbaLe::from_u64(inner.1);
        descriptor.partitions.push(second);
        make_gpt(&descriptor)
    };

    // Outer first: neither endpoint of [100, 200] is inside [120, 130].
    assert!(nested((100, 200), (120, 130)).is_ok());

    // Inner first: both endpoints of [120, 130] are inside [100, 200].
    let mut descriptor = descriptor_with_range(120, 130);
    let mut second = create_partition_entry();
    second.starting_lba = LbaLe::from_u64(100);
    second.ending_lba = LbaLe::from_u64(200);
    descriptor.partitions.push(second);
    assert_eq!(
        make_gpt(&descriptor).unwrap_err(),
        InvalidDescriptor::Overlap {
            first: 0,
            second: 1
        }
    );
}

#[test]
fn test_error_messages_name_the_rule() {
    assert_eq!(
        InvalidDescriptor::BlockSize(511).to_string(),
        "block size 511 is not a non-zero multiple of 512"
    );
    assert_eq!(
        InvalidDescriptor::Overlap {
            first: 0,
            second: 1
        }
        .to_string(),
        "partitions 0 and 1 overlap"
    );
    assert_eq!(
        InvalidDescriptor::TooFewBlocks {
            actual: 5,
            required: 6
        }
        .to_string(),
        "disk of 5 blocks is too small for the layout (minimum 6 blocks)"
    );
}
