// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use bytemuck::bytes_of;
use common::check_derives;
use gpt_image_types::{
    guid, Crc32, GptHeader, GptHeaderRevision, GptHeaderSignature, LbaLe,
    U32Le,
};

fn create_header() -> GptHeader {
    GptHeader {
        my_lba: LbaLe::from_u64(1),
        alternate_lba: LbaLe::from_u64(8191),
        first_usable_lba: LbaLe::from_u64(34),
        last_usable_lba: LbaLe::from_u64(8158),
        disk_guid: guid!("57a7feb6-8cd5-4922-b7bd-c78b0914e870"),
        partition_entry_lba: LbaLe::from_u64(2),
        number_of_partition_entries: U32Le::from_u32(128),
        ..Default::default()
    }
}

#[test]
fn test_signature() {
    check_derives::<GptHeaderSignature>();

    assert_eq!(
        GptHeaderSignature::EFI_COMPATIBLE_PARTITION_TABLE_HEADER.to_u64(),
        0x5452415020494645
    );
    assert_eq!(
        GptHeaderSignature::default().to_string(),
        "Signature(\"EFI PART\")"
    );
}

#[test]
fn test_revision() {
    check_derives::<GptHeaderRevision>();
    assert_eq!(GptHeaderRevision::VERSION_1_0.0.to_u32(), 0x00010000);
    assert_eq!(GptHeaderRevision::VERSION_1_0.major(), 1);
    assert_eq!(GptHeaderRevision::VERSION_1_0.minor(), 0);

    let rev = GptHeaderRevision(U32Le::from_u32(0x1234_5678));
    assert_eq!(rev.major(), 0x1234);
    assert_eq!(rev.minor(), 0x5678);
}

#[test]
fn test_header_default() {
    check_derives::<GptHeader>();

    let header = GptHeader::default();
    assert!(header.is_signature_valid());
    assert_eq!(header.header_size.to_u32(), 92);
    assert_eq!(header.size_of_partition_entry.to_u32(), 128);
    assert_eq!(header.reserved.to_u32(), 0);
}

#[test]
fn test_header_signature_validity() {
    let mut header = create_header();
    assert!(header.is_signature_valid());

    header.signature.0 .0[0] = 0xef;
    assert!(!header.is_signature_valid());
    assert!(header
        .to_string()
        .starts_with("GptHeader { signature: Signature(Invalid: 0x54524150204946ef),"));
}

/// The stored CRC must match a CRC over the serialized header with the
/// checksum field itself zeroed.
#[test]
fn test_header_crc32_round_trip() {
    let mut header = create_header();
    assert_eq!(header.header_crc32, Crc32::default());

    header.update_header_crc32();
    assert_ne!(header.header_crc32, Crc32::default());
    assert_eq!(header.calculate_header_crc32(), header.header_crc32);

    let mut bytes = bytes_of(&header).to_vec();
    assert_eq!(bytes.len(), 92);
    let stored = common::u32_at(&bytes, 16);
    bytes[16..20].fill(0);
    assert_eq!(Crc32::of(&bytes).to_u32(), stored);
}

/// Updating a field invalidates the checksum until it is recomputed.
#[test]
fn test_header_crc32_changes_with_fields() {
    let mut header = create_header();
    header.update_header_crc32();
    let crc = header.header_crc32;

    header.my_lba = LbaLe::from_u64(8191);
    header.alternate_lba = LbaLe::from_u64(1);
    assert_eq!(header.header_crc32, crc);
    assert_ne!(header.calculate_header_crc32(), crc);

    header.update_header_crc32();
    assert_ne!(header.header_crc32, crc);
}

#[test]
fn test_header_display() {
    let header = create_header();
    let s = header.to_string();
    assert!(s.starts_with("GptHeader { signature: Signature(\"EFI PART\")"));
    assert!(s.contains("disk_guid: 57a7feb6-8cd5-4922-b7bd-c78b0914e870"));
    assert!(s.contains("number_of_partition_entries: 128"));
}
