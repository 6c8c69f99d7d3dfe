// Copyright 2022 Google LLC
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// https://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use common::check_derives;
use gpt_image_types::{U32Le, U64Le};

#[test]
fn test_u32() {
    check_derives::<U32Le>();

    let mut v = U32Le::from_u32(0x1234_5678);
    assert_eq!(v.0, [0x78, 0x56, 0x34, 0x12]);
    assert_eq!(v.to_u32(), 0x1234_5678);

    v.set(123);
    assert_eq!(v.to_u32(), 123);
    assert_eq!(v.to_string(), "123");

    assert_eq!(format!("{:x}", U32Le::from_u32(0x1234_5678)), "12345678");
    assert_eq!(format!("{:#x}", U32Le::from_u32(0x1234_5678)), "0x12345678");
}

#[test]
fn test_u64() {
    check_derives::<U64Le>();

    let mut v = U64Le::from_u64(0x0123_4567_89ab_cdef);
    assert_eq!(v.0, [0xef, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01]);
    assert_eq!(v.to_u64(), 0x0123_4567_89ab_cdef);

    v.set(456);
    assert_eq!(v.to_u64(), 456);
    assert_eq!(v.to_string(), "456");

    assert_eq!(
        format!("{:#x}", U64Le::from_u64(0x0123_4567_89ab_cdef)),
        "0x0123456789abcdef"
    );
}
