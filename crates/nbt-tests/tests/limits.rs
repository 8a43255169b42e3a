//! Boundary tests for every configurable limit.
//!
//! For a limit configured to `N`, a payload that needs exactly `N` must
//! decode and a payload that needs `N + 1` must be refused with that limit
//! named in the error. Each limit is checked across a range of configured
//! values, not only the defaults.

use nbt_decoder::{BoundedTreeDecoder, DecodeError, DecoderConfig, Limit, UnsafePayload};
use nbt_tests::PayloadBuilder;
use nbt_tests::fixture::{byte_list, nested_compounds, nested_lists, wide_compound};
use nbt_types::{NamedTag, TagType};
use proptest::prelude::*;

fn decode(config: DecoderConfig, bytes: &[u8]) -> Result<NamedTag, DecodeError> {
    BoundedTreeDecoder::new(config).decode_slice(bytes)
}

/// Assert that `result` failed on `limit` with the given numbers.
fn assert_exceeded(result: Result<NamedTag, DecodeError>, limit: Limit, actual: usize, max: usize) {
    match result {
        Err(DecodeError::UnsafePayload(UnsafePayload::LimitExceeded {
            limit: got,
            actual: got_actual,
            max: got_max,
        })) => {
            assert_eq!((got, got_actual, got_max), (limit, actual, max));
        }
        other => panic!("expected {limit} to be exceeded, got {other:?}"),
    }
}

fn string_member(value: &str) -> Vec<u8> {
    PayloadBuilder::new()
        .root()
        .named(TagType::String, "s")
        .utf(value)
        .end()
        .build()
}

fn byte_array_member(count: usize) -> Vec<u8> {
    PayloadBuilder::new()
        .root()
        .named(TagType::ByteArray, "b")
        .i32(i32::try_from(count).unwrap())
        .raw(&vec![0x5A; count])
        .end()
        .build()
}

fn int_array_member(count: usize) -> Vec<u8> {
    let mut builder = PayloadBuilder::new()
        .root()
        .named(TagType::IntArray, "i")
        .i32(i32::try_from(count).unwrap());
    for i in 0..count {
        builder = builder.i32(i32::try_from(i).unwrap());
    }
    builder.end().build()
}

fn keyed_member(key: &str) -> Vec<u8> {
    PayloadBuilder::new()
        .root()
        .named(TagType::Byte, key)
        .u8(1)
        .end()
        .build()
}

// ── Defaults ──────────────────────────────────────────────────────────────────

#[test]
fn default_boundaries() {
    let config = DecoderConfig::default;

    assert!(decode(config(), &nested_compounds(5)).is_ok());
    assert_exceeded(decode(config(), &nested_compounds(6)), Limit::TraversalDepth, 6, 5);

    assert!(decode(config(), &wide_compound(20)).is_ok());
    assert_exceeded(decode(config(), &wide_compound(21)), Limit::CompoundSize, 21, 20);

    assert!(decode(config(), &byte_list(100)).is_ok());
    assert_exceeded(decode(config(), &byte_list(101)), Limit::ListSize, 101, 100);

    assert!(decode(config(), &string_member(&"s".repeat(100))).is_ok());
    assert_exceeded(
        decode(config(), &string_member(&"s".repeat(101))),
        Limit::ContiguousSize,
        101,
        100,
    );

    assert!(decode(config(), &keyed_member(&"k".repeat(32))).is_ok());
    assert_exceeded(
        decode(config(), &keyed_member(&"k".repeat(33))),
        Limit::KeyLength,
        33,
        32,
    );
}

#[test]
fn default_allocation_boundary() {
    // root + list + 510 elements = 512 tags
    let config = DecoderConfig::default().with_max_list_size(1000);
    assert!(decode(config.clone(), &byte_list(510)).is_ok());
    assert_exceeded(decode(config, &byte_list(511)), Limit::AllocatedTags, 513, 512);
}

// ── Multi-byte characters ─────────────────────────────────────────────────────
//
// Strings and keys are measured in UTF-16 code units: BMP characters count
// once however many bytes they encode to, characters above U+FFFF count twice.

#[test]
fn string_limit_counts_code_units_not_bytes() {
    // 100 characters, 300 encoded bytes.
    let value = "€".repeat(100);
    assert!(decode(DecoderConfig::default(), &string_member(&value)).is_ok());
}

#[test]
fn key_limit_counts_code_units_not_bytes() {
    let key = "ж".repeat(32);
    assert!(decode(DecoderConfig::default(), &keyed_member(&key)).is_ok());
    let key = "ж".repeat(33);
    assert_exceeded(
        decode(DecoderConfig::default(), &keyed_member(&key)),
        Limit::KeyLength,
        33,
        32,
    );
}

#[test]
fn supplementary_characters_count_twice_in_strings() {
    // Each U+1F980 is a surrogate pair: 50 characters, 100 units.
    let value = "\u{1F980}".repeat(50);
    assert!(decode(DecoderConfig::default(), &string_member(&value)).is_ok());

    let value = "\u{1F980}".repeat(51);
    assert_exceeded(
        decode(DecoderConfig::default(), &string_member(&value)),
        Limit::ContiguousSize,
        102,
        100,
    );

    // One unit over with a single trailing BMP character.
    let value = format!("{}x", "\u{1F980}".repeat(50));
    assert_exceeded(
        decode(DecoderConfig::default(), &string_member(&value)),
        Limit::ContiguousSize,
        101,
        100,
    );
}

#[test]
fn supplementary_characters_count_twice_in_keys() {
    let key = "\u{1D518}".repeat(16);
    assert!(decode(DecoderConfig::default(), &keyed_member(&key)).is_ok());

    let key = "\u{1D518}".repeat(17);
    assert_exceeded(
        decode(DecoderConfig::default(), &keyed_member(&key)),
        Limit::KeyLength,
        34,
        32,
    );

    let key = format!("{}k", "\u{1D518}".repeat(16));
    assert_exceeded(
        decode(DecoderConfig::default(), &keyed_member(&key)),
        Limit::KeyLength,
        33,
        32,
    );
}

#[test]
fn zero_limits_refuse_any_content() {
    let config = DecoderConfig::default()
        .with_max_compound_size(0)
        .with_max_contiguous_size(0)
        .with_max_key_length(0);
    // An empty root compound needs none of them.
    assert!(decode(config.clone(), &wide_compound(0)).is_ok());
    assert_exceeded(decode(config, &wide_compound(1)), Limit::CompoundSize, 1, 0);

    let no_tags = DecoderConfig::default().with_max_allocated_tags(0);
    assert_exceeded(decode(no_tags, &wide_compound(0)), Limit::AllocatedTags, 1, 0);

    let no_depth = DecoderConfig::default().with_max_traversal_depth(0);
    assert_exceeded(decode(no_depth, &wide_compound(0)), Limit::TraversalDepth, 1, 0);
}

// ── Arbitrary configured values ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn depth_boundary_compounds(depth in 1usize..24) {
        let config = DecoderConfig::default().with_max_traversal_depth(depth);
        prop_assert!(decode(config.clone(), &nested_compounds(depth)).is_ok());
        assert_exceeded(
            decode(config, &nested_compounds(depth + 1)),
            Limit::TraversalDepth,
            depth + 1,
            depth,
        );
    }

    #[test]
    fn depth_boundary_lists(depth in 1usize..24) {
        let config = DecoderConfig::default().with_max_traversal_depth(depth);
        prop_assert!(decode(config.clone(), &nested_lists(depth)).is_ok());
        assert_exceeded(
            decode(config, &nested_lists(depth + 1)),
            Limit::TraversalDepth,
            depth + 1,
            depth,
        );
    }

    #[test]
    fn compound_size_boundary(size in 0usize..200) {
        let config = DecoderConfig::default()
            .with_max_compound_size(size)
            .with_max_allocated_tags(1000);
        prop_assert!(decode(config.clone(), &wide_compound(size)).is_ok());
        assert_exceeded(decode(config, &wide_compound(size + 1)), Limit::CompoundSize, size + 1, size);
    }

    #[test]
    fn list_size_boundary(size in 0usize..2000) {
        let config = DecoderConfig::default()
            .with_max_list_size(size)
            .with_max_allocated_tags(10_000);
        prop_assert!(decode(config.clone(), &byte_list(size)).is_ok());
        assert_exceeded(decode(config, &byte_list(size + 1)), Limit::ListSize, size + 1, size);
    }

    #[test]
    fn contiguous_size_boundary(size in 0usize..2000) {
        let config = DecoderConfig::default().with_max_contiguous_size(size);

        prop_assert!(decode(config.clone(), &byte_array_member(size)).is_ok());
        assert_exceeded(
            decode(config.clone(), &byte_array_member(size + 1)),
            Limit::ContiguousSize,
            size + 1,
            size,
        );

        prop_assert!(decode(config.clone(), &int_array_member(size)).is_ok());
        assert_exceeded(
            decode(config.clone(), &int_array_member(size + 1)),
            Limit::ContiguousSize,
            size + 1,
            size,
        );

        prop_assert!(decode(config.clone(), &string_member(&"é".repeat(size))).is_ok());
        assert_exceeded(
            decode(config, &string_member(&"é".repeat(size + 1))),
            Limit::ContiguousSize,
            size + 1,
            size,
        );
    }

    #[test]
    fn key_length_boundary(len in 0usize..512) {
        let config = DecoderConfig::default().with_max_key_length(len);
        prop_assert!(decode(config.clone(), &keyed_member(&"k".repeat(len))).is_ok());
        assert_exceeded(
            decode(config, &keyed_member(&"k".repeat(len + 1))),
            Limit::KeyLength,
            len + 1,
            len,
        );
    }

    #[test]
    fn allocation_boundary(elements in 0usize..2000) {
        // root + list + elements
        let needed = elements + 2;
        let config = DecoderConfig::default()
            .with_max_list_size(elements + 1)
            .with_max_allocated_tags(needed);
        prop_assert!(decode(config.clone(), &byte_list(elements)).is_ok());
        assert_exceeded(
            decode(config, &byte_list(elements + 1)),
            Limit::AllocatedTags,
            needed + 1,
            needed,
        );
    }
}
