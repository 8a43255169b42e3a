#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nbt_decoder::{BoundedTreeDecoder, DecoderConfig};
use nbt_types::{CompoundTag, ListTag, Tag, TagType};

#[derive(Debug, Arbitrary)]
enum FuzzTag {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<FuzzTag>),
    Compound(Vec<(String, FuzzTag)>),
    IntArray(Vec<i32>),
}

/// Keep strings well inside the u16 length prefix.
fn clip(s: String) -> String {
    s.chars().take(512).collect()
}

/// Build a real tag. NaN becomes zero so equality holds; empty lists take
/// the Byte element type the decoder reports for them.
fn to_tag(fuzz: FuzzTag) -> Tag {
    match fuzz {
        FuzzTag::Byte(v) => Tag::Byte(v),
        FuzzTag::Short(v) => Tag::Short(v),
        FuzzTag::Int(v) => Tag::Int(v),
        FuzzTag::Long(v) => Tag::Long(v),
        FuzzTag::Float(v) => Tag::Float(if v.is_nan() { 0.0 } else { v }),
        FuzzTag::Double(v) => Tag::Double(if v.is_nan() { 0.0 } else { v }),
        FuzzTag::ByteArray(v) => Tag::ByteArray(v),
        FuzzTag::String(s) => Tag::String(clip(s)),
        FuzzTag::List(items) => {
            let items: Vec<Tag> = items.into_iter().map(to_tag).collect();
            let element_type = items.first().map_or(TagType::Byte, Tag::tag_type);
            let items = items
                .into_iter()
                .filter(|item| item.tag_type() == element_type)
                .collect();
            Tag::List(ListTag::from_items(element_type, items).expect("filtered"))
        }
        FuzzTag::Compound(members) => Tag::Compound(
            members
                .into_iter()
                .map(|(key, child)| (clip(key), to_tag(child)))
                .collect::<CompoundTag>(),
        ),
        FuzzTag::IntArray(v) => Tag::IntArray(v),
    }
}

/// Every list, compound and array is within `max` elements.
fn fits(tag: &Tag, max: usize) -> bool {
    match tag {
        Tag::ByteArray(v) => v.len() <= max,
        Tag::IntArray(v) => v.len() <= max,
        Tag::List(list) => list.len() <= max && list.iter().all(|t| fits(t, max)),
        Tag::Compound(c) => c.len() <= max && c.values().all(|t| fits(t, max)),
        _ => true,
    }
}

// Fuzz target: reference encoder → bounded decoder roundtrip.
//
// Any tree that fits the configured limits must decode back to itself.
fuzz_target!(|input: Vec<(String, FuzzTag)>| {
    let root: CompoundTag = input
        .into_iter()
        .map(|(key, child)| (clip(key), to_tag(child)))
        .collect();
    let root = Tag::Compound(root);

    let config = DecoderConfig::permissive()
        .with_max_traversal_depth(64)
        .with_max_compound_size(4096)
        .with_max_list_size(4096)
        .with_max_contiguous_size(4096)
        .with_max_key_length(1024)
        .with_max_allocated_tags(65_536);
    if root.depth() > config.max_traversal_depth
        || root.tag_count() > config.max_allocated_tags
        || !fits(&root, 4096)
    {
        return;
    }

    let bytes = nbt_tests::encode_root(&root);
    let decoded = BoundedTreeDecoder::new(config)
        .decode_slice(&bytes)
        .expect("tree within limits must decode");
    assert_eq!(decoded.tag, root);
});
