#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nbt_decoder::{BoundedTreeDecoder, DecoderConfig};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    max_traversal_depth: u8,
    max_compound_size: u8,
    max_list_size: u16,
    max_contiguous_size: u16,
    max_key_length: u8,
    max_allocated_tags: u16,
    allow_any_root_tag: bool,
    allow_stray_end_tags: bool,
    data: Vec<u8>,
}

// Fuzz target: decoder under arbitrary small limits.
//
// Catches off-by-one errors at every limit boundary: an accepted tree
// never exceeds the depth or allocation limit it was decoded under.
fuzz_target!(|input: FuzzInput| {
    let config = DecoderConfig {
        max_traversal_depth: usize::from(input.max_traversal_depth),
        max_compound_size: usize::from(input.max_compound_size),
        max_list_size: usize::from(input.max_list_size),
        max_contiguous_size: usize::from(input.max_contiguous_size),
        max_key_length: usize::from(input.max_key_length),
        max_allocated_tags: usize::from(input.max_allocated_tags),
        allow_any_root_tag: input.allow_any_root_tag,
        allow_stray_end_tags: input.allow_stray_end_tags,
    };
    let decoder = BoundedTreeDecoder::new(config.clone());
    if let Ok(root) = decoder.decode_slice(&input.data) {
        assert!(root.tag.depth() <= config.max_traversal_depth);
        if root.tag != nbt_types::Tag::End {
            assert!(root.tag.tag_count() <= config.max_allocated_tags);
        }
        if !config.allow_any_root_tag {
            assert!(root.key.is_empty());
            assert!(root.tag.as_compound().is_some());
        }
    }
});
