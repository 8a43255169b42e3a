#![no_main]

use libfuzzer_sys::fuzz_target;
use nbt_decoder::{BoundedTreeDecoder, DecoderConfig};

// Fuzz target: bounded decoder entry point on arbitrary bytes.
//
// Catches bugs in:
// - Type byte, key and root policy checks
// - Count fields driving reads before they are validated
// - Depth accounting on list/compound entry and exit
// - Modified UTF-8 decoding of keys and strings
//
// Any accepted tree must respect the limits it was decoded under.
fuzz_target!(|data: &[u8]| {
    for config in [DecoderConfig::default(), DecoderConfig::permissive()] {
        let decoder = BoundedTreeDecoder::new(config);
        if let Ok(root) = decoder.decode_slice(data) {
            let config = decoder.config();
            assert!(root.tag.depth() <= config.max_traversal_depth);
            assert!(root.tag.tag_count() <= config.max_allocated_tags.max(1));
        }
    }
});
