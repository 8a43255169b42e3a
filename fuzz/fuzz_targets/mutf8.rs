#![no_main]

use libfuzzer_sys::fuzz_target;

// Fuzz target: modified UTF-8 decoding.
//
// Catches bugs in:
// - Truncated multi-byte sequences at the end of input
// - Surrogate pairing across 3-byte units
// - Error offsets pointing outside the input
//
// Whatever decodes must re-encode to a byte string that decodes the same.
fuzz_target!(|data: &[u8]| {
    match nbt_wire::mutf8::decode(data) {
        Ok(s) => {
            let reencoded = nbt_tests::encode_mutf8(&s);
            assert_eq!(nbt_wire::mutf8::decode(&reencoded).as_deref(), Ok(s.as_str()));
        }
        Err(at) => assert!(at < data.len()),
    }
});
