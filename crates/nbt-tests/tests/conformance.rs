//! Conformance tests: committed golden payloads decoded under default limits.
//!
//! The fixtures in `tests/golden/` are produced by the `generate_golden`
//! binary. Decoding them must give exactly the in-memory sample, and the
//! reference encoder must still reproduce them byte for byte. A failure here
//! means either the wire handling or the fixtures drifted.

use std::path::Path;

use insta::assert_snapshot;
use nbt_decoder::{BoundedTreeDecoder, DecoderConfig};
use nbt_tests::{encode_named, sample_player};
use nbt_types::{Tag, TagType};
use nbt_wire::{DataInput, DataReader};

fn golden(name: &str) -> Vec<u8> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let fixture_path = manifest_dir.join("tests/golden").join(name);
    std::fs::read(&fixture_path)
        .unwrap_or_else(|e| panic!("failed to read golden fixture {}: {e}", fixture_path.display()))
}

// ── player.nbt ────────────────────────────────────────────────────────────────

#[test]
fn player_decodes_to_sample() {
    let bytes = golden("player.nbt");
    let root = BoundedTreeDecoder::default()
        .decode_slice(&bytes)
        .expect("player fixture fits the default limits");
    assert_eq!(root, sample_player());
}

#[test]
fn player_reencodes_identically() {
    assert_eq!(encode_named(&sample_player()), golden("player.nbt"));
}

#[test]
fn player_header_bytes() {
    let bytes = golden("player.nbt");
    assert_eq!(bytes.len(), 305);
    // Root compound, empty key, then the first member: Compound "Abilities".
    assert_snapshot!(hex::encode(&bytes[..16]), @"0a00000a00094162696c697469657301");
}

#[test]
fn player_field_values() {
    let root = BoundedTreeDecoder::default()
        .decode_slice(&golden("player.nbt"))
        .unwrap();
    let player = root.tag.as_compound().unwrap();

    assert_eq!(player.get("Name").and_then(Tag::as_str), Some("Steve"));
    assert_eq!(
        player.get("Motto").and_then(Tag::as_str),
        Some("héllo, \u{1D518}\u{0}")
    );
    assert_eq!(player.get("XpTotal").and_then(Tag::as_i64), Some(1395));

    let inventory = player.get("Inventory").and_then(Tag::as_list).unwrap();
    assert_eq!(inventory.element_type(), TagType::Compound);
    let torch = inventory.get(1).and_then(Tag::as_compound).unwrap();
    assert_eq!(torch.get("Count"), Some(&Tag::Byte(64)));

    let pos = player.get("Pos").and_then(Tag::as_list).unwrap();
    let coords: Vec<_> = pos.iter().cloned().collect();
    assert_eq!(
        coords,
        vec![Tag::Double(0.5), Tag::Double(64.0), Tag::Double(-12.25)]
    );
}

#[test]
fn player_consumes_exactly_its_bytes() {
    let mut bytes = golden("player.nbt");
    let len = bytes.len() as u64;
    bytes.extend_from_slice(b"trailing");
    let mut input = DataReader::new(&bytes[..]);
    BoundedTreeDecoder::default().decode(&mut input).unwrap();
    assert_eq!(input.position(), len);
}

#[test]
fn player_rejected_under_tighter_limits() {
    let bytes = golden("player.nbt");
    let tight = BoundedTreeDecoder::new(DecoderConfig::default().with_max_traversal_depth(2));
    let err = tight.decode_slice(&bytes).unwrap_err();
    assert_snapshot!(err.to_string(), @"unsafe payload: maximum struct depth exceeded (3, max 2)");
}

// ── list_bomb.nbt ─────────────────────────────────────────────────────────────

#[test]
fn list_bomb_rejected_at_count() {
    let bytes = golden("list_bomb.nbt");
    let err = BoundedTreeDecoder::default().decode_slice(&bytes).unwrap_err();
    assert!(err.is_unsafe());
    assert_snapshot!(err.to_string(), @"unsafe payload: maximum list size exceeded (2147483647, max 100)");
}
