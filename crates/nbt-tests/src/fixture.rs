//! Reference encoder and hostile payload builder.

use nbt_types::{CompoundTag, ListTag, NamedTag, Tag, TagType};

// ── Reference encoder ─────────────────────────────────────────────────────────

/// Encode a root tag with its key.
///
/// A root `End` is written as the single byte `00`, with no key. Lists are
/// written with their stored element type, so an empty list keeps whatever
/// type it was built with.
///
/// # Panics
///
/// Panics if a key or string exceeds 65535 bytes of modified UTF-8, or an
/// array or list has more than `i32::MAX` elements.
#[must_use]
pub fn encode_named(root: &NamedTag) -> Vec<u8> {
    let mut out = Vec::new();
    write_named(&mut out, &root.key, &root.tag);
    out
}

/// Encode `tag` under an empty root key.
#[must_use]
pub fn encode_root(tag: &Tag) -> Vec<u8> {
    let mut out = Vec::new();
    write_named(&mut out, "", tag);
    out
}

fn write_named(out: &mut Vec<u8>, key: &str, tag: &Tag) {
    out.push(tag.tag_type().wire_id());
    if tag.tag_type() != TagType::End {
        write_utf(out, key);
        write_payload(out, tag);
    }
}

fn write_payload(out: &mut Vec<u8>, tag: &Tag) {
    match tag {
        Tag::End => {}
        Tag::Byte(v) => out.extend_from_slice(&v.to_be_bytes()),
        Tag::Short(v) => out.extend_from_slice(&v.to_be_bytes()),
        Tag::Int(v) => out.extend_from_slice(&v.to_be_bytes()),
        Tag::Long(v) => out.extend_from_slice(&v.to_be_bytes()),
        Tag::Float(v) => out.extend_from_slice(&v.to_be_bytes()),
        Tag::Double(v) => out.extend_from_slice(&v.to_be_bytes()),
        Tag::ByteArray(values) => {
            write_count(out, values.len());
            out.extend(values.iter().flat_map(|v| v.to_be_bytes()));
        }
        Tag::String(s) => write_utf(out, s),
        Tag::List(list) => {
            out.push(list.element_type().wire_id());
            write_count(out, list.len());
            for item in list {
                write_payload(out, item);
            }
        }
        Tag::Compound(compound) => {
            for (key, child) in compound {
                write_named(out, key, child);
            }
            out.push(TagType::End.wire_id());
        }
        Tag::IntArray(values) => {
            write_count(out, values.len());
            out.extend(values.iter().flat_map(|v| v.to_be_bytes()));
        }
    }
}

fn write_count(out: &mut Vec<u8>, count: usize) {
    let count = i32::try_from(count).expect("element count exceeds i32::MAX");
    out.extend_from_slice(&count.to_be_bytes());
}

fn write_utf(out: &mut Vec<u8>, s: &str) {
    let bytes = encode_mutf8(s);
    let len = u16::try_from(bytes.len()).expect("string exceeds 65535 encoded bytes");
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&bytes);
}

/// Encode `s` as modified UTF-8, without the length prefix.
///
/// NUL becomes `C0 80`; characters above U+FFFF become two 3-byte
/// surrogate sequences.
#[must_use]
pub fn encode_mutf8(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for unit in s.encode_utf16() {
        match unit {
            0x0001..=0x007F => out.push(unit.to_be_bytes()[1]),
            0x0000 | 0x0080..=0x07FF => {
                out.push(0xC0 | low_byte(unit >> 6));
                out.push(0x80 | low_byte(unit & 0x3F));
            }
            _ => {
                out.push(0xE0 | low_byte(unit >> 12));
                out.push(0x80 | low_byte((unit >> 6) & 0x3F));
                out.push(0x80 | low_byte(unit & 0x3F));
            }
        }
    }
    out
}

fn low_byte(v: u16) -> u8 {
    v.to_be_bytes()[1]
}

// ── Sample document ───────────────────────────────────────────────────────────

/// A small player record that decodes under the default limits.
///
/// ```text
/// Compound "" (10 members, depth 3, 24 tags)
/// ├── Abilities   Compound { flying: Byte, walkSpeed: Float }
/// ├── Flags       ByteArray [1, 0, -1]
/// ├── Health      Float 20.0
/// ├── Inventory   List<Compound> × 2 { Count, Slot, id }
/// ├── Motto       String with é, U+1D518 and NUL
/// ├── Name        String "Steve"
/// ├── Pos         List<Double> × 3
/// ├── Scores      IntArray [10, 20, 30]
/// ├── Seed        Long
/// └── XpTotal     Int 1395
/// ```
///
/// `tests/golden/player.nbt` holds its encoding.
#[must_use]
pub fn sample_player() -> NamedTag {
    let item = |id: &str, count: i8, slot: i8| {
        let mut item = CompoundTag::new();
        item.insert("id", Tag::String(id.to_string()));
        item.insert("Count", Tag::Byte(count));
        item.insert("Slot", Tag::Byte(slot));
        Tag::Compound(item)
    };
    let inventory = ListTag::from_items(
        TagType::Compound,
        vec![
            item("minecraft:diamond_sword", 1, 0),
            item("minecraft:torch", 64, 8),
        ],
    )
    .expect("homogeneous list");
    let pos = ListTag::from_items(
        TagType::Double,
        vec![Tag::Double(0.5), Tag::Double(64.0), Tag::Double(-12.25)],
    )
    .expect("homogeneous list");

    let mut abilities = CompoundTag::new();
    abilities.insert("flying", Tag::Byte(0));
    abilities.insert("walkSpeed", Tag::Float(0.1));

    let mut root = CompoundTag::new();
    root.insert("Name", Tag::String("Steve".into()));
    root.insert("Health", Tag::Float(20.0));
    root.insert("XpTotal", Tag::Int(1395));
    root.insert("Seed", Tag::Long(-4_172_144_997_902_289_642));
    root.insert("Pos", Tag::List(pos));
    root.insert("Inventory", Tag::List(inventory));
    root.insert("Flags", Tag::ByteArray(vec![1, 0, -1]));
    root.insert("Scores", Tag::IntArray(vec![10, 20, 30]));
    root.insert("Abilities", Tag::Compound(abilities));
    root.insert("Motto", Tag::String("héllo, \u{1D518}\u{0}".into()));
    NamedTag::root(Tag::Compound(root))
}

// ── Raw payload builder ───────────────────────────────────────────────────────

/// Byte-level builder for payloads that break the rules.
///
/// Nothing is validated: counts need not match the elements that follow,
/// type bytes may be out of range, and the stream may stop anywhere.
///
/// ```
/// use nbt_tests::PayloadBuilder;
/// use nbt_types::TagType;
///
/// // A list that claims two billion Long elements and supplies none.
/// let bytes = PayloadBuilder::new()
///     .root()
///     .named(TagType::List, "bomb")
///     .tag_type(TagType::Long)
///     .i32(i32::MAX)
///     .build();
/// assert_eq!(bytes.len(), 3 + 7 + 1 + 4);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PayloadBuilder {
    bytes: Vec<u8>,
}

impl PayloadBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn u8(mut self, v: u8) -> Self {
        self.bytes.push(v);
        self
    }

    #[must_use]
    pub fn i16(mut self, v: i16) -> Self {
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    #[must_use]
    pub fn i32(mut self, v: i32) -> Self {
        self.bytes.extend_from_slice(&v.to_be_bytes());
        self
    }

    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    #[must_use]
    pub fn tag_type(self, tag_type: TagType) -> Self {
        self.u8(tag_type.wire_id())
    }

    /// Length-prefixed modified UTF-8.
    ///
    /// # Panics
    ///
    /// Panics if the encoding exceeds 65535 bytes.
    #[must_use]
    pub fn utf(mut self, s: &str) -> Self {
        write_utf(&mut self.bytes, s);
        self
    }

    /// Type byte followed by a key.
    #[must_use]
    pub fn named(self, tag_type: TagType, key: &str) -> Self {
        self.tag_type(tag_type).utf(key)
    }

    /// Opening of an empty-keyed root compound.
    #[must_use]
    pub fn root(self) -> Self {
        self.named(TagType::Compound, "")
    }

    #[must_use]
    pub fn end(self) -> Self {
        self.tag_type(TagType::End)
    }

    /// Append the payload bytes of an already-built tag.
    #[must_use]
    pub fn payload(mut self, tag: &Tag) -> Self {
        write_payload(&mut self.bytes, tag);
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

// ── Shaped payloads ───────────────────────────────────────────────────────────

/// Root compound with single-member compounds nested inside it, `depth`
/// structures in total.
#[must_use]
pub fn nested_compounds(depth: usize) -> Vec<u8> {
    let mut builder = PayloadBuilder::new().root();
    for _ in 1..depth {
        builder = builder.named(TagType::Compound, "c");
    }
    for _ in 0..depth {
        builder = builder.end();
    }
    builder.build()
}

/// Root compound holding lists nested `depth - 1` levels deep.
#[must_use]
pub fn nested_lists(depth: usize) -> Vec<u8> {
    let mut builder = PayloadBuilder::new().root();
    if depth > 1 {
        builder = builder.named(TagType::List, "l");
        for _ in 2..depth {
            builder = builder.tag_type(TagType::List).i32(1);
        }
        builder = builder.tag_type(TagType::Byte).i32(0);
    }
    builder.end().build()
}

/// Root compound with `members` distinct Byte members.
#[must_use]
pub fn wide_compound(members: usize) -> Vec<u8> {
    let mut builder = PayloadBuilder::new().root();
    for i in 0..members {
        builder = builder.named(TagType::Byte, &format!("m{i}")).u8(0);
    }
    builder.end().build()
}

/// Root compound with one Byte list of `count` elements under key `"l"`.
///
/// # Panics
///
/// Panics if `count` exceeds `i32::MAX`.
#[must_use]
pub fn byte_list(count: usize) -> Vec<u8> {
    let declared = i32::try_from(count).expect("count fits i32");
    PayloadBuilder::new()
        .root()
        .named(TagType::List, "l")
        .tag_type(TagType::Byte)
        .i32(declared)
        .raw(&vec![0u8; count])
        .end()
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutf8_special_cases() {
        assert_eq!(encode_mutf8("A"), b"A");
        assert_eq!(encode_mutf8("\0"), [0xC0, 0x80]);
        assert_eq!(encode_mutf8("é"), [0xC3, 0xA9]);
        assert_eq!(encode_mutf8("€"), [0xE2, 0x82, 0xAC]);
        assert_eq!(
            encode_mutf8("\u{1D518}"),
            [0xED, 0xA0, 0xB5, 0xED, 0xB4, 0x98]
        );
    }

    #[test]
    fn mutf8_agrees_with_decoder() {
        let s = "a\0é€\u{1D518}z";
        assert_eq!(nbt_wire::mutf8::decode(&encode_mutf8(s)).unwrap(), s);
    }

    #[test]
    fn root_end_is_one_byte() {
        assert_eq!(encode_root(&Tag::End), [0x00]);
    }

    #[test]
    fn sample_player_shape() {
        let player = sample_player();
        assert_eq!(player.tag.tag_count(), 24);
        assert_eq!(player.tag.depth(), 3);
        assert_eq!(player.tag.as_compound().unwrap().len(), 10);
    }

    #[test]
    fn nested_lists_depth() {
        let decoder = nbt_decoder::BoundedTreeDecoder::new(
            nbt_decoder::DecoderConfig::default().with_max_traversal_depth(64),
        );
        for depth in 1..8 {
            let root = decoder.decode_slice(&nested_lists(depth)).unwrap();
            assert_eq!(root.tag.depth(), depth);
        }
    }
}
