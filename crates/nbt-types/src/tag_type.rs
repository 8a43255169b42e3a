use std::fmt;

/// Tag type identifiers.
///
/// Each variant maps to the single wire byte that precedes a tag (or, for
/// lists, the element type byte). The set is closed: any other byte value
/// is not a tag and [`from_wire_id`](Self::from_wire_id) returns `None`.
///
/// ```text
/// ┌──────┬───────────┬──────────────────────────────────────────┐
/// │ Wire │ Variant   │ Payload                                  │
/// ├──────┼───────────┼──────────────────────────────────────────┤
/// │ 0x00 │ End       │ none, terminates a compound              │
/// │ 0x01 │ Byte      │ i8                                       │
/// │ 0x02 │ Short     │ i16 (big-endian)                         │
/// │ 0x03 │ Int       │ i32                                      │
/// │ 0x04 │ Long      │ i64                                      │
/// │ 0x05 │ Float     │ f32 (IEEE 754)                           │
/// │ 0x06 │ Double    │ f64 (IEEE 754)                           │
/// │ 0x07 │ ByteArray │ i32 count + count × i8                   │
/// │ 0x08 │ String    │ u16 byte length + modified UTF-8         │
/// │ 0x09 │ List      │ element type + i32 count + elements      │
/// │ 0x0A │ Compound  │ named tags until End                     │
/// │ 0x0B │ IntArray  │ i32 count + count × i32                  │
/// └──────┴───────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagType {
    End,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
}

impl TagType {
    /// Every tag type in wire order.
    pub const ALL: [TagType; 12] = [
        Self::End,
        Self::Byte,
        Self::Short,
        Self::Int,
        Self::Long,
        Self::Float,
        Self::Double,
        Self::ByteArray,
        Self::String,
        Self::List,
        Self::Compound,
        Self::IntArray,
    ];

    /// Return the single-byte wire ID for this tag type.
    #[must_use]
    pub fn wire_id(self) -> u8 {
        match self {
            Self::End => 0x00,
            Self::Byte => 0x01,
            Self::Short => 0x02,
            Self::Int => 0x03,
            Self::Long => 0x04,
            Self::Float => 0x05,
            Self::Double => 0x06,
            Self::ByteArray => 0x07,
            Self::String => 0x08,
            Self::List => 0x09,
            Self::Compound => 0x0A,
            Self::IntArray => 0x0B,
        }
    }

    /// Parse a wire byte into a [`TagType`].
    ///
    /// Returns `None` for anything outside `0x00..=0x0B`.
    #[must_use]
    pub fn from_wire_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id)).copied()
    }

    /// Human-readable name, as used in error messages and tree dumps.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::End => "End",
            Self::Byte => "Byte",
            Self::Short => "Short",
            Self::Int => "Int",
            Self::Long => "Long",
            Self::Float => "Float",
            Self::Double => "Double",
            Self::ByteArray => "ByteArray",
            Self::String => "String",
            Self::List => "List",
            Self::Compound => "Compound",
            Self::IntArray => "IntArray",
        }
    }

    /// Lists and compounds hold child tags and count toward nesting depth.
    #[must_use]
    pub fn is_structural(self) -> bool {
        matches!(self, Self::List | Self::Compound)
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
