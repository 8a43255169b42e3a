use std::fmt;

use nbt_types::{TagType, TypeError};
use nbt_wire::WireError;

/// Errors that can occur while decoding a tag stream.
///
/// The split is the point: callers must be able to tell a payload that was
/// *refused* from one that was merely *broken*.
///
/// ```text
///   DecodeError
///   ├── UnsafePayload(UnsafePayload)  ← a bound or structural rule was violated
///   └── Io(WireError)                 ← truncated, malformed or unreadable input
/// ```
///
/// Both abort the whole decode; no partial tree is ever returned.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The payload violated a configured limit or a structural rule.
    ///
    /// Treat the source as hostile or at least untrustworthy.
    #[error("unsafe payload: {0}")]
    UnsafePayload(#[from] UnsafePayload),

    /// The byte stream could not be read to the end of the tree.
    ///
    /// Truncation, invalid modified UTF-8 in a string, and errors from the
    /// underlying reader all land here.
    #[error(transparent)]
    Io(#[from] WireError),
}

impl DecodeError {
    /// `true` when the payload was refused rather than unreadable.
    #[must_use]
    pub fn is_unsafe(&self) -> bool {
        matches!(self, Self::UnsafePayload(_))
    }

    /// The policy violation, if this is one.
    #[must_use]
    pub fn unsafe_payload(&self) -> Option<&UnsafePayload> {
        match self {
            Self::UnsafePayload(reason) => Some(reason),
            Self::Io(_) => None,
        }
    }
}

/// Why a payload was refused.
///
/// Every variant carries the offending value, and [`LimitExceeded`]
/// additionally names the limit and its configured maximum, so a caller can
/// log a rejection without re-deriving any context.
///
/// [`LimitExceeded`]: UnsafePayload::LimitExceeded
///
/// ```text
/// ┌─────────────────────┬───────────────────────────────────────────────┐
/// │ Variant             │ Cause                                         │
/// ├─────────────────────┼───────────────────────────────────────────────┤
/// │ UnknownTagType      │ type byte outside 0x00..=0x0B                 │
/// │ RootNotCompound     │ first tag is not a compound                   │
/// │ RootKeyNotEmpty     │ first tag has a non-empty key                 │
/// │ StrayEndTag         │ End tag outside a compound's member list      │
/// │ EndListType         │ list declares End as its element type         │
/// │ NegativeLength      │ list/array count field is negative            │
/// │ ListElementMismatch │ list element differs from declared type       │
/// │ LimitExceeded       │ any configured bound (see [`Limit`])          │
/// └─────────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UnsafePayload {
    #[error("unexpected tag type {type_id:#04X}")]
    UnknownTagType { type_id: u8 },

    #[error("unexpected root tag {found} (expected Compound)")]
    RootNotCompound { found: TagType },

    #[error("unexpected root tag key {key:?}")]
    RootKeyNotEmpty { key: String },

    #[error("unexpected end tag outside compound")]
    StrayEndTag,

    #[error("unexpected list of end tags")]
    EndListType,

    /// A list or array count below zero. Refused outright rather than read
    /// as an empty collection, so a corrupt count never passes silently.
    #[error("negative {kind} length ({length})")]
    NegativeLength { kind: TagType, length: i32 },

    /// Surfaced from [`ListTag::push`](nbt_types::ListTag::push). The decoder
    /// reads every element as the declared type, so this only fires if that
    /// invariant is broken.
    #[error(transparent)]
    ListElementMismatch(#[from] TypeError),

    #[error("maximum {limit} exceeded ({actual}, max {max})")]
    LimitExceeded {
        limit: Limit,
        actual: usize,
        max: usize,
    },
}

/// The configurable bounds, one per [`DecoderConfig`](crate::DecoderConfig)
/// limit field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Limit {
    /// Nesting of lists and compounds, root included.
    TraversalDepth,
    /// Members of one compound.
    CompoundSize,
    /// Declared element count of one list.
    ListSize,
    /// String UTF-16 units, byte array or int array elements.
    ContiguousSize,
    /// UTF-16 units in a tag key.
    KeyLength,
    /// Tags constructed in one decode call.
    AllocatedTags,
}

impl Limit {
    /// Name of the [`DecoderConfig`](crate::DecoderConfig) field that sets
    /// this limit.
    #[must_use]
    pub fn config_field(self) -> &'static str {
        match self {
            Self::TraversalDepth => "max_traversal_depth",
            Self::CompoundSize => "max_compound_size",
            Self::ListSize => "max_list_size",
            Self::ContiguousSize => "max_contiguous_size",
            Self::KeyLength => "max_key_length",
            Self::AllocatedTags => "max_allocated_tags",
        }
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::TraversalDepth => "struct depth",
            Self::CompoundSize => "compound size",
            Self::ListSize => "list size",
            Self::ContiguousSize => "contiguous size",
            Self::KeyLength => "tag key length",
            Self::AllocatedTags => "allocated tags",
        })
    }
}
