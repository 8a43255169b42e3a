use crate::compound::CompoundTag;
use crate::list::ListTag;
use crate::tag_type::TagType;

/// One decoded tag value.
///
/// The variant is the tag type; the payload is the value. Keys are not
/// stored here: a compound owns the key of each member, a list's elements
/// have none, and the root carries its key in [`NamedTag`].
///
/// Equality is structural. Floating-point payloads compare with IEEE
/// semantics, so a tree containing `NaN` is not equal to itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    /// The compound terminator. Only surfaces as a value when the decoder
    /// is configured to tolerate stray End tags.
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(ListTag),
    Compound(CompoundTag),
    IntArray(Vec<i32>),
}

impl Tag {
    /// The wire type of this value.
    #[must_use]
    pub fn tag_type(&self) -> TagType {
        match self {
            Self::End => TagType::End,
            Self::Byte(_) => TagType::Byte,
            Self::Short(_) => TagType::Short,
            Self::Int(_) => TagType::Int,
            Self::Long(_) => TagType::Long,
            Self::Float(_) => TagType::Float,
            Self::Double(_) => TagType::Double,
            Self::ByteArray(_) => TagType::ByteArray,
            Self::String(_) => TagType::String,
            Self::List(_) => TagType::List,
            Self::Compound(_) => TagType::Compound,
            Self::IntArray(_) => TagType::IntArray,
        }
    }

    #[must_use]
    pub fn as_compound(&self) -> Option<&CompoundTag> {
        match self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&ListTag> {
        match self {
            Self::List(list) => Some(list),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Any integral scalar widened to `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::Byte(v) => Some(i64::from(v)),
            Self::Short(v) => Some(i64::from(v)),
            Self::Int(v) => Some(i64::from(v)),
            Self::Long(v) => Some(v),
            _ => None,
        }
    }

    /// Count every tag in this subtree, this one included.
    ///
    /// End values count like any other value, matching what the decoder
    /// charges against its allocation cap for list elements.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        1 + match self {
            Self::List(list) => list.iter().map(Tag::tag_count).sum(),
            Self::Compound(compound) => compound.values().map(Tag::tag_count).sum(),
            _ => 0,
        }
    }

    /// Nesting depth of lists and compounds in this subtree.
    ///
    /// A scalar has depth 0; a compound of scalars has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::List(list) => 1 + list.iter().map(Tag::depth).max().unwrap_or(0),
            Self::Compound(compound) => 1 + compound.values().map(Tag::depth).max().unwrap_or(0),
            _ => 0,
        }
    }
}

impl From<CompoundTag> for Tag {
    fn from(compound: CompoundTag) -> Self {
        Self::Compound(compound)
    }
}

impl From<ListTag> for Tag {
    fn from(list: ListTag) -> Self {
        Self::List(list)
    }
}

/// A tag together with its key, as read at the top of a stream.
///
/// The root of a well-formed payload is a compound with an empty key.
#[derive(Clone, Debug, PartialEq)]
pub struct NamedTag {
    pub key: String,
    pub tag: Tag,
}

impl NamedTag {
    pub fn new(key: impl Into<String>, tag: Tag) -> Self {
        Self {
            key: key.into(),
            tag,
        }
    }

    /// An empty-keyed root around `tag`.
    #[must_use]
    pub fn root(tag: Tag) -> Self {
        Self::new(String::new(), tag)
    }
}
