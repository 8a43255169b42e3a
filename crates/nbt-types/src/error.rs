use crate::tag_type::TagType;

/// Errors raised by the tag data model itself.
///
/// These guard the model's own invariants, independent of any wire
/// format. The decoder maps them onto its payload-level errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// An item was pushed onto a list whose element type differs.
    ///
    /// Every element of a list shares the list's declared element type.
    #[error("list of {expected} cannot hold a {found} element")]
    ListElementMismatch { expected: TagType, found: TagType },
}
