use crate::error::TypeError;
use crate::tag::Tag;
use crate::tag_type::TagType;

/// A homogeneous, ordered sequence of tags.
///
/// The element type is fixed at construction and every pushed item must
/// match it. Elements carry no key.
///
/// An empty list has no elements to witness its type, so the wire format
/// does not preserve it: the default (and the decoded form of any empty
/// list) uses [`TagType::Byte`].
#[derive(Clone, Debug, PartialEq)]
pub struct ListTag {
    element_type: TagType,
    items: Vec<Tag>,
}

impl ListTag {
    /// Create an empty list that will hold `element_type` items.
    #[must_use]
    pub fn new(element_type: TagType) -> Self {
        Self::with_capacity(element_type, 0)
    }

    /// Create an empty list with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(element_type: TagType, capacity: usize) -> Self {
        Self {
            element_type,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Build a list from existing items.
    ///
    /// # Errors
    ///
    /// [`TypeError::ListElementMismatch`] if any item's type differs from
    /// `element_type`.
    pub fn from_items(element_type: TagType, items: Vec<Tag>) -> Result<Self, TypeError> {
        let mut list = Self::with_capacity(element_type, items.len());
        for item in items {
            list.push(item)?;
        }
        Ok(list)
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// [`TypeError::ListElementMismatch`] if the item's type differs from
    /// the list's element type. The list is left unchanged.
    pub fn push(&mut self, item: Tag) -> Result<(), TypeError> {
        let found = item.tag_type();
        if found != self.element_type {
            return Err(TypeError::ListElementMismatch {
                expected: self.element_type,
                found,
            });
        }
        self.items.push(item);
        Ok(())
    }

    #[must_use]
    pub fn element_type(&self) -> TagType {
        self.element_type
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<Tag> {
        self.items
    }
}

impl Default for ListTag {
    fn default() -> Self {
        Self::new(TagType::Byte)
    }
}

impl<'a> IntoIterator for &'a ListTag {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_matching_items() {
        let mut list = ListTag::new(TagType::Short);
        list.push(Tag::Short(1)).unwrap();
        list.push(Tag::Short(-1)).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(1), Some(&Tag::Short(-1)));
    }

    #[test]
    fn push_mismatched_item_rejected() {
        let mut list = ListTag::new(TagType::Int);
        let err = list.push(Tag::Long(1)).unwrap_err();
        assert_eq!(
            err,
            TypeError::ListElementMismatch {
                expected: TagType::Int,
                found: TagType::Long,
            }
        );
        assert!(list.is_empty());
    }

    #[test]
    fn from_items_checks_every_item() {
        let result = ListTag::from_items(
            TagType::String,
            vec![Tag::String("a".into()), Tag::Byte(0)],
        );
        assert!(result.is_err());
    }

    #[test]
    fn default_is_empty_byte_list() {
        let list = ListTag::default();
        assert!(list.is_empty());
        assert_eq!(list.element_type(), TagType::Byte);
    }

    #[test]
    fn empty_lists_of_different_types_differ() {
        assert_ne!(ListTag::new(TagType::Int), ListTag::new(TagType::Byte));
    }
}
