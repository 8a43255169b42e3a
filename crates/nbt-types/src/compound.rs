use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::tag::Tag;

/// A keyed collection of tags.
///
/// Keys are unique. Inserting under an existing key replaces the previous
/// value (last write wins), which is how duplicate keys in a stream
/// resolve. Iteration is ordered by key so dumps and comparisons are
/// deterministic.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompoundTag {
    members: BTreeMap<String, Tag>,
}

impl CompoundTag {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `tag` under `key`, returning the value it replaced.
    pub fn insert(&mut self, key: impl Into<String>, tag: Tag) -> Option<Tag> {
        self.members.insert(key.into(), tag)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Tag> {
        self.members.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Tag> {
        self.members.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.members.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Tag> {
        self.members.iter()
    }

    pub fn keys(&self) -> btree_map::Keys<'_, String, Tag> {
        self.members.keys()
    }

    pub fn values(&self) -> btree_map::Values<'_, String, Tag> {
        self.members.values()
    }
}

impl<'a> IntoIterator for &'a CompoundTag {
    type Item = (&'a String, &'a Tag);
    type IntoIter = btree_map::Iter<'a, String, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>> FromIterator<(K, Tag)> for CompoundTag {
    fn from_iter<I: IntoIterator<Item = (K, Tag)>>(iter: I) -> Self {
        let mut compound = Self::new();
        for (key, tag) in iter {
            compound.insert(key, tag);
        }
        compound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut compound = CompoundTag::new();
        assert!(compound.insert("health", Tag::Float(20.0)).is_none());
        assert_eq!(compound.get("health"), Some(&Tag::Float(20.0)));
        assert!(compound.get("missing").is_none());
    }

    #[test]
    fn last_write_wins() {
        let mut compound = CompoundTag::new();
        compound.insert("k", Tag::Int(1));
        let previous = compound.insert("k", Tag::String("two".into()));
        assert_eq!(previous, Some(Tag::Int(1)));
        assert_eq!(compound.len(), 1);
        assert_eq!(compound.get("k"), Some(&Tag::String("two".into())));
    }

    #[test]
    fn iteration_is_key_ordered() {
        let compound: CompoundTag = [("b", Tag::Byte(2)), ("a", Tag::Byte(1)), ("c", Tag::Byte(3))]
            .into_iter()
            .collect();
        let keys: Vec<_> = compound.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let ab: CompoundTag = [("a", Tag::Int(1)), ("b", Tag::Int(2))].into_iter().collect();
        let ba: CompoundTag = [("b", Tag::Int(2)), ("a", Tag::Int(1))].into_iter().collect();
        assert_eq!(ab, ba);
    }
}
