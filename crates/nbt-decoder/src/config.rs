use crate::error::Limit;

/// Limits and policy flags for [`BoundedTreeDecoder`](crate::BoundedTreeDecoder).
///
/// Every length or count field read from the wire is checked against one of
/// these limits before it is used to size a read, drive a loop, or descend.
/// Together they bound the memory, time, and stack a single decode call can
/// consume, whatever the input claims about itself.
///
/// ```text
/// ┌──────────────────────┬─────────┬─────────────────────────────────────────┐
/// │ Field                │ Default │ Bounds                                  │
/// ├──────────────────────┼─────────┼─────────────────────────────────────────┤
/// │ max_traversal_depth  │ 5       │ list/compound nesting, root = depth 1   │
/// │ max_compound_size    │ 20      │ members per compound                    │
/// │ max_list_size        │ 100     │ declared elements per list              │
/// │ max_contiguous_size  │ 100     │ string UTF-16 units, array elements     │
/// │ max_key_length       │ 32      │ UTF-16 units per tag key                │
/// │ max_allocated_tags   │ 512     │ tags constructed per decode call        │
/// │ allow_any_root_tag   │ false   │ root must be Compound with key ""       │
/// │ allow_stray_end_tags │ false   │ End only as a compound terminator       │
/// └──────────────────────┴─────────┴─────────────────────────────────────────┘
/// ```
///
/// The defaults are deliberately tight: they fit the small item and entity
/// payloads a game client sends, not whole world files. Raise them for
/// trusted bulk data.
///
/// Recursion depth is bounded by `max_traversal_depth`, so that value also
/// bounds the native stack used by a decode call. Keep it modest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_traversal_depth: usize,
    pub max_compound_size: usize,
    pub max_list_size: usize,
    pub max_contiguous_size: usize,
    pub max_key_length: usize,
    pub max_allocated_tags: usize,

    /// Accept any tag type and key at the top of the stream.
    ///
    /// Well-formed payloads always start with an empty-keyed compound.
    pub allow_any_root_tag: bool,

    /// Accept End tags as list element types and list elements.
    ///
    /// Well-formed payloads never contain them.
    pub allow_stray_end_tags: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_traversal_depth: 5,
            max_compound_size: 20,
            max_list_size: 100,
            max_contiguous_size: 100,
            max_key_length: 32,
            max_allocated_tags: 512,
            allow_any_root_tag: false,
            allow_stray_end_tags: false,
        }
    }
}

impl DecoderConfig {
    /// Default limits with both policy flags switched on.
    ///
    /// Useful for decoding individual tags that were not written as a
    /// complete document. Size limits still apply.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allow_any_root_tag: true,
            allow_stray_end_tags: true,
            ..Self::default()
        }
    }

    /// The configured maximum for `limit`.
    #[must_use]
    pub fn limit(&self, limit: Limit) -> usize {
        match limit {
            Limit::TraversalDepth => self.max_traversal_depth,
            Limit::CompoundSize => self.max_compound_size,
            Limit::ListSize => self.max_list_size,
            Limit::ContiguousSize => self.max_contiguous_size,
            Limit::KeyLength => self.max_key_length,
            Limit::AllocatedTags => self.max_allocated_tags,
        }
    }

    #[must_use]
    pub fn with_max_traversal_depth(mut self, value: usize) -> Self {
        self.max_traversal_depth = value;
        self
    }

    #[must_use]
    pub fn with_max_compound_size(mut self, value: usize) -> Self {
        self.max_compound_size = value;
        self
    }

    #[must_use]
    pub fn with_max_list_size(mut self, value: usize) -> Self {
        self.max_list_size = value;
        self
    }

    #[must_use]
    pub fn with_max_contiguous_size(mut self, value: usize) -> Self {
        self.max_contiguous_size = value;
        self
    }

    #[must_use]
    pub fn with_max_key_length(mut self, value: usize) -> Self {
        self.max_key_length = value;
        self
    }

    #[must_use]
    pub fn with_max_allocated_tags(mut self, value: usize) -> Self {
        self.max_allocated_tags = value;
        self
    }

    #[must_use]
    pub fn with_allow_any_root_tag(mut self, value: bool) -> Self {
        self.allow_any_root_tag = value;
        self
    }

    #[must_use]
    pub fn with_allow_stray_end_tags(mut self, value: bool) -> Self {
        self.allow_stray_end_tags = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_traversal_depth, 5);
        assert_eq!(config.max_compound_size, 20);
        assert_eq!(config.max_list_size, 100);
        assert_eq!(config.max_contiguous_size, 100);
        assert_eq!(config.max_key_length, 32);
        assert_eq!(config.max_allocated_tags, 512);
        assert!(!config.allow_any_root_tag);
        assert!(!config.allow_stray_end_tags);
    }

    #[test]
    fn permissive_keeps_limits() {
        let config = DecoderConfig::permissive();
        assert!(config.allow_any_root_tag);
        assert!(config.allow_stray_end_tags);
        assert_eq!(config.max_allocated_tags, 512);
    }

    #[test]
    fn setters_chain() {
        let config = DecoderConfig::default()
            .with_max_traversal_depth(64)
            .with_max_list_size(4096)
            .with_allow_any_root_tag(true);
        assert_eq!(config.limit(Limit::TraversalDepth), 64);
        assert_eq!(config.limit(Limit::ListSize), 4096);
        assert_eq!(config.limit(Limit::CompoundSize), 20);
        assert!(config.allow_any_root_tag);
    }
}
