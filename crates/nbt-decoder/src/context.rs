use nbt_types::TagType;

use crate::config::DecoderConfig;
use crate::error::{Limit, UnsafePayload};

/// Mutable state of one decode call.
///
/// Created fresh by every [`BoundedTreeDecoder::decode`] call and dropped
/// when it returns, so nothing leaks between calls and one decoder can
/// serve many threads. The recursive descent borrows it exclusively.
///
/// [`BoundedTreeDecoder::decode`]: crate::BoundedTreeDecoder::decode
pub(crate) struct DecodeContext<'a> {
    config: &'a DecoderConfig,
    /// Open structures, innermost last. Only `List` and `Compound` appear.
    stack: Vec<TagType>,
    allocated: usize,
}

impl<'a> DecodeContext<'a> {
    pub(crate) fn new(config: &'a DecoderConfig) -> Self {
        Self {
            config,
            stack: Vec::with_capacity(config.max_traversal_depth.min(64)),
            allocated: 0,
        }
    }

    pub(crate) fn config(&self) -> &DecoderConfig {
        self.config
    }

    pub(crate) fn allocated(&self) -> usize {
        self.allocated
    }

    /// End tags are legal only as the terminator of the innermost compound.
    pub(crate) fn is_in_compound(&self) -> bool {
        self.stack.last() == Some(&TagType::Compound)
    }

    /// Fail if `actual` is above the configured maximum for `limit`.
    pub(crate) fn check(&self, limit: Limit, actual: usize) -> Result<(), UnsafePayload> {
        let max = self.config.limit(limit);
        if actual > max {
            return Err(UnsafePayload::LimitExceeded { limit, actual, max });
        }
        Ok(())
    }

    /// Charge one tag against the allocation cap. Call before building it.
    pub(crate) fn allocate(&mut self) -> Result<(), UnsafePayload> {
        let next = self.allocated.saturating_add(1);
        self.check(Limit::AllocatedTags, next)?;
        self.allocated = next;
        Ok(())
    }

    /// Open a structure. The depth check runs before the push.
    pub(crate) fn enter(&mut self, structure: TagType) -> Result<(), UnsafePayload> {
        debug_assert!(structure.is_structural());
        self.check(Limit::TraversalDepth, self.stack.len() + 1)?;
        self.stack.push(structure);
        log::trace!("enter {structure} at depth {}", self.stack.len());
        Ok(())
    }

    pub(crate) fn leave(&mut self) {
        if let Some(structure) = self.stack.pop() {
            log::trace!("leave {structure} at depth {}", self.stack.len() + 1);
        }
    }
}
