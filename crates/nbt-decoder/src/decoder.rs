use std::io::Read;

use nbt_types::{CompoundTag, ListTag, NamedTag, Tag, TagType};
use nbt_wire::{DataInput, DataReader};

use crate::config::DecoderConfig;
use crate::context::DecodeContext;
use crate::error::{DecodeError, Limit, UnsafePayload};

/// Recursive-descent tag decoder that refuses payloads exceeding its limits.
///
/// Every count or length read from the wire is validated before it is used,
/// and every structure is depth-checked before it is entered:
///
/// ```text
///   read type byte ─► range / stray End / root policy
///        │
///   read key ──────► key length, root key policy
///        │
///   allocate ──────► allocation cap
///        │
///   payload ─┬─ scalar ──────► fixed-width read
///            ├─ string ──────► contiguous size
///            ├─ byte/int arr ► count ≥ 0, contiguous size, then read
///            ├─ list ────────► depth, element type, count ≤ list size,
///            │                 then per element: allocate + payload
///            └─ compound ────► depth, then per member: compound size,
///                              key, allocate, payload, until End
/// ```
///
/// The decoder itself is immutable: each call builds a private
/// [`DecodeContext`] holding the recursion stack and allocation counter, so
/// a single decoder can be shared freely between threads.
///
/// # Example
///
/// ```rust
/// use nbt_decoder::BoundedTreeDecoder;
/// use nbt_types::Tag;
///
/// // Root compound "" { "hp": Short(20) }
/// let bytes = [
///     0x0A, 0x00, 0x00,
///     0x02, 0x00, 0x02, b'h', b'p', 0x00, 0x14,
///     0x00,
/// ];
/// let root = BoundedTreeDecoder::default().decode_slice(&bytes).unwrap();
/// let compound = root.tag.as_compound().unwrap();
/// assert_eq!(compound.get("hp"), Some(&Tag::Short(20)));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoundedTreeDecoder {
    config: DecoderConfig,
}

impl BoundedTreeDecoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode one tag tree from `input`.
    ///
    /// Reads exactly the bytes of one tree and leaves anything after it
    /// unread.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsafePayload`] if a limit or structural rule is
    ///   violated. See [`UnsafePayload`] for the individual causes.
    /// - [`DecodeError::Io`] if the input ends early, a string is not
    ///   valid modified UTF-8, or the underlying reader fails.
    pub fn decode<I: DataInput>(&self, input: &mut I) -> Result<NamedTag, DecodeError> {
        let mut ctx = DecodeContext::new(&self.config);
        match ctx.decode_root(input) {
            Ok(root) => {
                log::debug!(
                    "decoded {} root: {} tags, {} bytes",
                    root.tag.tag_type(),
                    ctx.allocated(),
                    input.position()
                );
                Ok(root)
            }
            Err(err) => {
                log::debug!("rejected payload at offset {}: {err}", input.position());
                Err(err)
            }
        }
    }

    /// Decode one tag tree from an in-memory buffer.
    ///
    /// Trailing bytes after the tree are ignored.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_slice(&self, bytes: &[u8]) -> Result<NamedTag, DecodeError> {
        self.decode(&mut DataReader::new(bytes))
    }

    /// Decode one tag tree from any [`Read`] source.
    ///
    /// # Errors
    ///
    /// Same as [`decode`](Self::decode).
    pub fn decode_reader<R: Read>(&self, reader: R) -> Result<NamedTag, DecodeError> {
        self.decode(&mut DataReader::new(reader))
    }
}

impl DecodeContext<'_> {
    fn decode_root<I: DataInput>(&mut self, input: &mut I) -> Result<NamedTag, DecodeError> {
        let tag_type = self.read_tag_type(input)?;
        let any_root = self.config().allow_any_root_tag;
        if tag_type != TagType::Compound && !any_root {
            return Err(UnsafePayload::RootNotCompound { found: tag_type }.into());
        }
        // A bare End has no key and no payload and is not charged.
        if tag_type == TagType::End {
            return Ok(NamedTag::root(Tag::End));
        }

        let key = self.read_key(input)?;
        if !key.is_empty() && !any_root {
            return Err(UnsafePayload::RootKeyNotEmpty { key }.into());
        }

        self.allocate()?;
        let tag = self.decode_payload(input, tag_type)?;
        Ok(NamedTag::new(key, tag))
    }

    fn read_tag_type<I: DataInput>(&self, input: &mut I) -> Result<TagType, DecodeError> {
        let type_id = input.read_u8()?;
        let tag_type =
            TagType::from_wire_id(type_id).ok_or(UnsafePayload::UnknownTagType { type_id })?;
        if tag_type == TagType::End
            && !self.is_in_compound()
            && !self.config().allow_stray_end_tags
        {
            return Err(UnsafePayload::StrayEndTag.into());
        }
        Ok(tag_type)
    }

    fn read_key<I: DataInput>(&self, input: &mut I) -> Result<String, DecodeError> {
        let key = input.read_utf()?;
        self.check(Limit::KeyLength, utf16_len(&key))?;
        Ok(key)
    }

    /// Read an `i32` count field and validate it against `limit`.
    fn read_length<I: DataInput>(
        &self,
        input: &mut I,
        kind: TagType,
        limit: Limit,
    ) -> Result<usize, DecodeError> {
        let length = input.read_i32()?;
        let count =
            usize::try_from(length).map_err(|_| UnsafePayload::NegativeLength { kind, length })?;
        self.check(limit, count)?;
        Ok(count)
    }

    fn decode_payload<I: DataInput>(
        &mut self,
        input: &mut I,
        tag_type: TagType,
    ) -> Result<Tag, DecodeError> {
        let tag = match tag_type {
            TagType::End => Tag::End,
            TagType::Byte => Tag::Byte(input.read_i8()?),
            TagType::Short => Tag::Short(input.read_i16()?),
            TagType::Int => Tag::Int(input.read_i32()?),
            TagType::Long => Tag::Long(input.read_i64()?),
            TagType::Float => Tag::Float(input.read_f32()?),
            TagType::Double => Tag::Double(input.read_f64()?),
            TagType::ByteArray => {
                let count = self.read_length(input, tag_type, Limit::ContiguousSize)?;
                let bytes = input.read_bytes(count)?;
                Tag::ByteArray(bytes.into_iter().map(|b| i8::from_be_bytes([b])).collect())
            }
            TagType::String => {
                let value = input.read_utf()?;
                self.check(Limit::ContiguousSize, utf16_len(&value))?;
                Tag::String(value)
            }
            TagType::IntArray => {
                let count = self.read_length(input, tag_type, Limit::ContiguousSize)?;
                let values = (0..count)
                    .map(|_| input.read_i32())
                    .collect::<Result<Vec<_>, _>>()?;
                Tag::IntArray(values)
            }
            TagType::List => {
                self.enter(TagType::List)?;
                let list = self.decode_list(input);
                self.leave();
                Tag::List(list?)
            }
            TagType::Compound => {
                self.enter(TagType::Compound)?;
                let compound = self.decode_compound(input);
                self.leave();
                Tag::Compound(compound?)
            }
        };
        Ok(tag)
    }

    fn decode_list<I: DataInput>(&mut self, input: &mut I) -> Result<ListTag, DecodeError> {
        let type_id = input.read_u8()?;
        let element_type =
            TagType::from_wire_id(type_id).ok_or(UnsafePayload::UnknownTagType { type_id })?;
        if element_type == TagType::End && !self.config().allow_stray_end_tags {
            return Err(UnsafePayload::EndListType.into());
        }

        let count = self.read_length(input, TagType::List, Limit::ListSize)?;
        if count == 0 {
            return Ok(ListTag::default());
        }

        let mut list = ListTag::new(element_type);
        for _ in 0..count {
            self.allocate()?;
            let item = self.decode_payload(input, element_type)?;
            // Guards the list invariant only; `item` was read as `element_type`.
            list.push(item).map_err(UnsafePayload::from)?;
        }
        Ok(list)
    }

    fn decode_compound<I: DataInput>(
        &mut self,
        input: &mut I,
    ) -> Result<CompoundTag, DecodeError> {
        let mut compound = CompoundTag::new();
        let mut members = 0usize;
        loop {
            let tag_type = self.read_tag_type(input)?;
            if tag_type == TagType::End {
                return Ok(compound);
            }

            members += 1;
            self.check(Limit::CompoundSize, members)?;

            let key = self.read_key(input)?;
            self.allocate()?;
            let tag = self.decode_payload(input, tag_type)?;
            compound.insert(key, tag);
        }
    }
}

/// Length of `s` in UTF-16 code units, the unit string and key limits are
/// measured in. A character above U+FFFF counts as two.
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}
