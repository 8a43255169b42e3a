/// Implementation of `safebt validate`.
///
/// Runs one bounded decode and reports the verdict. The command exits with
/// code 0 on an accepted payload and code 1 otherwise (the dispatcher in
/// `main.rs` converts `Err` to exit code 1).
///
/// # Success output
///
/// ```text
/// ✓ Input: 1840 bytes (gzip, 512 on disk)
/// ✓ Root: Compound "" within limits
/// ✓ Tags: 57 allocated, depth 3
/// ```
///
/// # Failure output
///
/// Refused payloads name the limit flag that would have to change; broken
/// payloads are reported as corrupt.
///
/// ```text
/// ✗ Unsafe: maximum list size exceeded (4096, max 100) [--max-list-size]
/// ✗ Corrupt: unexpected end of input at offset 37
/// ```
use anyhow::{Result, anyhow};
use nbt_decoder::{DecodeError, Limit, UnsafePayload};

use crate::ValidateArgs;
use crate::source;

/// Run the `safebt validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if the payload is
/// refused or corrupt.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let payload = source::load(&args.file, args.limits.max_input_bytes)?;
    if payload.gzipped {
        println!(
            "✓ Input: {} bytes (gzip, {} on disk)",
            payload.bytes.len(),
            payload.file_size
        );
    } else {
        println!("✓ Input: {} bytes", payload.bytes.len());
    }

    match args.limits.decoder().decode_slice(&payload.bytes) {
        Ok(root) => {
            println!("✓ Root: {} {:?} within limits", root.tag.tag_type(), root.key);
            println!(
                "✓ Tags: {} allocated, depth {}",
                root.tag.tag_count(),
                root.tag.depth()
            );
            Ok(())
        }
        Err(e) => {
            println!("✗ {}", diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// One-line verdict for a failed decode.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────────┐
/// │ DecodeError              │ Line                                     │
/// ├──────────────────────────┼──────────────────────────────────────────┤
/// │ UnsafePayload(Limit…)    │ "Unsafe: <reason> [--<flag>]"            │
/// │ UnsafePayload(root…)     │ "Unsafe: <reason> [--allow-any-root]"    │
/// │ UnsafePayload(End…)      │ "Unsafe: <reason> [--allow-stray-end]"   │
/// │ UnsafePayload(other)     │ "Unsafe: <reason>"                       │
/// │ Io                       │ "Corrupt: <reason>"                      │
/// └──────────────────────────┴──────────────────────────────────────────┘
/// ```
fn diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::UnsafePayload(reason) => match remedy_flag(reason) {
            Some(flag) => format!("Unsafe: {reason} [--{flag}]"),
            None => format!("Unsafe: {reason}"),
        },
        DecodeError::Io(inner) => format!("Corrupt: {inner}"),
    }
}

fn remedy_flag(reason: &UnsafePayload) -> Option<&'static str> {
    match reason {
        UnsafePayload::LimitExceeded { limit, .. } => Some(match limit {
            Limit::TraversalDepth => "max-depth",
            Limit::CompoundSize => "max-compound-size",
            Limit::ListSize => "max-list-size",
            Limit::ContiguousSize => "max-contiguous-size",
            Limit::KeyLength => "max-key-length",
            Limit::AllocatedTags => "max-allocated-tags",
        }),
        UnsafePayload::RootNotCompound { .. } | UnsafePayload::RootKeyNotEmpty { .. } => {
            Some("allow-any-root")
        }
        UnsafePayload::StrayEndTag | UnsafePayload::EndListType => Some("allow-stray-end"),
        UnsafePayload::UnknownTagType { .. }
        | UnsafePayload::NegativeLength { .. }
        | UnsafePayload::ListElementMismatch(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use nbt_types::TagType;
    use nbt_wire::WireError;

    use super::*;

    #[test]
    fn limit_violation_names_flag() {
        let e = DecodeError::from(UnsafePayload::LimitExceeded {
            limit: Limit::ListSize,
            actual: 4096,
            max: 100,
        });
        assert_eq!(
            diagnostic(&e),
            "Unsafe: maximum list size exceeded (4096, max 100) [--max-list-size]"
        );
    }

    #[test]
    fn root_violation_names_flag() {
        let e = DecodeError::from(UnsafePayload::RootNotCompound {
            found: TagType::Int,
        });
        assert_eq!(
            diagnostic(&e),
            "Unsafe: unexpected root tag Int (expected Compound) [--allow-any-root]"
        );
    }

    #[test]
    fn unknown_type_has_no_remedy() {
        let e = DecodeError::from(UnsafePayload::UnknownTagType { type_id: 0x2A });
        assert_eq!(diagnostic(&e), "Unsafe: unexpected tag type 0x2A");
    }

    #[test]
    fn io_is_corrupt() {
        let e = DecodeError::from(WireError::UnexpectedEof { offset: 37 });
        assert_eq!(
            diagnostic(&e),
            "Corrupt: unexpected end of input at offset 37"
        );
    }
}
