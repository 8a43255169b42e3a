/// Implementation of `safebt stats`.
///
/// Decodes the payload and prints its shape: how many tags of each type it
/// holds, how deep it nests, and how close it sits to each decoder limit.
///
/// # Example output
///
/// ```text
/// File:    level.dat  (512 bytes, gzip → 1840 bytes)
/// Root:    Compound ""
///
/// Type          Count
/// ───────────────────
/// Byte              9
/// Int              12
/// String            4
/// List              2
/// Compound          6
/// ───────────────────
/// Total            33
///
/// Depth:       3 / 5
/// Allocated:  33 / 512
/// ```
use std::collections::BTreeMap;

use anyhow::{Context, Result};
use nbt_types::{Tag, TagType};

use crate::StatsArgs;
use crate::source;

/// Run the `safebt stats` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the payload is refused or
/// corrupt.
pub fn run(args: &StatsArgs) -> Result<()> {
    let payload = source::load(&args.file, args.limits.max_input_bytes)?;
    let decoder = args.limits.decoder();
    let root = decoder
        .decode_slice(&payload.bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if payload.gzipped {
        println!(
            "File:    {}  ({} bytes, gzip → {} bytes)",
            args.file.display(),
            payload.file_size,
            payload.bytes.len()
        );
    } else {
        println!(
            "File:    {}  ({} bytes)",
            args.file.display(),
            payload.file_size
        );
    }
    println!("Root:    {} {:?}", root.tag.tag_type(), root.key);
    println!();

    let counts = count_by_type(&root.tag);
    let total: usize = counts.values().sum();
    let rule = "─".repeat(19);

    println!("{:<12} {:>6}", "Type", "Count");
    println!("{rule}");
    for (tag_type, count) in &counts {
        println!("{:<12} {count:>6}", tag_type.name());
    }
    println!("{rule}");
    println!("{:<12} {total:>6}", "Total");
    println!();

    let config = decoder.config();
    println!(
        "Depth:     {:>3} / {}",
        root.tag.depth(),
        config.max_traversal_depth
    );
    println!("Allocated: {total:>3} / {}", config.max_allocated_tags);
    Ok(())
}

/// Tags per type in the subtree rooted at `tag`, in wire-id order.
fn count_by_type(tag: &Tag) -> BTreeMap<TagType, usize> {
    let mut counts = BTreeMap::new();
    let mut pending = vec![tag];
    while let Some(tag) = pending.pop() {
        *counts.entry(tag.tag_type()).or_insert(0) += 1;
        match tag {
            Tag::List(list) => pending.extend(list.iter()),
            Tag::Compound(compound) => pending.extend(compound.values()),
            _ => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use nbt_types::{CompoundTag, ListTag};

    use super::*;

    #[test]
    fn counts_match_tag_count() {
        let list = ListTag::from_items(TagType::Int, vec![Tag::Int(1), Tag::Int(2)]).unwrap();
        let mut root = CompoundTag::new();
        root.insert("xs", Tag::List(list));
        root.insert("name", Tag::String("a".into()));
        let root = Tag::Compound(root);

        let counts = count_by_type(&root);
        assert_eq!(counts.get(&TagType::Int), Some(&2));
        assert_eq!(counts.get(&TagType::List), Some(&1));
        assert_eq!(counts.get(&TagType::Compound), Some(&1));
        assert_eq!(counts.get(&TagType::String), Some(&1));
        assert_eq!(counts.values().sum::<usize>(), root.tag_count());
        assert_eq!(
            counts.keys().copied().collect::<Vec<_>>(),
            vec![TagType::Int, TagType::String, TagType::List, TagType::Compound]
        );
    }
}
