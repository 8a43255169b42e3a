/// Implementation of `safebt inspect`.
///
/// Decodes the payload under the configured limits and prints the tree.
///
/// # Text output
///
/// ```text
/// Compound "" (3 entries)
///   List "Inventory" (2 × Compound)
///     Compound (2 entries)
///       Byte "Count": 64
///       String "id": "minecraft:stone"
///     Compound (0 entries)
///   ByteArray "Seed": [4 bytes] 0102ff80
///   Short "hp": 20
/// ```
///
/// # JSON output (`--json`)
///
/// Compounds become objects, lists and int arrays become arrays, byte
/// arrays become hex strings. Non-finite floats become `null`. The root key
/// is dropped; only its value is emitted.
use std::fmt::Write as _;

use anyhow::{Context, Result};
use nbt_types::Tag;
use serde_json::{Map, Value};

use crate::InspectArgs;
use crate::source;

/// Run the `safebt inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the payload is refused or
/// corrupt.
pub fn run(args: &InspectArgs) -> Result<()> {
    let payload = source::load(&args.file, args.limits.max_input_bytes)?;
    let root = args
        .limits
        .decoder()
        .decode_slice(&payload.bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_json(&root.tag))?);
    } else {
        let mut out = String::new();
        write_tree(&mut out, Some(root.key.as_str()), &root.tag, 0, args.preview);
        print!("{out}");
    }
    Ok(())
}

// ── Text tree ─────────────────────────────────────────────────────────────────

fn write_tree(out: &mut String, key: Option<&str>, tag: &Tag, indent: usize, preview: usize) {
    let pad = "  ".repeat(indent);
    let label = match key {
        Some(key) => format!("{pad}{} {key:?}", tag.tag_type()),
        None => format!("{pad}{}", tag.tag_type()),
    };

    match tag {
        Tag::Compound(compound) => {
            let n = compound.len();
            let _ = writeln!(out, "{label} ({n} entr{})", if n == 1 { "y" } else { "ies" });
            for (child_key, child) in compound {
                write_tree(out, Some(child_key.as_str()), child, indent + 1, preview);
            }
        }
        Tag::List(list) => {
            let _ = writeln!(out, "{label} ({} × {})", list.len(), list.element_type());
            for child in list {
                write_tree(out, None, child, indent + 1, preview);
            }
        }
        _ => {
            let _ = writeln!(out, "{label}: {}", scalar_text(tag, preview));
        }
    }
}

fn scalar_text(tag: &Tag, preview: usize) -> String {
    match tag {
        Tag::End => "(end)".to_string(),
        Tag::Byte(v) => v.to_string(),
        Tag::Short(v) => v.to_string(),
        Tag::Int(v) => v.to_string(),
        Tag::Long(v) => format!("{v}L"),
        Tag::Float(v) => format!("{v}f"),
        Tag::Double(v) => format!("{v}d"),
        Tag::String(s) => format!("{s:?}"),
        Tag::ByteArray(values) => {
            let shown: Vec<u8> = values.iter().take(preview).map(|b| unsigned(*b)).collect();
            let more = if values.len() > preview { "…" } else { "" };
            format!("[{} bytes] {}{more}", values.len(), hex::encode(shown))
        }
        Tag::IntArray(values) => {
            let shown: Vec<String> = values.iter().take(preview).map(ToString::to_string).collect();
            let more = if values.len() > preview { ", …" } else { "" };
            format!("[{} ints] [{}{more}]", values.len(), shown.join(", "))
        }
        Tag::List(_) | Tag::Compound(_) => String::new(),
    }
}

fn unsigned(byte: i8) -> u8 {
    u8::from_be_bytes(byte.to_be_bytes())
}

// ── JSON ──────────────────────────────────────────────────────────────────────

/// Convert a decoded tag into a JSON value.
fn to_json(tag: &Tag) -> Value {
    match tag {
        Tag::End => Value::Null,
        Tag::Byte(v) => Value::from(*v),
        Tag::Short(v) => Value::from(*v),
        Tag::Int(v) => Value::from(*v),
        Tag::Long(v) => Value::from(*v),
        Tag::Float(v) => Value::from(f64::from(*v)),
        Tag::Double(v) => Value::from(*v),
        Tag::ByteArray(values) => {
            Value::String(hex::encode(values.iter().map(|b| unsigned(*b)).collect::<Vec<_>>()))
        }
        Tag::String(s) => Value::String(s.clone()),
        Tag::List(list) => Value::Array(list.iter().map(to_json).collect()),
        Tag::Compound(compound) => Value::Object(
            compound
                .iter()
                .map(|(key, child)| (key.clone(), to_json(child)))
                .collect::<Map<_, _>>(),
        ),
        Tag::IntArray(values) => Value::Array(values.iter().map(|v| Value::from(*v)).collect()),
    }
}
