//! Golden fixture generator for the conformance tests.
//!
//! Writes every fixture under `tests/golden/`. Run it after changing the
//! reference encoder or the sample document, then commit the output.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p nbt-tests
//! ```
//!
//! # Generated fixtures
//!
//! | File            | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | player.nbt      | `sample_player()`, accepted under default limits      |
//! | list_bomb.nbt   | List declaring `i32::MAX` Long elements, none present |

#![allow(clippy::pedantic)]

use std::path::Path;

use nbt_tests::{PayloadBuilder, encode_named, sample_player};
use nbt_types::TagType;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");
    std::fs::create_dir_all(&golden_dir).expect("create golden dir");

    write(&golden_dir, "player.nbt", &encode_named(&sample_player()));

    let bomb = PayloadBuilder::new()
        .root()
        .named(TagType::List, "bomb")
        .tag_type(TagType::Long)
        .i32(i32::MAX)
        .build();
    write(&golden_dir, "list_bomb.nbt", &bomb);

    println!("All golden fixtures written to {}", golden_dir.display());
}

fn write(dir: &Path, name: &str, bytes: &[u8]) {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap_or_else(|e| panic!("write {}: {e}", path.display()));
    println!("  {name:<16} {:>5} bytes  {}", bytes.len(), hex_prefix(bytes));
}

fn hex_prefix(bytes: &[u8]) -> String {
    let shown = &bytes[..bytes.len().min(12)];
    let suffix = if bytes.len() > shown.len() { "…" } else { "" };
    format!("{}{suffix}", hex::encode(shown))
}
