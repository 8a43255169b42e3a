/// `safebt`: inspect, validate, and measure untrusted tag-tree payloads
/// with the bounded decoder.
///
/// # Command overview
///
/// ```text
/// safebt <COMMAND> [OPTIONS] <FILE>
///
/// Commands:
///   inspect    Print the decoded tree (indented text or JSON)
///   validate   Decode under the configured limits and report the verdict
///   stats      Print tag counts per type, depth and allocations
///   help       Print help information
///
/// Global options:
///   -v, --verbose    Log decoder activity (debug level; RUST_LOG overrides)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// Every command accepts the limit flags of [`LimitArgs`]. Unset flags keep
/// the decoder defaults. Gzip input (magic `1F 8B`) is decompressed
/// transparently.
///
/// # Exit codes
///
/// | Code | Meaning                                            |
/// |------|----------------------------------------------------|
/// | 0    | Success                                            |
/// | 1    | Error (I/O failure, unsafe or corrupt payload)     |
///
/// All error details are written to stderr so stdout can be piped cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use nbt_decoder::{BoundedTreeDecoder, DecoderConfig};

mod cmd_inspect;
mod cmd_stats;
mod cmd_validate;
mod source;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Bounded decoder for untrusted NBT-style tag payloads.
#[derive(Parser)]
#[command(name = "safebt", version, about = "Safe bounded tag-tree decoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log decoder activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded tag tree.
    Inspect(InspectArgs),
    /// Check a payload against the decoder limits.
    Validate(ValidateArgs),
    /// Print tag-count and depth statistics.
    Stats(StatsArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Decoder limit overrides shared by every command.
///
/// ```text
/// ┌───────────────────────┬─────────┬──────────────────────────────┐
/// │ Flag                  │ Default │ DecoderConfig field          │
/// ├───────────────────────┼─────────┼──────────────────────────────┤
/// │ --max-depth           │ 5       │ max_traversal_depth          │
/// │ --max-compound-size   │ 20      │ max_compound_size            │
/// │ --max-list-size       │ 100     │ max_list_size                │
/// │ --max-contiguous-size │ 100     │ max_contiguous_size          │
/// │ --max-key-length      │ 32      │ max_key_length               │
/// │ --max-allocated-tags  │ 512     │ max_allocated_tags           │
/// │ --allow-any-root      │ off     │ allow_any_root_tag           │
/// │ --allow-stray-end     │ off     │ allow_stray_end_tags         │
/// │ --max-input-bytes     │ 16 MiB  │ (CLI only) gzip output cap   │
/// └───────────────────────┴─────────┴──────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum list/compound nesting, root included.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Maximum members per compound.
    #[arg(long, value_name = "N")]
    pub max_compound_size: Option<usize>,

    /// Maximum declared elements per list.
    #[arg(long, value_name = "N")]
    pub max_list_size: Option<usize>,

    /// Maximum string length (UTF-16 units) or array elements.
    #[arg(long, value_name = "N")]
    pub max_contiguous_size: Option<usize>,

    /// Maximum UTF-16 units per tag key.
    #[arg(long, value_name = "N")]
    pub max_key_length: Option<usize>,

    /// Maximum tags constructed in one decode.
    #[arg(long, value_name = "N")]
    pub max_allocated_tags: Option<usize>,

    /// Accept any root tag type and key.
    #[arg(long)]
    pub allow_any_root: bool,

    /// Accept End tags as list element types.
    #[arg(long)]
    pub allow_stray_end: bool,

    /// Refuse inputs larger than this after gzip decompression.
    #[arg(long, value_name = "BYTES", default_value_t = source::DEFAULT_MAX_INPUT_BYTES)]
    pub max_input_bytes: u64,
}

impl LimitArgs {
    /// Decoder defaults with every set flag applied on top.
    pub fn config(&self) -> DecoderConfig {
        let mut config = DecoderConfig::default()
            .with_allow_any_root_tag(self.allow_any_root)
            .with_allow_stray_end_tags(self.allow_stray_end);
        if let Some(n) = self.max_depth {
            config = config.with_max_traversal_depth(n);
        }
        if let Some(n) = self.max_compound_size {
            config = config.with_max_compound_size(n);
        }
        if let Some(n) = self.max_list_size {
            config = config.with_max_list_size(n);
        }
        if let Some(n) = self.max_contiguous_size {
            config = config.with_max_contiguous_size(n);
        }
        if let Some(n) = self.max_key_length {
            config = config.with_max_key_length(n);
        }
        if let Some(n) = self.max_allocated_tags {
            config = config.with_max_allocated_tags(n);
        }
        config
    }

    pub fn decoder(&self) -> BoundedTreeDecoder {
        BoundedTreeDecoder::new(self.config())
    }
}

/// Arguments for `safebt inspect`.
///
/// ```text
/// ┌──────────────┬───────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                            │
/// ├──────────────┼───────────────────────────────────────────────────┤
/// │ --json       │ Emit the tree as pretty-printed JSON              │
/// │ --preview N  │ Show at most N elements of each array (def. 16)   │
/// └──────────────┴───────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the payload (raw or gzip).
    pub file: PathBuf,

    /// Emit JSON instead of the indented text tree.
    #[arg(long)]
    pub json: bool,

    /// Array elements shown per array in text mode.
    #[arg(long, value_name = "N", default_value_t = 16)]
    pub preview: usize,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Arguments for `safebt validate`.
///
/// Attempts a full decode and prints `✓` lines on success or a single `✗`
/// diagnostic. Exits with code 1 on any failure.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the payload (raw or gzip).
    pub file: PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,
}

/// Arguments for `safebt stats`.
#[derive(clap::Args)]
pub struct StatsArgs {
    /// Path to the payload (raw or gzip).
    pub file: PathBuf,

    #[command(flatten)]
    pub limits: LimitArgs,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Stats(args) => cmd_stats::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
